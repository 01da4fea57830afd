#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::middleware::Logger;
use actix_web::{test, web, App};
use dotenv::dotenv;
use futures::future::BoxFuture;
use serde_json::{json, Value};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use taskquery::{db, routes, translator::QueryTranslator, AppError, QueryGateway};

/// Connects to `DATABASE_URL` and makes sure the schema exists.
///
/// Returns `None` when no database is configured so the calling test can skip.
pub async fn test_pool() -> Option<PgPool> {
    dotenv().ok();
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return None;
    };
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test DB");
    db::init_schema(&pool)
        .await
        .expect("Failed to create test schema");
    Some(pool)
}

/// Maps known prompts to fixed statements and passes anything else through as SQL.
pub struct ScriptedTranslator {
    script: HashMap<String, String>,
}

impl ScriptedTranslator {
    pub fn new(entries: &[(&str, &str)]) -> Self {
        Self {
            script: entries
                .iter()
                .map(|(prompt, sql)| (prompt.to_string(), sql.to_string()))
                .collect(),
        }
    }
}

impl QueryTranslator for ScriptedTranslator {
    fn translate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, AppError>> {
        let statement = self
            .script
            .get(prompt)
            .cloned()
            .unwrap_or_else(|| prompt.to_string());
        Box::pin(async move { Ok(statement) })
    }
}

pub fn gateway(translator: ScriptedTranslator) -> QueryGateway {
    gateway_with_deadline(translator, Duration::from_secs(10))
}

pub fn gateway_with_deadline(translator: ScriptedTranslator, deadline: Duration) -> QueryGateway {
    QueryGateway::new(Arc::new(translator), deadline)
}

pub async fn init_app(
    pool: PgPool,
    gateway: QueryGateway,
) -> impl Service<
    actix_http::Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(pool))
            .app_data(web::Data::new(gateway))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config),
    )
    .await
}

/// A suffix that keeps fixtures from parallel tests apart.
pub fn unique_suffix() -> String {
    static COUNTER: AtomicU32 = AtomicU32::new(0);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .subsec_nanos();
    format!(
        "{}_{}_{}",
        std::process::id(),
        nanos,
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

/// Creates a user through the API and returns its JSON representation.
pub async fn create_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    label: &str,
) -> Value {
    let suffix = unique_suffix();
    let req = test::TestRequest::post()
        .uri("/users/")
        .set_json(json!({
            "username": format!("{}_{}", label, suffix),
            "email": format!("{}_{}@example.com", label, suffix),
            "password": "Password123!"
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "Failed to create user: {}", resp.status());
    test::read_body_json(resp).await
}

/// Creates a task through the API and returns its JSON representation.
pub async fn create_task(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    user_id: i64,
    todo: &str,
    status: &str,
) -> Value {
    let req = test::TestRequest::post()
        .uri("/tasks/")
        .set_json(json!({ "todo": todo, "status": status, "user_id": user_id }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "Failed to create task: {}", resp.status());
    test::read_body_json(resp).await
}

pub async fn cleanup_user(pool: &PgPool, user_id: i64) {
    let _ = sqlx::query("DELETE FROM users WHERE user_id = $1")
        .bind(user_id as i32)
        .execute(pool)
        .await;
}
