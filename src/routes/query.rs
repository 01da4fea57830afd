use crate::{error::AppError, query::QueryGateway};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;

/// Extracts the prompt from a request body.
///
/// A JSON string literal (`"list all users"`) is decoded; any other body is
/// taken as raw UTF-8 text.
pub fn prompt_from_body(body: &[u8]) -> Result<String, AppError> {
    if let Ok(prompt) = serde_json::from_slice::<String>(body) {
        return Ok(prompt);
    }
    String::from_utf8(body.to_vec())
        .map_err(|_| AppError::BadRequest("Prompt must be valid UTF-8".into()))
}

/// Answers a free-text question by executing the SQL the translator produces.
///
/// The translated statement is executed as-is, whatever it does.
///
/// ## Responses:
/// - `200 OK`: `{"message": <sql>, "data": [{column: value, ...}, ...]}`.
/// - `400 Bad Request`: `{"detail": "Query execution failed: ..."}` when translation
///   or execution fails, or `{"detail": "Prompt must not be empty"}`.
#[post("/get-Query/")]
pub async fn get_query(
    pool: web::Data<PgPool>,
    gateway: web::Data<QueryGateway>,
    body: web::Bytes,
) -> Result<impl Responder, AppError> {
    let prompt = prompt_from_body(&body)?;
    if prompt.trim().is_empty() {
        return Err(AppError::BadRequest("Prompt must not be empty".into()));
    }

    let outcome = gateway.execute(&pool, &prompt).await?;
    Ok(HttpResponse::Ok().json(outcome))
}
