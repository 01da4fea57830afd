use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use std::io;
use std::sync::Arc;
use taskquery::{
    config::Config,
    db,
    query::QueryGateway,
    routes,
    translator::{ChatTranslator, QueryTranslator},
};

fn startup_error(error: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env().map_err(startup_error)?;

    let pool = PgPoolOptions::new()
        .connect(&config.database_url)
        .await
        .map_err(startup_error)?;
    db::init_schema(&pool).await.map_err(startup_error)?;

    let translator: Arc<dyn QueryTranslator> = Arc::new(ChatTranslator::new(config.translator.clone()));
    let gateway = web::Data::new(QueryGateway::new(translator, config.query_timeout));
    let pool = web::Data::new(pool);

    log::info!("Starting taskquery server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone())
            .app_data(gateway.clone())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
