pub mod health;
pub mod query;
pub mod tasks;
pub mod user_tasks;
pub mod users;

use crate::error::AppError;
use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    // Malformed or mistyped JSON bodies are validation failures, not plain 400s
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .service(health::health)
    .service(query::get_query)
    .service(
        web::scope("/users")
            .service(users::get_users)
            .service(users::create_user)
            .service(users::update_user)
            .service(users::delete_user),
    )
    .service(
        web::scope("/tasks")
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(user_tasks::update_tasks_of_user)
    .service(
        web::scope("/user_tasks")
            .service(user_tasks::get_tasks_of_user)
            .service(user_tasks::delete_tasks_of_user),
    );
}
