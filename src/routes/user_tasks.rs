use crate::{
    error::AppError,
    models::UserTasks,
    store::{tasks, users},
};
use actix_web::{delete, get, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

/// Returns a user together with their active tasks.
///
/// ## Responses:
/// - `200 OK`: `{"user_id", "username", "usermail", "tasks": [...]}`.
/// - `404 Not Found`: no user with this id.
#[get("/{user_id}")]
pub async fn get_tasks_of_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let user_id = user_id.into_inner();

    let user = users::find_user(&pool, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let tasks = tasks::list_active_tasks_for_user(&pool, user_id).await?;

    Ok(HttpResponse::Ok().json(UserTasks::new(user, tasks)))
}

/// Toggles the status of every active task owned by the user.
#[put("/user_tasks_update/{user_id}")]
pub async fn update_tasks_of_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let tasks = tasks::toggle_user_tasks(&pool, user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Soft-deletes every task owned by the user.
#[delete("/{user_id}")]
pub async fn delete_tasks_of_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let user_id = user_id.into_inner();
    let deleted = tasks::soft_delete_user_tasks(&pool, user_id).await?;
    log::info!("Soft-deleted {} tasks of user {}", deleted, user_id);

    Ok(HttpResponse::Ok().json(json!({
        "message": "Tasks successfully deleted"
    })))
}
