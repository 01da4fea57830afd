use crate::{
    error::AppError,
    models::TaskInput,
    store::{tasks, SoftDelete},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Retrieves every task that has not been soft-deleted.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects ordered by `task_id`.
/// - `500 Internal Server Error`: for database errors.
#[get("/")]
pub async fn get_tasks(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let tasks = tasks::list_active_tasks(&pool).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for an existing user.
///
/// ## Request Body:
/// - `todo`: what needs doing (required, non-empty).
/// - `status`: `"Pending"` or `"Completed"`.
/// - `user_id`: owner of the task.
///
/// ## Responses:
/// - `200 OK`: the created `Task`.
/// - `400 Bad Request`: `user_id` does not reference an existing user.
/// - `422 Unprocessable Entity`: the payload fails validation.
#[post("/")]
pub async fn create_task(
    pool: web::Data<PgPool>,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;
    let task = tasks::create_task(&pool, &task_data).await?;
    Ok(HttpResponse::Ok().json(task))
}

/// Toggles a task between `Pending` and `Completed`.
///
/// ## Responses:
/// - `200 OK`: the updated `Task`.
/// - `404 Not Found`: the task does not exist or has been deleted.
#[put("/{task_id}")]
pub async fn update_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    match tasks::toggle_task_status(&pool, task_id.into_inner()).await? {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound("Task not found".into())),
    }
}

/// Soft-deletes a task by clearing its `isExist` flag.
///
/// Deleting an already deleted task succeeds with a different message.
#[delete("/{task_id}")]
pub async fn delete_task(
    pool: web::Data<PgPool>,
    task_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let message = match tasks::soft_delete_task(&pool, task_id.into_inner()).await? {
        SoftDelete::Deleted => "Task deleted successfully",
        SoftDelete::AlreadyDeleted => "Task is already deleted",
        SoftDelete::NotFound => return Err(AppError::NotFound("Task not found".into())),
    };

    Ok(HttpResponse::Ok().json(json!({ "message": message })))
}
