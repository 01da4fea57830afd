//! Record store for the `tasks` table.
//!
//! Soft-deleted tasks (`"isExist" = FALSE`) stay in the table but are invisible
//! to every read and toggle in this module.

use crate::{
    error::AppError,
    models::{Task, TaskInput},
};
use sqlx::PgPool;

const TASK_COLUMNS: &str = r#"task_id, todo, "createdAt", status, "isExist", user_id"#;

const TOGGLED_STATUS: &str =
    "CASE status WHEN 'Pending' THEN 'Completed'::task_status ELSE 'Pending'::task_status END";

/// Outcome of a soft delete on a single task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftDelete {
    Deleted,
    AlreadyDeleted,
    NotFound,
}

/// Returns every active task ordered by id.
pub async fn list_active_tasks(pool: &PgPool) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        r#"SELECT {TASK_COLUMNS} FROM tasks WHERE "isExist" ORDER BY task_id"#
    ))
    .fetch_all(pool)
    .await?;
    Ok(tasks)
}

/// Returns the active tasks owned by `user_id`.
pub async fn list_active_tasks_for_user(pool: &PgPool, user_id: i32) -> Result<Vec<Task>, AppError> {
    let tasks = sqlx::query_as::<_, Task>(&format!(
        r#"SELECT {TASK_COLUMNS} FROM tasks WHERE user_id = $1 AND "isExist" ORDER BY task_id"#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(tasks)
}

/// Inserts a task. An unknown `user_id` is rejected by the foreign key and
/// surfaces as `AppError::BadRequest`.
pub async fn create_task(pool: &PgPool, input: &TaskInput) -> Result<Task, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        "INSERT INTO tasks (todo, status, user_id) VALUES ($1, $2, $3) RETURNING {TASK_COLUMNS}"
    ))
    .bind(&input.todo)
    .bind(input.status)
    .bind(input.user_id)
    .fetch_one(pool)
    .await?;

    log::info!("Created task {} for user {}", task.task_id, task.user_id);
    Ok(task)
}

/// Flips an active task between `Pending` and `Completed`.
///
/// Returns `None` when the task does not exist or has been soft-deleted.
pub async fn toggle_task_status(pool: &PgPool, task_id: i32) -> Result<Option<Task>, AppError> {
    let task = sqlx::query_as::<_, Task>(&format!(
        r#"UPDATE tasks SET status = {TOGGLED_STATUS}
           WHERE task_id = $1 AND "isExist"
           RETURNING {TASK_COLUMNS}"#
    ))
    .bind(task_id)
    .fetch_optional(pool)
    .await?;
    Ok(task)
}

/// Flips the status of every active task owned by `user_id`.
pub async fn toggle_user_tasks(pool: &PgPool, user_id: i32) -> Result<Vec<Task>, AppError> {
    let mut tasks = sqlx::query_as::<_, Task>(&format!(
        r#"UPDATE tasks SET status = {TOGGLED_STATUS}
           WHERE user_id = $1 AND "isExist"
           RETURNING {TASK_COLUMNS}"#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    // RETURNING carries no ordering guarantee
    tasks.sort_by_key(|task| task.task_id);
    Ok(tasks)
}

/// Marks a single task as deleted without removing the row.
pub async fn soft_delete_task(pool: &PgPool, task_id: i32) -> Result<SoftDelete, AppError> {
    let mut tx = pool.begin().await?;

    let is_exist = sqlx::query_scalar::<_, bool>(
        r#"SELECT "isExist" FROM tasks WHERE task_id = $1 FOR UPDATE"#,
    )
    .bind(task_id)
    .fetch_optional(&mut *tx)
    .await?;

    let outcome = match is_exist {
        None => SoftDelete::NotFound,
        Some(false) => SoftDelete::AlreadyDeleted,
        Some(true) => {
            sqlx::query(r#"UPDATE tasks SET "isExist" = FALSE WHERE task_id = $1"#)
                .bind(task_id)
                .execute(&mut *tx)
                .await?;
            SoftDelete::Deleted
        }
    };

    tx.commit().await?;
    Ok(outcome)
}

/// Marks every task owned by `user_id` as deleted. Returns the number of rows touched.
pub async fn soft_delete_user_tasks(pool: &PgPool, user_id: i32) -> Result<u64, AppError> {
    let result = sqlx::query(r#"UPDATE tasks SET "isExist" = FALSE WHERE user_id = $1 AND "isExist""#)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
