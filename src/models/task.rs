use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status")]
pub enum TaskStatus {
    /// Task is still open.
    Pending,
    /// Task is done.
    Completed,
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// What needs doing. Must not be empty.
    #[validate(length(min = 1, max = 1000))]
    pub todo: String,

    /// Initial status of the task.
    pub status: TaskStatus,

    /// Owner of the task. Must reference an existing user.
    #[validate(range(min = 1))]
    pub user_id: i32,
}

/// Represents a task entity as stored in the database and returned by the API.
///
/// `createdAt` and `isExist` keep their camel-case column names on the wire.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub task_id: i32,
    pub todo: String,
    #[serde(rename = "createdAt")]
    #[sqlx(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub status: TaskStatus,
    /// Soft-delete flag. `false` once the task has been deleted.
    #[serde(rename = "isExist")]
    #[sqlx(rename = "isExist")]
    pub is_exist: bool,
    pub user_id: i32,
}
