use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::task::Task;

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// A row of the `users` table.
///
/// The stored password hash is loaded for completeness but never serialized.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_id: i32,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Payload for creating or replacing a user.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UserInput {
    #[validate(
        length(min = 3, max = 50),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 6))]
    pub password: String, // Plain text on the way in, stored as a bcrypt hash
}

/// A user together with their active tasks, as returned by `GET /user_tasks/{id}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserTasks {
    pub user_id: i32,
    pub username: String,
    pub usermail: String,
    pub tasks: Vec<Task>,
}

impl UserTasks {
    pub fn new(user: User, tasks: Vec<Task>) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            usermail: user.email,
            tasks,
        }
    }
}
