//! Record store for the `users` table.

use crate::{
    error::AppError,
    models::{User, UserInput},
    password::hash_password,
};
use sqlx::PgPool;

const USER_COLUMNS: &str = "user_id, username, email, password";

/// Returns every user ordered by id.
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, AppError> {
    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users ORDER BY user_id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(users)
}

pub async fn find_user(pool: &PgPool, user_id: i32) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

/// Inserts a user, storing a bcrypt hash of the supplied password.
///
/// A duplicate email is rejected by the unique constraint and surfaces as
/// `AppError::BadRequest`.
pub async fn create_user(pool: &PgPool, input: &UserInput) -> Result<User, AppError> {
    let password_hash = hash_password(&input.password)?;

    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (username, email, password) VALUES ($1, $2, $3) RETURNING {USER_COLUMNS}"
    ))
    .bind(&input.username)
    .bind(&input.email)
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    log::info!("Created user {}", user.user_id);
    Ok(user)
}

/// Replaces username, email and password of an existing user.
///
/// Returns `None` when no user has the given id.
pub async fn update_user(
    pool: &PgPool,
    user_id: i32,
    input: &UserInput,
) -> Result<Option<User>, AppError> {
    let password_hash = hash_password(&input.password)?;

    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET username = $1, email = $2, password = $3
         WHERE user_id = $4
         RETURNING {USER_COLUMNS}"
    ))
    .bind(&input.username)
    .bind(&input.email)
    .bind(password_hash)
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Deletes a user and, through the foreign key, all of their tasks.
///
/// Returns `false` when no user has the given id.
pub async fn delete_user(pool: &PgPool, user_id: i32) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE user_id = $1")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
