use crate::{error::AppError, models::UserInput, store::users};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use validator::Validate;

/// Lists every user.
///
/// ## Responses:
/// - `200 OK`: JSON array of users (`user_id`, `username`, `email`).
#[get("/")]
pub async fn get_users(pool: web::Data<PgPool>) -> Result<impl Responder, AppError> {
    let users = users::list_users(&pool).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Creates a user.
///
/// ## Responses:
/// - `200 OK`: the created user.
/// - `400 Bad Request`: the email is already taken.
/// - `422 Unprocessable Entity`: the payload fails validation.
#[post("/")]
pub async fn create_user(
    pool: web::Data<PgPool>,
    user_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;
    let user = users::create_user(&pool, &user_data).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// Replaces a user's username, email and password.
///
/// ## Responses:
/// - `200 OK`: the updated user.
/// - `404 Not Found`: no user with this id.
/// - `422 Unprocessable Entity`: the payload fails validation.
#[put("/{user_id}")]
pub async fn update_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
    user_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;

    match users::update_user(&pool, user_id.into_inner(), &user_data).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(AppError::NotFound("User not found".into())),
    }
}

/// Deletes a user together with all of their tasks.
#[delete("/{user_id}")]
pub async fn delete_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    if !users::delete_user(&pool, user_id.into_inner()).await? {
        return Err(AppError::NotFound("User not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "User deleted successfully"
    })))
}
