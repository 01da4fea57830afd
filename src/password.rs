use crate::error::AppError;
use bcrypt::{hash, DEFAULT_COST};

/// Hashes a plain-text password for storage in `users.password`.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
}
