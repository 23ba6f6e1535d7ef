use crate::error::AppError;
use bcrypt::{hash, verify};

const BCRYPT_COST: u32 = 10;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, BCRYPT_COST).map_err(|e| AppError::internal("Failed to hash password", e))
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, AppError> {
    verify(password, hashed_password)
        .map_err(|e| AppError::internal("Failed to verify password", e))
}
