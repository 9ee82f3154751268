// src/db/user_repository.rs
// DOCUMENTATION: User database operations

use crate::errors::AppError;
use crate::models::{SignInRequest, User};
use sqlx::PgPool;

pub struct UserRepository;

impl UserRepository {
    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, social_type, social_id, nickname, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch user {}: {}", id, e);
            AppError::DatabaseError(e.to_string())
        })
    }

    /// Find a user by social identity or create it
    /// DOCUMENTATION: The nickname of an existing user is not overwritten
    pub async fn find_or_create(pool: &PgPool, req: &SignInRequest) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (social_type, social_id, nickname)
            VALUES ($1, $2, $3)
            ON CONFLICT (social_type, social_id)
            DO UPDATE SET social_id = EXCLUDED.social_id
            RETURNING id, social_type, social_id, nickname, created_at
            "#,
        )
        .bind(req.social_type.as_i16())
        .bind(&req.social_id)
        .bind(&req.nickname)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to sign in user: {}", e);
            AppError::DatabaseError(e.to_string())
        })
    }
}
