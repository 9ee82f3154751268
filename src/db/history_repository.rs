// src/db/history_repository.rs
// DOCUMENTATION: Classification history database operations

use crate::errors::AppError;
use crate::models::PlaceImage;
use sqlx::PgPool;

pub struct HistoryRepository;

impl HistoryRepository {
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        place_name: &str,
        image: &str,
    ) -> Result<PlaceImage, AppError> {
        sqlx::query_as::<_, PlaceImage>(
            r#"
            INSERT INTO place_images (user_id, place_name, image)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, place_name, image, created_at
            "#,
        )
        .bind(user_id)
        .bind(place_name)
        .bind(image)
        .fetch_one(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to save history for user {}: {}", user_id, e);
            AppError::DatabaseError(e.to_string())
        })
    }

    /// Most recent records of one user
    pub async fn list_recent(
        pool: &PgPool,
        user_id: i64,
        limit: i64,
    ) -> Result<Vec<PlaceImage>, AppError> {
        sqlx::query_as::<_, PlaceImage>(
            r#"
            SELECT id, user_id, place_name, image, created_at
            FROM place_images
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list history of user {}: {}", user_id, e);
            AppError::DatabaseError(e.to_string())
        })
    }

    pub async fn get_by_id(pool: &PgPool, id: i64) -> Result<Option<PlaceImage>, AppError> {
        sqlx::query_as::<_, PlaceImage>(
            "SELECT id, user_id, place_name, image, created_at FROM place_images WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch history {}: {}", id, e);
            AppError::DatabaseError(e.to_string())
        })
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<(), AppError> {
        sqlx::query("DELETE FROM place_images WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to delete history {}: {}", id, e);
                AppError::DatabaseError(e.to_string())
            })?;
        Ok(())
    }

    /// Images of a category uploaded by anyone but `exclude_user_id`
    pub async fn list_by_place_name(
        pool: &PgPool,
        place_name: &str,
        exclude_user_id: i64,
        limit: i64,
    ) -> Result<Vec<PlaceImage>, AppError> {
        sqlx::query_as::<_, PlaceImage>(
            r#"
            SELECT id, user_id, place_name, image, created_at
            FROM place_images
            WHERE place_name = $1 AND user_id <> $2
            ORDER BY created_at DESC, id DESC
            LIMIT $3
            "#,
        )
        .bind(place_name)
        .bind(exclude_user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to list curation for '{}': {}", place_name, e);
            AppError::DatabaseError(e.to_string())
        })
    }
}
