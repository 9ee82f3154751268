// src/db/like_repository.rs
// DOCUMENTATION: Like database operations
// PURPOSE: Toggle and list the places a user liked

use crate::errors::AppError;
use crate::models::{LikedPlaceRow, PlaceType};
use sqlx::{PgConnection, PgPool};

pub struct LikeRepository;

fn like_table(place_type: PlaceType) -> &'static str {
    match place_type {
        PlaceType::Tour => "user_like_tour_places",
        PlaceType::Kakao => "user_like_kakao_places",
    }
}

impl LikeRepository {
    /// Serialize toggles of one (user, place) pair until the transaction ends
    pub async fn lock_pair(
        conn: &mut PgConnection,
        place_type: PlaceType,
        user_id: i64,
        place_id: &str,
    ) -> Result<(), AppError> {
        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1))")
            .bind(format!("like:{}:{}:{}", place_type, user_id, place_id))
            .execute(conn)
            .await
            .map_err(|e| {
                log::error!("Failed to lock like of user {} on {}: {}", user_id, place_id, e);
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    /// Remove an existing like; returns whether one existed
    pub async fn delete_like(
        conn: &mut PgConnection,
        place_type: PlaceType,
        user_id: i64,
        place_id: &str,
    ) -> Result<bool, AppError> {
        let sql = format!(
            "DELETE FROM {} WHERE user_id = $1 AND place_id = $2",
            like_table(place_type)
        );

        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(place_id)
            .execute(conn)
            .await
            .map_err(|e| {
                log::error!("Failed to delete like on {} place {}: {}", place_type, place_id, e);
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }

    /// Insert a like; the place row must exist
    pub async fn insert_like(
        conn: &mut PgConnection,
        place_type: PlaceType,
        user_id: i64,
        place_id: &str,
    ) -> Result<(), AppError> {
        let sql = format!(
            "INSERT INTO {} (user_id, place_id) VALUES ($1, $2) ON CONFLICT (user_id, place_id) DO NOTHING",
            like_table(place_type)
        );

        sqlx::query(&sql)
            .bind(user_id)
            .bind(place_id)
            .execute(conn)
            .await
            .map_err(|e| {
                log::error!("Failed to like {} place {}: {}", place_type, place_id, e);
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(())
    }

    /// Every place the user liked, newest like first
    pub async fn get_liked_places(
        pool: &PgPool,
        user_id: i64,
    ) -> Result<Vec<LikedPlaceRow>, AppError> {
        sqlx::query_as::<_, LikedPlaceRow>(
            r#"
            SELECT * FROM (
                SELECT
                    t.id AS place_id, 'tour' AS place_type, t.content_type_id,
                    t.title, t.image1 AS image, t.address, t.mapx, t.mapy, l.created_at
                FROM user_like_tour_places l
                JOIN tour_places t ON t.id = l.place_id
                WHERE l.user_id = $1
                UNION ALL
                SELECT
                    k.id AS place_id, 'kakao' AS place_type, NULL AS content_type_id,
                    k.title, NULL AS image, k.address, k.mapx, k.mapy, l.created_at
                FROM user_like_kakao_places l
                JOIN kakao_places k ON k.id = l.place_id
                WHERE l.user_id = $1
            ) liked
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch likes of user {}: {}", user_id, e);
            AppError::DatabaseError(e.to_string())
        })
    }
}
