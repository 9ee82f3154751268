// src/db/review_repository.rs
// DOCUMENTATION: Review database operations
// PURPOSE: Handle CRUD operations for user reviews of places

use crate::errors::AppError;
use crate::models::{NewReview, Page, PlaceReviewRow, PlaceType, Review, ReviewUpdate, UserReviewRow};
use sqlx::{PgConnection, PgPool};

pub struct ReviewRepository;

impl ReviewRepository {
    /// Create a review for an existing place
    pub async fn create_review(
        conn: &mut PgConnection,
        user_id: i64,
        place_type: PlaceType,
        place_id: &str,
        review: &NewReview,
    ) -> Result<Review, AppError> {
        let (tour_id, kakao_id) = match place_type {
            PlaceType::Tour => (Some(place_id), None),
            PlaceType::Kakao => (None, Some(place_id)),
        };

        sqlx::query_as::<_, Review>(
            r#"
            INSERT INTO reviews (place_type, place_tour_id, place_kakao_id, user_id, grade, text)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(place_type.as_str())
        .bind(tour_id)
        .bind(kakao_id)
        .bind(user_id)
        .bind(review.grade)
        .bind(&review.text)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            log::error!("Failed to create review: {}", e);
            AppError::DatabaseError(format!("Create review failed: {}", e))
        })
    }

    /// Reviews of one place, newest update first, with author nickname
    pub async fn get_reviews_by_place(
        pool: &PgPool,
        place_type: PlaceType,
        place_id: &str,
        page: Page,
    ) -> Result<Vec<PlaceReviewRow>, AppError> {
        let place_column = match place_type {
            PlaceType::Tour => "place_tour_id",
            PlaceType::Kakao => "place_kakao_id",
        };

        let sql = format!(
            r#"
            SELECT r.id, r.user_id, u.nickname AS user_nickname, r.grade, r.text, r.updated_at
            FROM reviews r
            JOIN users u ON u.id = r.user_id
            WHERE r.{} = $1
            ORDER BY r.updated_at DESC
            LIMIT $2 OFFSET $3
            "#,
            place_column
        );

        sqlx::query_as::<_, PlaceReviewRow>(&sql)
            .bind(place_id)
            .bind(page.sql_limit())
            .bind(page.sql_offset())
            .fetch_all(pool)
            .await
            .map_err(|e| {
                log::error!("Failed to fetch reviews for {} place {}: {}", place_type, place_id, e);
                AppError::DatabaseError(format!("Fetch reviews failed: {}", e))
            })
    }

    /// Reviews written by a user, joined with their place
    pub async fn get_reviews_by_user(
        pool: &PgPool,
        user_id: i64,
        page: Page,
    ) -> Result<Vec<UserReviewRow>, AppError> {
        sqlx::query_as::<_, UserReviewRow>(
            r#"
            SELECT
                r.id, r.place_type, r.place_tour_id, r.place_kakao_id,
                r.grade, r.text, r.updated_at,
                t.title AS tour_title, t.address AS tour_address, t.image1 AS tour_image1,
                t.mapx AS tour_mapx, t.mapy AS tour_mapy,
                k.title AS kakao_title, k.address AS kakao_address,
                k.mapx AS kakao_mapx, k.mapy AS kakao_mapy,
                k.place_url AS kakao_place_url, k.category_name AS kakao_category_name,
                k.category_group_code AS kakao_category_group_code,
                k.category_group_name AS kakao_category_group_name,
                k.tel AS kakao_tel, k.road_address AS kakao_road_address
            FROM reviews r
            LEFT JOIN tour_places t ON t.id = r.place_tour_id
            LEFT JOIN kakao_places k ON k.id = r.place_kakao_id
            WHERE r.user_id = $1
            ORDER BY r.updated_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(user_id)
        .bind(page.sql_limit())
        .bind(page.sql_offset())
        .fetch_all(pool)
        .await
        .map_err(|e| {
            log::error!("Failed to fetch reviews of user {}: {}", user_id, e);
            AppError::DatabaseError(format!("Fetch reviews failed: {}", e))
        })
    }

    /// Partial update of a review owned by `user_id`
    /// DOCUMENTATION: Returns None when no such review belongs to the user
    pub async fn update_review(
        pool: &PgPool,
        user_id: i64,
        update: &ReviewUpdate,
    ) -> Result<Option<Review>, AppError> {
        sqlx::query_as::<_, Review>(
            r#"
            UPDATE reviews
            SET text = COALESCE($1, text),
                grade = COALESCE($2, grade),
                updated_at = NOW()
            WHERE id = $3 AND user_id = $4
            RETURNING *
            "#,
        )
        .bind(&update.text)
        .bind(update.grade)
        .bind(update.review_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            log::error!("Update failed for review {}: {}", update.review_id, e);
            AppError::DatabaseError(e.to_string())
        })
    }

    /// Delete a review owned by `user_id`; returns whether a row was removed
    pub async fn delete_review(pool: &PgPool, user_id: i64, review_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1 AND user_id = $2")
            .bind(review_id)
            .bind(user_id)
            .execute(pool)
            .await
            .map_err(|e| {
                log::error!("Delete failed for review {}: {}", review_id, e);
                AppError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected() > 0)
    }
}
