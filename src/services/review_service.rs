// src/services/review_service.rs
// DOCUMENTATION: Business logic for reviews
// PURPOSE: Input rules between handlers and the review repository

use sqlx::PgPool;

use crate::db::{PlaceRepository, ReviewRepository};
use crate::errors::AppError;
use crate::models::{
    average_grade, NewReview, Page, PlaceForm, PlaceReviewItem, PlaceReviewsResponse, PlaceType,
    Review, ReviewUpdate, ReviewUpdateForm, UserReviewItem, UserReviewsResponse,
};

pub struct ReviewService;

impl ReviewService {
    /// One page of a place's reviews with the page's average grade
    pub async fn place_reviews(
        pool: &PgPool,
        place_type: PlaceType,
        place_id: &str,
        page: Page,
    ) -> Result<PlaceReviewsResponse, AppError> {
        let rows = ReviewRepository::get_reviews_by_place(pool, place_type, place_id, page).await?;
        let grades: Vec<i32> = rows.iter().map(|r| r.grade).collect();

        Ok(PlaceReviewsResponse {
            grade: average_grade(&grades),
            reviews: rows.into_iter().map(PlaceReviewItem::from).collect(),
        })
    }

    pub async fn user_reviews(
        pool: &PgPool,
        user_id: i64,
        page: Page,
    ) -> Result<UserReviewsResponse, AppError> {
        let rows = ReviewRepository::get_reviews_by_user(pool, user_id, page).await?;
        Ok(UserReviewsResponse {
            reviews: rows.into_iter().map(UserReviewItem::from).collect(),
        })
    }

    /// Create a review, creating the place from the form first if needed
    pub async fn create_review(
        pool: &PgPool,
        user_id: i64,
        form: &PlaceForm,
    ) -> Result<Review, AppError> {
        let place_type = form
            .place_type
            .as_deref()
            .and_then(PlaceType::parse)
            .ok_or(AppError::InvalidType)?;
        let place_id = form.require_place_id()?;
        let review = NewReview::from_form(form)?;

        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to begin transaction: {}", e);
            AppError::DatabaseError(e.to_string())
        })?;

        PlaceRepository::ensure_from_form(&mut tx, place_type, &place_id, form).await?;
        let created =
            ReviewRepository::create_review(&mut tx, user_id, place_type, &place_id, &review)
                .await?;

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit review: {}", e);
            AppError::DatabaseError(e.to_string())
        })?;

        log::info!("User {} reviewed {} place {}", user_id, place_type, place_id);
        Ok(created)
    }

    pub async fn update_review(
        pool: &PgPool,
        user_id: i64,
        form: &ReviewUpdateForm,
    ) -> Result<Review, AppError> {
        let update = ReviewUpdate::from_form(form)?;
        ReviewRepository::update_review(pool, user_id, &update)
            .await?
            .ok_or(AppError::InvalidReview)
    }

    pub async fn delete_review(pool: &PgPool, user_id: i64, review_id: i64) -> Result<(), AppError> {
        if ReviewRepository::delete_review(pool, user_id, review_id).await? {
            log::info!("User {} deleted review {}", user_id, review_id);
            Ok(())
        } else {
            Err(AppError::InvalidReview)
        }
    }
}
