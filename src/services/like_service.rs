// src/services/like_service.rs
// DOCUMENTATION: Business logic for likes
// PURPOSE: Toggle semantics (like, unlike, like again) and grouped listing

use sqlx::PgPool;

use crate::db::{LikeRepository, PlaceRepository};
use crate::errors::AppError;
use crate::models::{group_liked_places, LikedPlaces, PlaceForm, PlaceType};

pub struct LikeService;

impl LikeService {
    /// Validate the type field the way the client expects:
    /// absent -> PLACE_TYPE_ERROR, unknown -> INVALID_PLACE_TYPE
    pub fn parse_place_type(raw: Option<&str>) -> Result<PlaceType, AppError> {
        let raw = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(AppError::MissingPlaceType)?;
        PlaceType::parse(raw).ok_or_else(|| AppError::InvalidPlaceType(raw.to_string()))
    }

    /// Flip the like state; returns true when the place is now liked
    pub async fn toggle(pool: &PgPool, user_id: i64, form: &PlaceForm) -> Result<bool, AppError> {
        let place_type = Self::parse_place_type(form.place_type.as_deref())?;
        let place_id = form.require_place_id()?;

        let mut tx = pool.begin().await.map_err(|e| {
            log::error!("Failed to begin transaction: {}", e);
            AppError::DatabaseError(e.to_string())
        })?;

        LikeRepository::lock_pair(&mut tx, place_type, user_id, &place_id).await?;

        let liked = if LikeRepository::delete_like(&mut tx, place_type, user_id, &place_id).await? {
            false
        } else {
            PlaceRepository::ensure_from_form(&mut tx, place_type, &place_id, form).await?;
            LikeRepository::insert_like(&mut tx, place_type, user_id, &place_id).await?;
            true
        };

        tx.commit().await.map_err(|e| {
            log::error!("Failed to commit like toggle: {}", e);
            AppError::DatabaseError(e.to_string())
        })?;

        log::info!(
            "User {} {} {} place {}",
            user_id,
            if liked { "liked" } else { "unliked" },
            place_type,
            place_id
        );
        Ok(liked)
    }

    pub async fn liked_places(pool: &PgPool, user_id: i64) -> Result<LikedPlaces, AppError> {
        let rows = LikeRepository::get_liked_places(pool, user_id).await?;
        Ok(group_liked_places(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_place_type_codes() {
        assert!(matches!(
            LikeService::parse_place_type(None),
            Err(AppError::MissingPlaceType)
        ));
        assert!(matches!(
            LikeService::parse_place_type(Some("")),
            Err(AppError::MissingPlaceType)
        ));
        assert!(matches!(
            LikeService::parse_place_type(Some("naver")),
            Err(AppError::InvalidPlaceType(t)) if t == "naver"
        ));
        assert_eq!(
            LikeService::parse_place_type(Some("tour")).unwrap(),
            PlaceType::Tour
        );
    }

    /// Needs a disposable PostgreSQL database in DATABASE_URL
    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_like_toggles_off_and_on_again() {
        let pool = crate::services::test_support::migrated_pool().await;
        let user_id = crate::services::test_support::create_user(&pool, "like-toggle").await;
        let form = PlaceForm {
            place_type: Some("tour".to_string()),
            place_id: Some(format!("toggle-{}", user_id)),
            title: Some("Bukchon Hanok Village".to_string()),
            content_type_id: Some("12".to_string()),
            ..Default::default()
        };

        assert!(LikeService::toggle(&pool, user_id, &form).await.unwrap());
        assert!(!LikeService::toggle(&pool, user_id, &form).await.unwrap());
        assert!(LikeService::toggle(&pool, user_id, &form).await.unwrap());

        let liked = LikeService::liked_places(&pool, user_id).await.unwrap();
        assert_eq!(liked["all"].len(), 1);
        assert_eq!(liked["a12"].len(), 1);
    }

    /// Needs a disposable PostgreSQL database in DATABASE_URL
    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_concurrent_double_tap_toggles_once_each() {
        let pool = crate::services::test_support::migrated_pool().await;
        let user_id = crate::services::test_support::create_user(&pool, "like-race").await;

        for round in 0..20 {
            let form = PlaceForm {
                place_type: Some("kakao".to_string()),
                place_id: Some(format!("race-{}-{}", user_id, round)),
                place_name: Some("Gwangjang Market".to_string()),
                ..Default::default()
            };

            let (first, second) = tokio::join!(
                LikeService::toggle(&pool, user_id, &form),
                LikeService::toggle(&pool, user_id, &form)
            );
            let (first, second) = (first.unwrap(), second.unwrap());
            assert_ne!(first, second, "round {}", round);
        }

        // every pair ended unliked
        let liked = LikeService::liked_places(&pool, user_id).await.unwrap();
        assert!(liked["all"].is_empty());
    }
}
