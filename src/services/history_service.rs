// src/services/history_service.rs
// DOCUMENTATION: Classification history
// PURPOSE: Best-effort recording of uploads and owner-scoped access to them

use sqlx::PgPool;

use crate::db::HistoryRepository;
use crate::errors::AppError;
use crate::models::{CurationResponse, HistoryItem, HistoryResponse, PlaceImage};
use crate::services::{Classification, MediaStore};

pub struct HistoryService;

impl HistoryService {
    /// Store the preview and a history row for `user_id`
    pub async fn record(
        pool: &PgPool,
        media: &MediaStore,
        user_id: i64,
        classification: &Classification,
    ) -> Result<PlaceImage, AppError> {
        let file_name = media
            .save_preview(&classification.category, &classification.preview)
            .await?;

        match HistoryRepository::create(pool, user_id, &classification.category, &file_name).await
        {
            Ok(record) => Ok(record),
            Err(e) => {
                if let Err(cleanup) = media.remove(&file_name).await {
                    log::warn!("Failed to remove orphaned preview {}: {}", file_name, cleanup);
                }
                Err(e)
            }
        }
    }

    /// Record a classification if possible; failures never reach the caller
    pub async fn record_best_effort(
        pool: &PgPool,
        media: &MediaStore,
        user_id: Option<i64>,
        classification: &Classification,
    ) -> Option<PlaceImage> {
        let Some(user_id) = user_id else {
            log::info!("Anonymous classification, history not saved");
            return None;
        };

        match Self::record(pool, media, user_id, classification).await {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("Failed to save history for user {}: {}", user_id, e);
                None
            }
        }
    }

    pub async fn list(
        pool: &PgPool,
        media: &MediaStore,
        user_id: i64,
        limit: i64,
    ) -> Result<HistoryResponse, AppError> {
        let records = HistoryRepository::list_recent(pool, user_id, limit.max(0)).await?;
        Ok(HistoryResponse {
            histories: records
                .iter()
                .map(|r| r.to_item(media.base_url()))
                .collect(),
        })
    }

    pub async fn get(
        pool: &PgPool,
        media: &MediaStore,
        user_id: i64,
        id: i64,
    ) -> Result<HistoryItem, AppError> {
        HistoryRepository::get_by_id(pool, id)
            .await?
            .filter(|record| record.user_id == user_id)
            .map(|record| record.to_item(media.base_url()))
            .ok_or_else(|| AppError::NotFound(format!("history {}", id)))
    }

    pub async fn delete(
        pool: &PgPool,
        media: &MediaStore,
        user_id: i64,
        id: i64,
    ) -> Result<(), AppError> {
        let record = HistoryRepository::get_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("history {}", id)))?;

        if record.user_id != user_id {
            log::warn!("User {} tried to delete history {} of user {}", user_id, id, record.user_id);
            return Err(AppError::Forbidden);
        }

        HistoryRepository::delete(pool, id).await?;

        if let Err(e) = media.remove(&record.image).await {
            log::warn!("Failed to remove {}: {}", record.image, e);
        }

        log::info!("Deleted history {}", id);
        Ok(())
    }

    /// Other users' uploads of the same category
    pub async fn curation(
        pool: &PgPool,
        media: &MediaStore,
        user_id: i64,
        place_name: &str,
        limit: i64,
    ) -> Result<CurationResponse, AppError> {
        let records =
            HistoryRepository::list_by_place_name(pool, place_name, user_id, limit.max(0)).await?;
        Ok(CurationResponse {
            images: records
                .iter()
                .map(|r| r.to_curation_item(media.base_url()))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{create_user, migrated_pool};
    use image::{Rgb, RgbImage};

    fn classification(category: &str) -> Classification {
        Classification {
            index: 0,
            category: category.to_string(),
            sentence: "A quiet palace courtyard.".to_string(),
            preview: RgbImage::from_pixel(8, 8, Rgb([120, 80, 40])),
        }
    }

    fn temp_media(tag: &str) -> MediaStore {
        let root = std::env::temp_dir().join(format!("placelens-{}-{}", tag, uuid::Uuid::new_v4()));
        MediaStore::new(root, "/media")
    }

    fn stored_files(media: &MediaStore) -> usize {
        std::fs::read_dir(media.root())
            .map(|entries| entries.count())
            .unwrap_or(0)
    }

    /// Needs a disposable PostgreSQL database in DATABASE_URL
    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_classification_is_recorded_for_signed_in_user_only() {
        let pool = migrated_pool().await;
        let media = temp_media("record");
        let user = create_user(&pool, "history-record").await;

        assert!(HistoryService::record_best_effort(&pool, &media, None, &classification("palace"))
            .await
            .is_none());
        assert_eq!(stored_files(&media), 0);

        let record = HistoryService::record_best_effort(
            &pool,
            &media,
            Some(user),
            &classification("palace"),
        )
        .await
        .unwrap();
        assert_eq!(record.user_id, user);
        assert_eq!(record.place_name, "palace");
        assert!(media.read(&record.image).await.is_ok());

        let listed = HistoryService::list(&pool, &media, user, 20).await.unwrap();
        assert_eq!(listed.histories.len(), 1);
        assert_eq!(listed.histories[0].history_id, record.id);
        assert_eq!(listed.histories[0].image, format!("/media/{}", record.image));

        HistoryService::delete(&pool, &media, user, record.id).await.unwrap();
        assert!(matches!(
            media.read(&record.image).await,
            Err(AppError::NotFound(_))
        ));

        let _ = tokio::fs::remove_dir_all(media.root()).await;
    }

    /// Needs a disposable PostgreSQL database in DATABASE_URL
    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_long_category_is_recorded() {
        let pool = migrated_pool().await;
        let media = temp_media("long");
        let user = create_user(&pool, "history-long").await;
        let category = "Gyeongbokgung Palace ".repeat(13);

        let record =
            HistoryService::record_best_effort(&pool, &media, Some(user), &classification(&category))
                .await
                .unwrap();
        assert_eq!(record.place_name, category);

        let _ = tokio::fs::remove_dir_all(media.root()).await;
    }

    /// Needs a disposable PostgreSQL database in DATABASE_URL
    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_failed_insert_leaves_no_file_behind() {
        let pool = migrated_pool().await;
        let media = temp_media("orphan");

        // no such user: the insert violates the foreign key
        let result = HistoryService::record(&pool, &media, i64::MAX, &classification("palace")).await;
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
        assert_eq!(stored_files(&media), 0);

        let _ = tokio::fs::remove_dir_all(media.root()).await;
    }

    /// Needs a disposable PostgreSQL database in DATABASE_URL
    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_history_is_recent_and_scoped_to_owner() {
        let pool = migrated_pool().await;
        let media = MediaStore::new(std::env::temp_dir().join("placelens-history"), "/media");
        let owner = create_user(&pool, "history-owner").await;
        let other = create_user(&pool, "history-other").await;

        for i in 0..25 {
            HistoryRepository::create(&pool, owner, "palace", &format!("palace_{}.jpg", i))
                .await
                .unwrap();
        }
        let foreign = HistoryRepository::create(&pool, other, "palace", "palace_other.jpg")
            .await
            .unwrap();

        let listed = HistoryService::list(&pool, &media, owner, 20).await.unwrap();
        assert_eq!(listed.histories.len(), 20);
        assert_eq!(listed.histories[0].image, "/media/palace_24.jpg");
        assert!(listed
            .histories
            .iter()
            .all(|h| h.history_id != foreign.id));

        assert!(matches!(
            HistoryService::get(&pool, &media, owner, foreign.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            HistoryService::delete(&pool, &media, owner, foreign.id).await,
            Err(AppError::Forbidden)
        ));

        let curation = HistoryService::curation(&pool, &media, owner, "palace", 20)
            .await
            .unwrap();
        assert!(curation.images.iter().all(|i| i.user_id != owner));
        assert!(curation.images.iter().any(|i| i.history_id == foreign.id));
    }
}
