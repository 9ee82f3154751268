// src/models/history.rs
// DOCUMENTATION: Classification history records
// PURPOSE: Uploaded preview + predicted category per user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::format_timestamp;

/// Row of the place_images table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PlaceImage {
    pub id: i64,
    pub user_id: i64,
    pub place_name: String,
    /// File name relative to the media root
    pub image: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryItem {
    pub history_id: i64,
    pub place_name: String,
    /// Public URL of the stored preview
    pub image: String,
    pub created_at: String,
}

impl PlaceImage {
    pub fn to_item(&self, media_url: &str) -> HistoryItem {
        HistoryItem {
            history_id: self.id,
            place_name: self.place_name.clone(),
            image: format!("{}/{}", media_url.trim_end_matches('/'), self.image),
            created_at: format_timestamp(&self.created_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub histories: Vec<HistoryItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CurationItem {
    pub history_id: i64,
    pub user_id: i64,
    pub place_name: String,
    pub image: String,
    pub created_at: String,
}

impl PlaceImage {
    pub fn to_curation_item(&self, media_url: &str) -> CurationItem {
        let item = self.to_item(media_url);
        CurationItem {
            history_id: item.history_id,
            user_id: self.user_id,
            place_name: item.place_name,
            image: item.image,
            created_at: item.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CurationResponse {
    pub images: Vec<CurationItem>,
}

/// Query string of GET /place/curation
#[derive(Debug, Clone, Deserialize)]
pub struct CurationQuery {
    pub place: Option<String>,
}
