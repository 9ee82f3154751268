// src/models/like.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use std::collections::BTreeMap;

use super::{format_timestamp, PlaceType, TOUR_CONTENT_TYPES};

/// A liked place joined with its catalog row
#[derive(Debug, Clone, FromRow)]
pub struct LikedPlaceRow {
    pub place_id: String,
    pub place_type: String,
    pub content_type_id: Option<String>,
    pub title: Option<String>,
    pub image: Option<String>,
    pub address: Option<String>,
    pub mapx: Option<String>,
    pub mapy: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LikedPlaceItem {
    pub place_id: String,
    #[serde(rename = "type")]
    pub place_type: String,
    pub content_type_id: Option<String>,
    pub title: Option<String>,
    pub image: Option<String>,
    pub address: Option<String>,
    pub created_at: String,
    pub mapx: Option<String>,
    pub mapy: Option<String>,
}

impl From<LikedPlaceRow> for LikedPlaceItem {
    fn from(row: LikedPlaceRow) -> Self {
        LikedPlaceItem {
            place_id: row.place_id,
            place_type: row.place_type,
            content_type_id: row.content_type_id,
            title: row.title,
            image: row.image,
            address: row.address,
            created_at: format_timestamp(&row.created_at),
            mapx: row.mapx,
            mapy: row.mapy,
        }
    }
}

/// Response of GET /users/likes: `all` plus one bucket per tour content
/// type (`a12`, `a14`, ...) and a `kakao` bucket
pub type LikedPlaces = BTreeMap<String, Vec<LikedPlaceItem>>;

/// Group rows (already sorted newest first) into response buckets
pub fn group_liked_places(rows: Vec<LikedPlaceRow>) -> LikedPlaces {
    let mut buckets: LikedPlaces = BTreeMap::new();
    buckets.insert("all".to_string(), Vec::new());
    buckets.insert(PlaceType::Kakao.as_str().to_string(), Vec::new());
    for content_type in TOUR_CONTENT_TYPES {
        buckets.insert(format!("a{}", content_type), Vec::new());
    }

    for row in rows {
        let item = LikedPlaceItem::from(row);

        let bucket = if item.place_type == PlaceType::Kakao.as_str() {
            Some(PlaceType::Kakao.as_str().to_string())
        } else {
            item.content_type_id
                .as_deref()
                .map(str::trim)
                .filter(|ct| TOUR_CONTENT_TYPES.contains(ct))
                .map(|ct| format!("a{}", ct))
        };

        if let Some(bucket) = bucket.and_then(|key| buckets.get_mut(&key)) {
            bucket.push(item.clone());
        }
        if let Some(all) = buckets.get_mut("all") {
            all.push(item);
        }
    }

    buckets
}
