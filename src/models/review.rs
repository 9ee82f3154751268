// src/models/review.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use validator::Validate;

use super::{format_timestamp, Page, PlaceForm, PlaceType};
use crate::errors::AppError;

/// Row of the reviews table
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Review {
    pub id: i64,
    pub place_type: String,
    pub place_tour_id: Option<String>,
    pub place_kakao_id: Option<String>,
    pub user_id: i64,
    pub grade: i32,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated review payload
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewReview {
    #[validate(range(min = 0, max = 5))]
    pub grade: i32,

    #[validate(length(max = 2000))]
    pub text: String,
}

fn parse_grade(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| AppError::ValidationError(format!("grade must be an integer, got '{}'", raw)))
}

impl NewReview {
    /// Extract grade and text from a review form
    pub fn from_form(form: &PlaceForm) -> Result<Self, AppError> {
        let grade = form
            .grade
            .as_deref()
            .ok_or_else(|| AppError::InvalidKey("grade".to_string()))?;
        let text = form
            .text
            .clone()
            .ok_or_else(|| AppError::InvalidKey("text".to_string()))?;

        let review = NewReview {
            grade: parse_grade(grade)?,
            text,
        };
        review.validate()?;
        Ok(review)
    }
}

/// Form body of PATCH /users/reviews
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewUpdateForm {
    pub review_id: Option<String>,
    pub text: Option<String>,
    pub grade: Option<String>,
}

/// Validated partial update
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ReviewUpdate {
    pub review_id: i64,

    #[validate(length(max = 2000))]
    pub text: Option<String>,

    #[validate(range(min = 0, max = 5))]
    pub grade: Option<i32>,
}

impl ReviewUpdate {
    pub fn from_form(form: &ReviewUpdateForm) -> Result<Self, AppError> {
        let review_id = form
            .review_id
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .ok_or_else(|| AppError::InvalidKey("review_id".to_string()))?;

        let update = ReviewUpdate {
            review_id,
            text: form.text.clone(),
            grade: form.grade.as_deref().map(parse_grade).transpose()?,
        };
        update.validate()?;
        Ok(update)
    }
}

/// Query string of GET /place/{place_id}/reviews
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceReviewsQuery {
    #[serde(rename = "type")]
    pub place_type: Option<String>,
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl PlaceReviewsQuery {
    pub fn place_type(&self) -> Result<PlaceType, AppError> {
        self.place_type
            .as_deref()
            .and_then(PlaceType::parse)
            .ok_or(AppError::InvalidType)
    }

    pub fn page(&self) -> Page {
        Page::new(self.offset, self.limit)
    }
}

/// Query string of GET /users/reviews
#[derive(Debug, Clone, Deserialize)]
pub struct PageQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> Page {
        Page::new(self.offset, self.limit)
    }
}

/// Review joined with its author, for place review listings
#[derive(Debug, Clone, FromRow)]
pub struct PlaceReviewRow {
    pub id: i64,
    pub user_id: i64,
    pub user_nickname: String,
    pub grade: i32,
    pub text: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaceReviewItem {
    pub review_id: i64,
    pub user_id: i64,
    pub user_nickname: String,
    pub grade: i32,
    pub text: String,
    pub date: String,
}

impl From<PlaceReviewRow> for PlaceReviewItem {
    fn from(row: PlaceReviewRow) -> Self {
        PlaceReviewItem {
            review_id: row.id,
            user_id: row.user_id,
            user_nickname: row.user_nickname,
            grade: row.grade,
            text: row.text,
            date: format_timestamp(&row.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlaceReviewsResponse {
    pub reviews: Vec<PlaceReviewItem>,
    /// "x.xx" average of the returned page, or 0 when empty
    pub grade: Value,
}

/// Average grade of a page of reviews as the client expects it
pub fn average_grade(grades: &[i32]) -> Value {
    if grades.is_empty() {
        return Value::from(0);
    }
    let sum: i64 = grades.iter().map(|g| i64::from(*g)).sum();
    Value::from(format!("{:.2}", sum as f64 / grades.len() as f64))
}

/// Review joined with whichever place it belongs to
#[derive(Debug, Clone, FromRow)]
pub struct UserReviewRow {
    pub id: i64,
    pub place_type: String,
    pub place_tour_id: Option<String>,
    pub place_kakao_id: Option<String>,
    pub grade: i32,
    pub text: String,
    pub updated_at: DateTime<Utc>,

    pub tour_title: Option<String>,
    pub tour_address: Option<String>,
    pub tour_image1: Option<String>,
    pub tour_mapx: Option<String>,
    pub tour_mapy: Option<String>,

    pub kakao_title: Option<String>,
    pub kakao_address: Option<String>,
    pub kakao_mapx: Option<String>,
    pub kakao_mapy: Option<String>,
    pub kakao_place_url: Option<String>,
    pub kakao_category_name: Option<String>,
    pub kakao_category_group_code: Option<String>,
    pub kakao_category_group_name: Option<String>,
    pub kakao_tel: Option<String>,
    pub kakao_road_address: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserReviewItem {
    pub review_id: i64,
    #[serde(rename = "type")]
    pub place_type: String,
    pub place_id: Option<String>,
    pub grade: i32,
    pub text: String,
    pub date: String,
    pub place_title: Option<String>,
    pub address: Option<String>,
    pub image: String,
    pub mapx: Option<String>,
    pub mapy: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_url: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_group_code: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_group_name: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub road_address_name: Option<Option<String>>,
}

impl From<UserReviewRow> for UserReviewItem {
    fn from(row: UserReviewRow) -> Self {
        let date = format_timestamp(&row.updated_at);

        if row.place_type == PlaceType::Kakao.as_str() {
            UserReviewItem {
                review_id: row.id,
                place_type: row.place_type,
                place_id: row.place_kakao_id,
                grade: row.grade,
                text: row.text,
                date,
                place_title: row.kakao_title,
                address: row.kakao_address,
                image: String::new(),
                mapx: row.kakao_mapx,
                mapy: row.kakao_mapy,
                place_url: Some(row.kakao_place_url),
                category_name: Some(row.kakao_category_name),
                category_group_code: Some(row.kakao_category_group_code),
                category_group_name: Some(row.kakao_category_group_name),
                phone: Some(row.kakao_tel),
                road_address_name: Some(row.kakao_road_address),
            }
        } else {
            UserReviewItem {
                review_id: row.id,
                place_type: row.place_type,
                place_id: row.place_tour_id,
                grade: row.grade,
                text: row.text,
                date,
                place_title: row.tour_title,
                address: row.tour_address,
                image: row.tour_image1.unwrap_or_default(),
                mapx: row.tour_mapx,
                mapy: row.tour_mapy,
                place_url: None,
                category_name: None,
                category_group_code: None,
                category_group_name: None,
                phone: None,
                road_address_name: None,
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserReviewsResponse {
    pub reviews: Vec<UserReviewItem>,
}
