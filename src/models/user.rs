// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Social login provider, stored as SMALLINT
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialType {
    Kakao,
    Apple,
    Google,
}

impl SocialType {
    pub fn as_i16(self) -> i16 {
        match self {
            SocialType::Kakao => 0,
            SocialType::Apple => 1,
            SocialType::Google => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub social_type: i16,
    pub social_id: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}

/// Body of POST /users/signin
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SignInRequest {
    pub social_type: SocialType,

    #[validate(length(min = 1, max = 300))]
    pub social_id: String,

    #[validate(length(min = 1, max = 25))]
    pub nickname: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignInResponse {
    pub token: String,
    pub user_id: i64,
    pub nickname: String,
}
