// src/services/auth.rs
// DOCUMENTATION: Access token issuing and verification
// PURPOSE: HS256 JWTs carrying the user id

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub id: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours.max(1)),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.jwt_secret, config.jwt_ttl_hours)
    }

    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        let claims = Claims {
            id: user_id,
            exp: (Utc::now() + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| {
            log::error!("Failed to sign token for user {}: {}", user_id, e);
            AppError::InternalError
        })
    }

    /// Verify a token taken from the Authorization header
    /// DOCUMENTATION: Accepts the raw token or `Bearer <token>`
    pub fn verify(&self, header_value: &str) -> Result<Claims, AppError> {
        let token = header_value
            .trim()
            .strip_prefix("Bearer ")
            .unwrap_or(header_value)
            .trim();

        if token.is_empty() {
            return Err(AppError::Unauthorized);
        }

        decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|e| {
                log::debug!("Rejected access token: {}", e);
                AppError::Unauthorized
            })
    }
}
