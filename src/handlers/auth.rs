// src/handlers/auth.rs
// DOCUMENTATION: Request authentication extractors
// PURPOSE: Resolve the Authorization header to a user before a handler runs

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::db::UserRepository;
use crate::errors::AppError;
use crate::services::TokenService;

/// Authenticated caller; extraction fails with 401 INVALID_TOKEN
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: i64,
    pub nickname: String,
}

/// Caller that may be anonymous; any authentication failure yields None
#[derive(Debug, Clone)]
pub struct MaybeUser(pub Option<AuthUser>);

impl MaybeUser {
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|user| user.id)
    }
}

async fn authenticate(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let tokens = req.app_data::<web::Data<TokenService>>().ok_or_else(|| {
        log::error!("TokenService not registered");
        AppError::InternalError
    })?;
    let claims = tokens.verify(header_value)?;

    let pool = req.app_data::<web::Data<PgPool>>().ok_or_else(|| {
        log::error!("Database pool not registered");
        AppError::InternalError
    })?;

    let user = UserRepository::get_by_id(pool.get_ref(), claims.id)
        .await?
        .ok_or_else(|| {
            log::warn!("Token for unknown user {}", claims.id);
            AppError::Unauthorized
        })?;

    Ok(AuthUser {
        id: user.id,
        nickname: user.nickname,
    })
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { authenticate(&req).await })
    }
}

impl FromRequest for MaybeUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            if !req.headers().contains_key(header::AUTHORIZATION) {
                return Ok(MaybeUser(None));
            }
            match authenticate(&req).await {
                Ok(user) => Ok(MaybeUser(Some(user))),
                Err(e) => {
                    log::info!("Treating caller as anonymous: {}", e);
                    Ok(MaybeUser(None))
                }
            }
        })
    }
}
