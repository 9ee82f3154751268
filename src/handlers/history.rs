// src/handlers/history.rs
// DOCUMENTATION: Classification history handlers
// PURPOSE: List, inspect and delete the caller's uploads; browse others' uploads

use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

use crate::config::Config;
use crate::errors::AppError;
use crate::handlers::auth::AuthUser;
use crate::models::CurationQuery;
use crate::services::{HistoryService, MediaStore};

/// GET /place/history
/// The caller's most recent classifications, newest first
pub async fn list_history(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    media: web::Data<MediaStore>,
    user: AuthUser,
) -> Result<impl Responder, AppError> {
    let response =
        HistoryService::list(pool.get_ref(), media.get_ref(), user.id, config.history_limit)
            .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /place/history/{id}
pub async fn get_history(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    user: AuthUser,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let item = HistoryService::get(pool.get_ref(), media.get_ref(), user.id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(item))
}

/// DELETE /place/history/{id}
pub async fn delete_history(
    pool: web::Data<PgPool>,
    media: web::Data<MediaStore>,
    user: AuthUser,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    HistoryService::delete(pool.get_ref(), media.get_ref(), user.id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /place/curation?place=
/// Uploads of the same category by other users
pub async fn curation(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    media: web::Data<MediaStore>,
    user: AuthUser,
    query: web::Query<CurationQuery>,
) -> Result<impl Responder, AppError> {
    let place = query
        .place
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::InvalidKey("place".to_string()))?;

    let response = HistoryService::curation(
        pool.get_ref(),
        media.get_ref(),
        user.id,
        place,
        config.curation_limit,
    )
    .await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/place/history", web::get().to(list_history))
        .route("/place/history/{id}", web::get().to(get_history))
        .route("/place/history/{id}", web::delete().to(delete_history))
        .route("/place/curation", web::get().to(curation));
}
