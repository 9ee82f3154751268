// src/handlers/likes.rs
// DOCUMENTATION: Like handlers
// PURPOSE: Toggle a like on a place and list liked places

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;

use crate::errors::AppError;
use crate::handlers::auth::AuthUser;
use crate::models::PlaceForm;
use crate::services::LikeService;

/// POST /place/like
/// `{"message": true}` when the like was created, `false` when removed
pub async fn toggle_like(
    pool: web::Data<PgPool>,
    user: AuthUser,
    form: web::Form<PlaceForm>,
) -> Result<impl Responder, AppError> {
    let liked = LikeService::toggle(pool.get_ref(), user.id, &form).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": liked })))
}

/// GET /users/likes
pub async fn user_likes(
    pool: web::Data<PgPool>,
    user: AuthUser,
) -> Result<impl Responder, AppError> {
    let grouped = LikeService::liked_places(pool.get_ref(), user.id).await?;
    Ok(HttpResponse::Ok().json(grouped))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/place/like", web::post().to(toggle_like))
        .route("/users/likes", web::get().to(user_likes));
}
