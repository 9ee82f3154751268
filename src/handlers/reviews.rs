// src/handlers/reviews.rs
// DOCUMENTATION: Review handlers
// PURPOSE: Public place reviews and the caller's own reviews (form bodies)

use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::handlers::auth::AuthUser;
use crate::models::{PageQuery, PlaceForm, PlaceReviewsQuery, ReviewUpdateForm};
use crate::services::ReviewService;

/// GET /place/{place_id}/reviews?type=&offset=&limit=
pub async fn place_reviews(
    pool: web::Data<PgPool>,
    path: web::Path<String>,
    query: web::Query<PlaceReviewsQuery>,
) -> Result<impl Responder, AppError> {
    let place_type = query.place_type()?;
    let place_id = path.into_inner();

    let response =
        ReviewService::place_reviews(pool.get_ref(), place_type, &place_id, query.page()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// GET /users/reviews?offset=&limit=
pub async fn user_reviews(
    pool: web::Data<PgPool>,
    user: AuthUser,
    query: web::Query<PageQuery>,
) -> Result<impl Responder, AppError> {
    let response = ReviewService::user_reviews(pool.get_ref(), user.id, query.page()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// POST /users/reviews
/// Creates the reviewed place from the form when it is not stored yet
pub async fn create_review(
    pool: web::Data<PgPool>,
    user: AuthUser,
    form: web::Form<PlaceForm>,
) -> Result<impl Responder, AppError> {
    ReviewService::create_review(pool.get_ref(), user.id, &form).await?;
    Ok(HttpResponse::Created().finish())
}

/// PATCH /users/reviews
pub async fn update_review(
    pool: web::Data<PgPool>,
    user: AuthUser,
    form: web::Form<ReviewUpdateForm>,
) -> Result<impl Responder, AppError> {
    ReviewService::update_review(pool.get_ref(), user.id, &form).await?;
    Ok(HttpResponse::Ok().finish())
}

/// DELETE /users/reviews/{review_id}
pub async fn delete_review(
    pool: web::Data<PgPool>,
    user: AuthUser,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    ReviewService::delete_review(pool.get_ref(), user.id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/place/{place_id}/reviews", web::get().to(place_reviews))
        .service(
            web::resource("/users/reviews")
                .route(web::get().to(user_reviews))
                .route(web::post().to(create_review))
                .route(web::patch().to(update_review)),
        )
        .route("/users/reviews/{review_id}", web::delete().to(delete_review));
}
