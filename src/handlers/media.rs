// src/handlers/media.rs
// DOCUMENTATION: Stored preview delivery
// PURPOSE: Serve files from the media root

use actix_web::{web, HttpResponse, Responder};

use crate::errors::AppError;
use crate::services::MediaStore;

/// GET /media/{file}
pub async fn serve_media(
    media: web::Data<MediaStore>,
    path: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let bytes = media.read(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().content_type("image/jpeg").body(bytes))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/media/{file}", web::get().to(serve_media));
}
