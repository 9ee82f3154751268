// src/handlers/classification.rs
// DOCUMENTATION: Photo classification handler
// PURPOSE: Accept an uploaded photo, predict its place category, record history

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse, Responder};
use futures::StreamExt;
use sqlx::PgPool;

use crate::config::Config;
use crate::errors::AppError;
use crate::handlers::auth::MaybeUser;
use crate::models::ClassificationResponse;
use crate::services::{ClassifyLimiter, HistoryService, InferenceService, MediaStore};

const IMAGE_FIELD: &str = "image";

/// Read the bytes of the `image` form field, skipping any other fields
async fn read_image_field(mut payload: Multipart, max_bytes: usize) -> Result<Vec<u8>, AppError> {
    while let Some(field) = payload.next().await {
        let mut field = field.map_err(|e| AppError::InvalidImage(e.to_string()))?;
        let is_image = field.content_disposition().get_name() == Some(IMAGE_FIELD);

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| AppError::InvalidImage(e.to_string()))?;
            if !is_image {
                continue;
            }
            if data.len() + chunk.len() > max_bytes {
                log::warn!("Rejected upload larger than {} bytes", max_bytes);
                return Err(AppError::PayloadTooLarge(max_bytes));
            }
            data.extend_from_slice(&chunk);
        }

        if is_image {
            return Ok(data);
        }
    }

    Err(AppError::InvalidKey(IMAGE_FIELD.to_string()))
}

/// POST /place/classification
/// Multipart upload with an `image` field; authentication is optional
pub async fn classify(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    inference: web::Data<InferenceService>,
    media: web::Data<MediaStore>,
    limiter: web::Data<ClassifyLimiter>,
    user: MaybeUser,
    payload: Multipart,
) -> Result<impl Responder, AppError> {
    limiter.check()?;

    let bytes = read_image_field(payload, config.max_upload_bytes).await?;
    log::debug!("Received {} byte upload", bytes.len());

    let service = inference.clone();
    let classification = web::block(move || service.classify(&bytes))
        .await
        .map_err(|e| {
            log::error!("Classification task failed: {}", e);
            AppError::InternalError
        })??;

    HistoryService::record_best_effort(pool.get_ref(), media.get_ref(), user.id(), &classification)
        .await;

    Ok(HttpResponse::Ok().json(ClassificationResponse {
        name: classification.category,
        sentence: classification.sentence,
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/place/classification", web::post().to(classify));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::TestState;
    use crate::services::classifier::tests::RednessClassifier;
    use crate::services::inference_service::tests::service_with;
    use crate::services::preprocess::tests::png_bytes;
    use actix_web::http::header;
    use actix_web::{test, App};
    use std::sync::Arc;

    const BOUNDARY: &str = "placelens-test-boundary";

    fn multipart_body(field: &str, bytes: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"upload.png\"\r\nContent-Type: image/png\r\n\r\n",
                BOUNDARY, field
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload(field: &str, bytes: &[u8]) -> test::TestRequest {
        test::TestRequest::post()
            .uri("/place/classification")
            .insert_header((
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            ))
            .set_payload(multipart_body(field, bytes))
    }

    fn red_state() -> TestState {
        TestState::with_inference(service_with(Arc::new(RednessClassifier)))
    }

    #[actix_web::test]
    async fn test_anonymous_upload_is_classified() {
        let state = red_state();
        let candidates = state.inference.labels().get(1).unwrap().sentences.clone();
        let app = test::init_service(
            App::new()
                .configure(|cfg| state.register(cfg))
                .configure(config),
        )
        .await;

        let req = upload("image", &png_bytes(30, 20, [240, 20, 20])).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["name"], "sunset beach");
        let sentence = body["sentence"].as_str().unwrap().to_string();
        assert!(candidates.contains(&sentence));
    }

    #[actix_web::test]
    async fn test_bad_uploads_are_rejected() {
        let state = red_state();
        let app = test::init_service(
            App::new()
                .configure(|cfg| state.register(cfg))
                .configure(config),
        )
        .await;

        let resp = test::call_service(&app, upload("photo", &png_bytes(4, 4, [0, 0, 0])).to_request()).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "INVALID_KEY");

        let resp = test::call_service(&app, upload("image", b"not an image at all").to_request()).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "INVALID_IMAGE");
    }

    #[actix_web::test]
    async fn test_oversized_upload_is_413() {
        let mut state = red_state();
        let mut config_value = state.config.get_ref().clone();
        config_value.max_upload_bytes = 16;
        state.config = web::Data::new(config_value);

        let app = test::init_service(
            App::new()
                .configure(|cfg| state.register(cfg))
                .configure(config),
        )
        .await;

        let resp = test::call_service(&app, upload("image", &png_bytes(16, 16, [1, 1, 1])).to_request()).await;
        assert_eq!(resp.status(), 413);
    }

    #[actix_web::test]
    async fn test_rate_limit() {
        let mut state = red_state();
        state.limiter = web::Data::new(ClassifyLimiter::per_second(1));

        let app = test::init_service(
            App::new()
                .configure(|cfg| state.register(cfg))
                .configure(config),
        )
        .await;

        let image = png_bytes(8, 8, [9, 9, 9]);
        let first = test::call_service(&app, upload("image", &image).to_request()).await;
        assert_eq!(first.status(), 200);
        let second = test::call_service(&app, upload("image", &image).to_request()).await;
        assert_eq!(second.status(), 429);
    }
}
