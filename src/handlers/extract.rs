// src/handlers/extract.rs
// DOCUMENTATION: Extractor error handling
// PURPOSE: Malformed query, path, form and JSON input answers with the same
// JSON error body as every other failure

use actix_web::{web, HttpRequest};

use crate::errors::AppError;

fn log_rejection(req: &HttpRequest, detail: &str) {
    log::debug!("Rejected input of {} {}: {}", req.method(), req.path(), detail);
}

/// Query string, path segment or form field that does not parse
fn invalid_key(detail: String, req: &HttpRequest) -> actix_web::Error {
    log_rejection(req, &detail);
    AppError::InvalidKey(detail).into()
}

/// JSON body that does not match the request type
fn invalid_body(detail: String, req: &HttpRequest) -> actix_web::Error {
    log_rejection(req, &detail);
    AppError::ValidationError(detail).into()
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default().error_handler(|err, req| invalid_key(err.to_string(), req)),
    )
    .app_data(web::PathConfig::default().error_handler(|err, req| invalid_key(err.to_string(), req)))
    .app_data(web::FormConfig::default().error_handler(|err, req| invalid_key(err.to_string(), req)))
    .app_data(
        web::JsonConfig::default().error_handler(|err, req| invalid_body(err.to_string(), req)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::TestState;
    use actix_web::{test, App, HttpResponse};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Visit {
        #[allow(dead_code)]
        place_id: String,
    }

    async fn by_id(_path: web::Path<i64>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn visit(_form: web::Form<Visit>) -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    async fn assert_error_body(resp: actix_web::dev::ServiceResponse, code: &str) {
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], code);
        assert!(body["detail"].is_string());
        assert!(body["timestamp"].is_string());
    }

    #[actix_web::test]
    async fn test_malformed_query_and_json_use_error_body() {
        let state = TestState::new();
        let app = test::init_service(
            App::new()
                .configure(|cfg| state.register(cfg))
                .configure(crate::handlers::reviews_config)
                .configure(crate::handlers::users_config),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/place/126508/reviews?type=tour&offset=abc")
            .to_request();
        assert_error_body(test::call_service(&app, req).await, "INVALID_KEY").await;

        let req = test::TestRequest::post()
            .uri("/users/signin")
            .set_json(json!({"social_type": "naver", "social_id": "1", "nickname": "kim"}))
            .to_request();
        assert_error_body(test::call_service(&app, req).await, "VALIDATION_ERROR").await;
    }

    #[actix_web::test]
    async fn test_malformed_path_and_form_use_error_body() {
        let state = TestState::new();
        let app = test::init_service(
            App::new()
                .configure(|cfg| state.register(cfg))
                .route("/items/{id}", web::get().to(by_id))
                .route("/visits", web::post().to(visit)),
        )
        .await;

        let req = test::TestRequest::get().uri("/items/abc").to_request();
        assert_error_body(test::call_service(&app, req).await, "INVALID_KEY").await;

        let req = test::TestRequest::post()
            .uri("/visits")
            .insert_header(("content-type", "application/json"))
            .set_payload(r#"{"place_id": "1"}"#)
            .to_request();
        assert_error_body(test::call_service(&app, req).await, "INVALID_KEY").await;
    }
}
