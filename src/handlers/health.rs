// src/handlers/health.rs
// DOCUMENTATION: Health check handler
// PURPOSE: Simple endpoint to verify service status

use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use crate::services::InferenceService;

pub async fn health_check(inference: web::Data<InferenceService>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "placelens",
        "version": env!("CARGO_PKG_VERSION"),
        "labels": inference.labels().len()
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::TestState;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn test_health_reports_loaded_labels() {
        let state = TestState::new();
        let app = test::init_service(
            App::new()
                .configure(|cfg| state.register(cfg))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "placelens");
        assert_eq!(body["labels"], 2);
    }
}
