// src/handlers/users.rs
// DOCUMENTATION: Account handlers
// PURPOSE: Social sign-in issuing access tokens

use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::SignInRequest;
use crate::services::{TokenService, UserService};

/// POST /users/signin
/// Find or create the user for a social account and return an access token
pub async fn sign_in(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    req: web::Json<SignInRequest>,
) -> Result<impl Responder, AppError> {
    let response = UserService::sign_in(pool.get_ref(), tokens.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/users/signin", web::post().to(sign_in));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::TestState;
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn test_sign_in_validates_before_touching_database() {
        let state = TestState::new();
        let app = test::init_service(
            App::new()
                .configure(|cfg| state.register(cfg))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/users/signin")
            .set_json(json!({"social_type": "kakao", "social_id": "123", "nickname": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "VALIDATION_ERROR");
    }
}
