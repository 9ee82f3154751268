// src/services/user_service.rs
// DOCUMENTATION: Social sign-in
// PURPOSE: Find-or-create the user and hand out an access token

use sqlx::PgPool;
use validator::Validate;

use crate::db::UserRepository;
use crate::errors::AppError;
use crate::models::{SignInRequest, SignInResponse};
use crate::services::TokenService;

pub struct UserService;

impl UserService {
    pub async fn sign_in(
        pool: &PgPool,
        tokens: &TokenService,
        req: SignInRequest,
    ) -> Result<SignInResponse, AppError> {
        req.validate()?;

        let user = UserRepository::find_or_create(pool, &req).await?;
        let token = tokens.issue(user.id)?;

        log::info!("User {} signed in", user.id);
        Ok(SignInResponse {
            token,
            user_id: user.id,
            nickname: user.nickname,
        })
    }
}
