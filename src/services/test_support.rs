// src/services/test_support.rs
// DOCUMENTATION: Database fixtures for the ignored PostgreSQL tests

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::UserRepository;
use crate::models::{SignInRequest, SocialType};

pub async fn migrated_pool() -> PgPool {
    dotenv::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to test database");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("apply migrations");
    pool
}

/// Fresh user with a unique social id
pub async fn create_user(pool: &PgPool, nickname: &str) -> i64 {
    let req = SignInRequest {
        social_type: SocialType::Kakao,
        social_id: Uuid::new_v4().to_string(),
        nickname: nickname.chars().take(25).collect(),
    };
    UserRepository::find_or_create(pool, &req)
        .await
        .expect("create user")
        .id
}
