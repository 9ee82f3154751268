// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components

pub mod auth;
pub mod classification;
pub mod extract;
pub mod health;
pub mod history;
pub mod likes;
pub mod media;
pub mod reviews;
pub mod users;

pub use auth::{AuthUser, MaybeUser};
pub use classification::config as classification_config;
pub use extract::config as extract_config;
pub use health::config as health_config;
pub use history::config as history_config;
pub use likes::config as likes_config;
pub use media::config as media_config;
pub use reviews::config as reviews_config;
pub use users::config as users_config;

/// Application state for handler tests; the pool is lazy and never connects
/// unless a handler reaches the database
#[cfg(test)]
pub(crate) mod testing {
    use actix_web::web;
    use sqlx::postgres::PgPoolOptions;
    use sqlx::PgPool;
    use std::sync::Arc;

    use crate::config::Config;
    use crate::services::classifier::tests::FixedClassifier;
    use crate::services::inference_service::tests::service_with;
    use crate::services::{ClassifyLimiter, InferenceService, MediaStore, TokenService};

    pub(crate) struct TestState {
        pub pool: web::Data<PgPool>,
        pub config: web::Data<Config>,
        pub tokens: web::Data<TokenService>,
        pub media: web::Data<MediaStore>,
        pub inference: web::Data<InferenceService>,
        pub limiter: web::Data<ClassifyLimiter>,
    }

    impl TestState {
        pub fn new() -> Self {
            Self::with_inference(service_with(Arc::new(FixedClassifier(vec![0.9, 0.1]))))
        }

        pub fn with_inference(inference: InferenceService) -> Self {
            let config = Config::for_tests();
            let pool = PgPoolOptions::new()
                .max_connections(1)
                .connect_lazy(&config.database_url)
                .unwrap();
            let media = MediaStore::new(
                config.media_root.join(uuid::Uuid::new_v4().simple().to_string()),
                &config.media_url,
            );

            Self {
                pool: web::Data::new(pool),
                tokens: web::Data::new(TokenService::from_config(&config)),
                media: web::Data::new(media),
                inference: web::Data::new(inference),
                limiter: web::Data::new(ClassifyLimiter::per_second(config.classify_rate_per_second)),
                config: web::Data::new(config),
            }
        }

        pub fn register(&self, cfg: &mut web::ServiceConfig) {
            super::extract::config(cfg);
            cfg.app_data(self.pool.clone())
                .app_data(self.config.clone())
                .app_data(self.tokens.clone())
                .app_data(self.media.clone())
                .app_data(self.inference.clone())
                .app_data(self.limiter.clone());
        }
    }
}
