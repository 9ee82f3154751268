// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, database, model, and start HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use config::Config;
use dotenv::dotenv;
use services::{ClassifyLimiter, InferenceService, MediaStore, TokenService};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            config::DEFAULT_LOG_LEVEL
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting placelens...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Initialize database connection pool
    let pool = match config::init_db_pool(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    // 5. Load the classifier and label table once for every worker
    let inference = match InferenceService::from_config(&config) {
        Ok(service) => service,
        Err(e) => {
            log::error!("Failed to load classifier: {:#}", e);
            std::process::exit(1);
        }
    };
    log::info!("Loaded {} place categories", inference.labels().len());

    // 6. Media storage, tokens and classification throttle
    let media = MediaStore::new(&config.media_root, &config.media_url);
    if let Err(e) = media.ensure_root().await {
        log::error!("Media root unavailable: {}", e);
        std::process::exit(1);
    }
    log::info!("Serving media from {}", media.root().display());

    let tokens = TokenService::from_config(&config);
    let limiter = ClassifyLimiter::per_second(config.classify_rate_per_second);
    log::info!(
        "Classification limited to {} requests/second",
        config.classify_rate_per_second
    );

    // 7. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    let pool = web::Data::new(pool);
    let config = web::Data::new(config);
    let inference = web::Data::new(inference);
    let media = web::Data::new(media);
    let tokens = web::Data::new(tokens);
    let limiter = web::Data::new(limiter);

    HttpServer::new(move || {
        App::new()
            // Application state shared by every worker
            .app_data(pool.clone())
            .app_data(config.clone())
            .app_data(inference.clone())
            .app_data(media.clone())
            .app_data(tokens.clone())
            .app_data(limiter.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Extractor errors share the JSON error body
            .configure(handlers::extract_config)
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::users_config)
            .configure(handlers::classification_config)
            .configure(handlers::history_config)
            .configure(handlers::reviews_config)
            .configure(handlers::likes_config)
            .configure(handlers::media_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
