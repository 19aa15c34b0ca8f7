// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, upstream clients, and start HTTP server

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use postcraft_gateway::config::Config;
use postcraft_gateway::handlers;
use postcraft_gateway::services::{
    start_cleanup_task, HuggingFaceClient, IpRateLimiter, RetryPolicy, UnsplashClient,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 1. Load configuration (reads .env)
    let config = Config::from_env();

    // 2. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            config.log_level.as_str()
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        std::process::exit(1);
    }

    log::info!("Starting postcraft gateway...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 3. Initialize upstream clients
    let generation_client = match HuggingFaceClient::new(
        config.hugging_face_api_key.clone(),
        config.generation_model_url.clone(),
        config.upstream_timeout(),
    ) {
        Ok(client) => web::Data::new(client),
        Err(e) => {
            log::error!("Failed to build text generation client: {}", e);
            std::process::exit(1);
        }
    };

    let image_client = match UnsplashClient::new(
        config.unsplash_access_key.clone(),
        config.image_search_url.clone(),
        config.image_orientation.clone(),
        config.upstream_timeout(),
    ) {
        Ok(client) => web::Data::new(client),
        Err(e) => {
            log::error!("Failed to build image search client: {}", e);
            std::process::exit(1);
        }
    };

    let retry_policy = web::Data::new(RetryPolicy::new(
        config.generation_max_attempts,
        Duration::from_millis(config.generation_retry_delay_ms),
    ));
    log::info!(
        "Generation retry policy: {} attempts, {}ms delay",
        config.generation_max_attempts,
        config.generation_retry_delay_ms
    );

    // 4. Initialize per-IP rate limiter
    let limiter = Arc::new(IpRateLimiter::new(
        config.rate_limit_max_requests,
        Duration::from_secs(config.rate_limit_window_secs),
    ));
    log::info!(
        "Rate limit: {} requests per {}s per IP",
        config.rate_limit_max_requests,
        config.rate_limit_window_secs
    );

    // Forget idle clients every 5 minutes
    start_cleanup_task(limiter.clone(), 300);

    // 5. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            // Application state (upstream clients, retry policy, limiter)
            .app_data(generation_client.clone())
            .app_data(image_client.clone())
            .app_data(retry_policy.clone())
            .app_data(web::Data::new(limiter.clone()))
            .app_data(handlers::json_config())
            .app_data(handlers::query_config())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::api_config)
    })
    .bind(&server_addr)?
    .run()
    .await
}
