// src/handlers/mod.rs
// DOCUMENTATION: Handlers module organization
// PURPOSE: Re-export handler components, the /api scope, and shared extractor settings

pub mod generate;
pub mod health;
pub mod images;

use crate::errors::GatewayError;
use crate::services::IpRateLimiter;
use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse};
use actix_web::error::JsonPayloadError;
use actix_web::web;
use std::future::Future;
use std::sync::Arc;

pub use health::config as health_config;

/// Largest accepted JSON body
pub const JSON_BODY_LIMIT: usize = 100 * 1024;

/// Configuration for every /api route
/// DOCUMENTATION: The per-IP limit runs before any extractor, so requests
/// that fail body or query parsing still spend budget.
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .wrap_fn(rate_limit_guard)
            .configure(generate::config)
            .configure(images::config),
    );
}

/// Reject the request with 429 once the peer's budget is spent
fn rate_limit_guard<S, B>(
    req: ServiceRequest,
    srv: &S,
) -> impl Future<Output = Result<ServiceResponse<EitherBody<B>>, actix_web::Error>>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
{
    let verdict = match req.app_data::<web::Data<Arc<IpRateLimiter>>>() {
        Some(limiter) => limiter.check_request(req.request()),
        None => Ok(()),
    };

    let outcome = match verdict {
        Ok(()) => Ok(srv.call(req)),
        Err(err) => Err(req.error_response(err)),
    };

    async move {
        match outcome {
            Ok(fut) => fut.await.map(ServiceResponse::map_into_left_body),
            Err(resp) => Ok(resp.map_into_right_body()),
        }
    }
}

/// JSON body extractor settings
/// Malformed bodies become `{"error": ...}` 400 responses like every other client fault
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err, _req| {
            log::debug!("Rejected request body: {}", err);
            let message = match err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    "Request body too large"
                }
                _ => "Invalid JSON body",
            };
            GatewayError::InvalidRequest(message.to_string()).into()
        })
}

/// Query string extractor settings
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected query string: {}", err);
        GatewayError::InvalidRequest("Invalid query parameters".to_string()).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::{HuggingFaceClient, RetryPolicy, UnsplashClient};
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value};
    use std::time::Duration;

    #[actix_web::test]
    async fn test_malformed_requests_spend_rate_limit_budget() {
        let limiter = Arc::new(IpRateLimiter::new(1, Duration::from_secs(900)));
        let generation_client = HuggingFaceClient::new(
            "hf_test".to_string(),
            "http://127.0.0.1:9/models/unused".to_string(),
            Duration::from_secs(1),
        )
        .unwrap();
        let image_client = UnsplashClient::new(
            "access".to_string(),
            "http://127.0.0.1:9".to_string(),
            None,
            Duration::from_secs(1),
        )
        .unwrap();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(limiter))
                .app_data(web::Data::new(generation_client))
                .app_data(web::Data::new(image_client))
                .app_data(web::Data::new(RetryPolicy::new(1, Duration::ZERO)))
                .app_data(json_config())
                .app_data(query_config())
                .configure(api_config),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/generate")
            .peer_addr("10.9.9.9:4000".parse().unwrap())
            .insert_header(("content-type", "application/json"))
            .set_payload("{bad")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        for uri in ["/api/generate", "/api/images/search?query=cats&page=abc"] {
            let req = if uri == "/api/generate" {
                test::TestRequest::post()
                    .uri(uri)
                    .peer_addr("10.9.9.9:4001".parse().unwrap())
                    .set_json(json!({ "prompt": "x", "platform": "twitter" }))
                    .to_request()
            } else {
                test::TestRequest::get()
                    .uri(uri)
                    .peer_addr("10.9.9.9:4002".parse().unwrap())
                    .to_request()
            };
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(
                body,
                json!({ "error": "Too many requests from this IP, please try again later." })
            );
        }
    }

    #[actix_web::test]
    async fn test_health_is_outside_rate_limit() {
        let limiter = Arc::new(IpRateLimiter::new(1, Duration::from_secs(900)));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(limiter))
                .configure(health_config)
                .configure(api_config),
        )
        .await;

        for _ in 0..3 {
            let req = test::TestRequest::get()
                .uri("/health")
                .peer_addr("10.9.9.9:4000".parse().unwrap())
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }
    }
}
