// src/errors.rs
// DOCUMENTATION: Custom error types and HTTP responses
// PURPOSE: Centralized error handling for the gateway

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use thiserror::Error;

/// Upstream provider a failure originated from
/// DOCUMENTATION: Selects the fixed public message returned to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    TextGeneration,
    PhotoSearch,
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Upstream::TextGeneration => f.write_str("Failed to generate content"),
            Upstream::PhotoSearch => f.write_str("Failed to fetch images"),
        }
    }
}

/// Application-specific error types
/// DOCUMENTATION: Every failure crossing a handler boundary is one of these.
/// Upstream variants only name the provider so raw provider bodies and
/// credentials can never end up in a response.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    UpstreamUnavailable(Upstream),

    #[error("{0}")]
    UpstreamRejected(Upstream),

    #[error("Too many requests from this IP, please try again later.")]
    RateLimitExceeded,
}

/// Convert GatewayError to HTTP response
/// DOCUMENTATION: Maps error types to HTTP status codes and `{"error": ...}` bodies
impl ResponseError for GatewayError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            GatewayError::UpstreamRejected(_) => StatusCode::BAD_GATEWAY,
            GatewayError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}
