// src/handlers/generate.rs
// DOCUMENTATION: HTTP handler for content generation
// PURPOSE: Parse request, call GenerationService

use crate::errors::GatewayError;
use crate::models::GenerateRequest;
use crate::services::{GenerationService, HuggingFaceClient, RetryPolicy};
use actix_web::{web, HttpResponse, Responder};

/// POST /api/generate
/// Generate platform-specific copy for a prompt
pub async fn generate_content(
    client: web::Data<HuggingFaceClient>,
    policy: web::Data<RetryPolicy>,
    body: web::Json<GenerateRequest>,
) -> Result<impl Responder, GatewayError> {
    let response =
        GenerationService::generate(client.get_ref(), policy.get_ref(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Configuration for generation routes (mounted under /api)
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate", web::post().to(generate_content));
}
