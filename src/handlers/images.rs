// src/handlers/images.rs
// DOCUMENTATION: HTTP handler for photo search
// PURPOSE: Parse query string, call ImageSearchService

use crate::errors::GatewayError;
use crate::models::ImageSearchParams;
use crate::services::{ImageSearchService, UnsplashClient};
use actix_web::{web, HttpResponse, Responder};

/// GET /api/images/search?query=...&page=...
/// Search one page of stock photos
pub async fn search_images(
    client: web::Data<UnsplashClient>,
    query: web::Query<ImageSearchParams>,
) -> Result<impl Responder, GatewayError> {
    let page = ImageSearchService::search(client.get_ref(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(page))
}

/// Configuration for image routes (mounted under /api)
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/images/search", web::get().to(search_images));
}
