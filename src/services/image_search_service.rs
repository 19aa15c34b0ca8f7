// src/services/image_search_service.rs
// DOCUMENTATION: Business logic for keyword photo search
// PURPOSE: Validate, fetch one page, and report pagination metadata

use crate::errors::{GatewayError, Upstream};
use crate::models::{total_pages_for, ImageSearchParams, SearchPage, IMAGES_PER_PAGE};
use crate::services::retry::UpstreamFailure;
use crate::services::UnsplashClient;
use validator::Validate;

/// Stateless search aggregator
/// DOCUMENTATION: Accumulating pages is the caller's job (see PaginationCursor)
pub struct ImageSearchService;

impl ImageSearchService {
    /// Search one page of photos
    /// DOCUMENTATION: Main entry point used by GET /api/images/search
    ///
    /// `total_pages` is always derived locally as ceil(total / 12); a page past
    /// the end comes back empty so callers stop paging.
    pub async fn search(
        client: &UnsplashClient,
        params: ImageSearchParams,
    ) -> Result<SearchPage, GatewayError> {
        let query = params.query.trim();
        if query.is_empty() {
            return Err(GatewayError::InvalidRequest(
                "Search query is required".to_string(),
            ));
        }

        if params.validate().is_err() {
            return Err(GatewayError::InvalidRequest(
                "Page must be a positive integer".to_string(),
            ));
        }
        let page_number = params.page.unwrap_or(1);

        let response = client
            .search_photos(query, page_number, IMAGES_PER_PAGE)
            .await
            .map_err(|failure| {
                match &failure {
                    UpstreamFailure::Transient(reason) => {
                        log::warn!("Image search unavailable: {}", reason)
                    }
                    UpstreamFailure::Rejected(reason) => {
                        log::error!("Image search rejected by upstream: {}", reason)
                    }
                }
                GatewayError::UpstreamUnavailable(Upstream::PhotoSearch)
            })?;

        let total_pages = total_pages_for(response.total);
        let images = if page_number > total_pages {
            Vec::new()
        } else {
            response
                .results
                .into_iter()
                .take(IMAGES_PER_PAGE as usize)
                .map(|photo| photo.into_descriptor())
                .collect()
        };

        log::info!(
            "Image search page {}/{} returned {} images ({} total)",
            page_number,
            total_pages,
            images.len(),
            response.total
        );

        Ok(SearchPage {
            images,
            total_matches: response.total,
            total_pages,
            page_number,
        })
    }
}
