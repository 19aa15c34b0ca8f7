// src/services/unsplash_client.rs
// DOCUMENTATION: Unsplash photo search API client
// PURPOSE: Fetch one page of search results and project records to ImageDescriptor

use crate::models::ImageDescriptor;
use crate::services::retry::UpstreamFailure;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Unsplash API client
/// DOCUMENTATION: The access key stays server-side; callers only ever see
/// projected descriptors.
pub struct UnsplashClient {
    /// HTTP client for making requests
    client: Client,
    /// Unsplash access key
    access_key: String,
    /// Base URL for the Unsplash API
    base_url: String,
    /// Orientation filter applied to every search (None = any)
    orientation: Option<String>,
}

/// Response from Unsplash /search/photos
#[derive(Debug, Deserialize)]
pub struct UnsplashSearchResponse {
    /// Total matches for the query
    #[serde(default)]
    pub total: u64,
    /// Page count as reported by Unsplash
    #[serde(default)]
    pub total_pages: u32,
    /// Photos on the requested page
    #[serde(default)]
    pub results: Vec<UnsplashPhoto>,
}

/// Individual photo record (only the fields we project)
#[derive(Debug, Clone, Deserialize)]
pub struct UnsplashPhoto {
    pub id: String,
    pub urls: UnsplashUrls,
    pub alt_description: Option<String>,
    pub user: UnsplashUser,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnsplashUrls {
    pub small: String,
    pub regular: String,
}

/// Photographer credited for a photo
#[derive(Debug, Clone, Deserialize)]
pub struct UnsplashUser {
    #[serde(default)]
    pub name: String,
    pub links: UnsplashUserLinks,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnsplashUserLinks {
    /// Public profile page
    pub html: String,
}

impl UnsplashPhoto {
    /// Convert raw record into the caller-facing descriptor
    pub fn into_descriptor(self) -> ImageDescriptor {
        ImageDescriptor {
            id: self.id,
            thumbnail_url: self.urls.small,
            full_url: self.urls.regular,
            alt_text: self.alt_description.filter(|alt| !alt.trim().is_empty()),
            attribution_name: self.user.name,
            attribution_url: self.user.links.html,
        }
    }
}

impl UnsplashClient {
    /// Create new Unsplash client
    /// DOCUMENTATION: `orientation` is fixed per deployment
    pub fn new(
        access_key: String,
        base_url: String,
        orientation: Option<String>,
        timeout: Duration,
    ) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            access_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            orientation,
        })
    }

    /// Search photos by keyword
    ///
    /// # Arguments
    /// * `query` - keyword search
    /// * `page` - 1-based page number
    /// * `per_page` - page size
    pub async fn search_photos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<UnsplashSearchResponse, UpstreamFailure> {
        if self.access_key.is_empty() {
            return Err(UpstreamFailure::Rejected(
                "UNSPLASH_ACCESS_KEY is not configured".to_string(),
            ));
        }

        let url = format!("{}/search/photos", self.base_url);

        let mut params = vec![
            ("query", query.to_string()),
            ("page", page.to_string()),
            ("per_page", per_page.to_string()),
        ];
        if let Some(orientation) = &self.orientation {
            params.push(("orientation", orientation.clone()));
        }

        log::debug!("Unsplash photo search: page={}, per_page={}", page, per_page);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header("Authorization", format!("Client-ID {}", self.access_key))
            .header("Accept-Version", "v1")
            .send()
            .await
            .map_err(|e| UpstreamFailure::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFailure::from_status(status));
        }

        let api_response: UnsplashSearchResponse = response
            .json()
            .await
            .map_err(|e| UpstreamFailure::from_transport(&e))?;

        log::debug!(
            "Unsplash search returned {} results ({} total)",
            api_response.results.len(),
            api_response.total
        );

        Ok(api_response)
    }
}
