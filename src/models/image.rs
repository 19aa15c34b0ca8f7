// src/models/image.rs
// DOCUMENTATION: Image search models and caller-side pagination state
// PURPOSE: Projected photo descriptors, per-page results, and "load more" accumulation

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use validator::Validate;

/// Fixed number of images requested per search page
pub const IMAGES_PER_PAGE: u32 = 12;

/// Number of pages needed to hold `total_matches` results
pub fn total_pages_for(total_matches: u64) -> u32 {
    let pages = total_matches.div_ceil(u64::from(IMAGES_PER_PAGE));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Query string of GET /api/images/search
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ImageSearchParams {
    /// Keyword(s) to search for
    #[serde(default)]
    pub query: String,

    /// 1-based page number (defaults to 1)
    #[validate(range(min = 1))]
    pub page: Option<u32>,
}

/// Projected view of an upstream photo record
/// DOCUMENTATION: Only the fields a caller needs to display and attribute a photo.
/// Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    pub id: String,
    pub thumbnail_url: String,
    pub full_url: String,
    pub alt_text: Option<String>,
    pub attribution_name: String,
    pub attribution_url: String,
}

/// One page of image search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPage {
    pub images: Vec<ImageDescriptor>,
    /// Total matches across all pages
    #[serde(rename = "total")]
    pub total_matches: u64,
    pub total_pages: u32,
    #[serde(rename = "page")]
    pub page_number: u32,
}

impl SearchPage {
    /// Whether a page after this one exists
    pub fn has_more(&self) -> bool {
        self.page_number < self.total_pages
    }
}

/// Caller-held accumulation state for "load more" browsing
/// DOCUMENTATION: Created on the first search for a query, advanced page by page,
/// and reset whenever the query text changes.
#[derive(Debug, Clone)]
pub struct PaginationCursor {
    query: String,
    current_page: u32,
    images: Vec<ImageDescriptor>,
    seen_ids: HashSet<String>,
    has_more: bool,
}

impl PaginationCursor {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            current_page: 0,
            images: Vec::new(),
            seen_ids: HashSet::new(),
            has_more: true,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Last page absorbed (0 before the first page arrives)
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn images(&self) -> &[ImageDescriptor] {
        &self.images
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Page number to request next, or None once paging must stop
    pub fn next_page(&self) -> Option<u32> {
        self.has_more.then(|| self.current_page + 1)
    }

    /// Append a fetched page, skipping photos already accumulated.
    /// Returns the number of newly added images.
    pub fn absorb(&mut self, page: SearchPage) -> usize {
        let has_more = page.has_more();
        self.current_page = page.page_number;

        let before = self.images.len();
        for image in page.images {
            if self.seen_ids.insert(image.id.clone()) {
                self.images.push(image);
            }
        }

        self.has_more = has_more;
        self.images.len() - before
    }

    /// Start over for a new query. Same-query resets also clear accumulated results.
    pub fn reset(&mut self, query: impl Into<String>) {
        *self = Self::new(query);
    }
}
