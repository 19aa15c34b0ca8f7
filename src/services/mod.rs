// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod generation_service;
pub mod hugging_face_client;
pub mod image_search_service;
pub mod rate_limit;
pub mod retry;
pub mod unsplash_client;

pub use generation_service::*;
pub use hugging_face_client::*;
pub use image_search_service::*;
pub use rate_limit::*;
pub use retry::*;
pub use unsplash_client::*;
