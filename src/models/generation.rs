// src/models/generation.rs
// DOCUMENTATION: Request/response models for content generation
// PURPOSE: Wire DTOs for POST /api/generate and the validated request they become

use crate::models::Platform;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Body of POST /api/generate
/// Missing fields deserialize as empty strings so they fail validation
/// instead of failing JSON extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct GenerateRequest {
    /// Free-text topic to write about
    #[serde(default)]
    #[validate(custom = "not_blank")]
    pub prompt: String,

    /// Platform key ("twitter", "linkedin", "instagram")
    #[serde(default)]
    #[validate(length(min = 1))]
    pub platform: String,
}

/// Validated generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub platform: Platform,
}

/// Response of POST /api/generate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub content: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
