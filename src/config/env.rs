// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate gateway configuration from .env files

use dotenv::dotenv;
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Default Hugging Face inference endpoint used for text generation
pub const DEFAULT_GENERATION_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/HuggingFaceH4/zephyr-7b-beta";

/// Default Unsplash API base URL used for photo search
pub const DEFAULT_IMAGE_SEARCH_URL: &str = "https://api.unsplash.com";

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Clone)]
pub struct Config {
    /// Server bind address (e.g., "127.0.0.1")
    pub server_address: String,

    /// Server listen port (default 3001)
    pub server_port: u16,

    /// Environment: development, staging, production
    pub environment: String,

    /// Log level: debug, info, warn, error
    pub log_level: String,

    /// Hugging Face inference API token
    pub hugging_face_api_key: String,

    /// Unsplash access key
    pub unsplash_access_key: String,

    /// Full URL of the text-generation model endpoint
    pub generation_model_url: String,

    /// Base URL of the photo-search API
    pub image_search_url: String,

    /// Orientation filter sent with every photo search (None disables it)
    pub image_orientation: Option<String>,

    /// Total upstream attempts per generation request
    pub generation_max_attempts: u32,

    /// Fixed delay between generation attempts, in milliseconds
    pub generation_retry_delay_ms: u64,

    /// Per-attempt timeout for upstream HTTP calls, in seconds
    pub upstream_timeout_secs: u64,

    /// Requests allowed per client IP within one window
    pub rate_limit_max_requests: u32,

    /// Rate limit window length in seconds
    pub rate_limit_window_secs: u64,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        Config {
            server_address: env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1".to_string()),

            server_port: parse_or("PORT", 3001),

            environment: env::var("ENVIRONMENT")
                .or_else(|_| env::var("NODE_ENV"))
                .unwrap_or_else(|_| "development".to_string()),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),

            hugging_face_api_key: env::var("HUGGING_FACE_API_KEY").unwrap_or_default(),

            unsplash_access_key: env::var("UNSPLASH_ACCESS_KEY").unwrap_or_default(),

            generation_model_url: env::var("GENERATION_MODEL_URL")
                .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL_URL.to_string()),

            image_search_url: env::var("IMAGE_SEARCH_URL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_SEARCH_URL.to_string()),

            image_orientation: match env::var("IMAGE_ORIENTATION") {
                Ok(value) if value.trim().is_empty() => None,
                Ok(value) => Some(value.trim().to_string()),
                Err(_) => Some("landscape".to_string()),
            },

            generation_max_attempts: parse_or("GENERATION_MAX_ATTEMPTS", 3),

            generation_retry_delay_ms: parse_or("GENERATION_RETRY_DELAY_MS", 2000),

            upstream_timeout_secs: parse_or("UPSTREAM_TIMEOUT_SECS", 30),

            rate_limit_max_requests: parse_or("RATE_LIMIT_MAX_REQUESTS", 100),

            rate_limit_window_secs: parse_or("RATE_LIMIT_WINDOW_SECS", 900),
        }
    }

    /// Per-attempt upstream timeout
    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures application can start safely.
    /// Missing credentials only warn; the affected endpoint fails per request.
    pub fn validate(&self) -> Result<(), String> {
        if self.generation_max_attempts == 0 {
            return Err("GENERATION_MAX_ATTEMPTS must be at least 1".to_string());
        }

        if self.rate_limit_max_requests == 0 || self.rate_limit_window_secs == 0 {
            return Err(
                "RATE_LIMIT_MAX_REQUESTS and RATE_LIMIT_WINDOW_SECS must be positive".to_string(),
            );
        }

        if self.upstream_timeout_secs == 0 {
            return Err("UPSTREAM_TIMEOUT_SECS must be positive".to_string());
        }

        if self.hugging_face_api_key.is_empty() {
            log::warn!("HUGGING_FACE_API_KEY not configured - /api/generate will fail");
        }

        if self.unsplash_access_key.is_empty() {
            log::warn!("UNSPLASH_ACCESS_KEY not configured - /api/images/search will fail");
        }

        Ok(())
    }
}

// Credentials must never reach the logs, even through `{:?}`.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("server_address", &self.server_address)
            .field("server_port", &self.server_port)
            .field("environment", &self.environment)
            .field("log_level", &self.log_level)
            .field("hugging_face_api_key", &redact(&self.hugging_face_api_key))
            .field("unsplash_access_key", &redact(&self.unsplash_access_key))
            .field("generation_model_url", &self.generation_model_url)
            .field("image_search_url", &self.image_search_url)
            .field("image_orientation", &self.image_orientation)
            .field("generation_max_attempts", &self.generation_max_attempts)
            .field("generation_retry_delay_ms", &self.generation_retry_delay_ms)
            .field("upstream_timeout_secs", &self.upstream_timeout_secs)
            .field("rate_limit_max_requests", &self.rate_limit_max_requests)
            .field("rate_limit_window_secs", &self.rate_limit_window_secs)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

fn parse_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
