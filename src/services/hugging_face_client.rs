// src/services/hugging_face_client.rs
// DOCUMENTATION: Hugging Face inference API client
// PURPOSE: Send one text-generation request and classify its failures

use crate::services::retry::UpstreamFailure;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Upper bound on generated tokens, independent of the platform's character limit
pub const MAX_NEW_TOKENS_CAP: usize = 200;

/// Hugging Face inference client
/// DOCUMENTATION: Holds the bearer token and model endpoint; one instance is
/// shared by all requests.
pub struct HuggingFaceClient {
    /// HTTP client for making requests
    client: Client,
    /// Inference API token
    api_key: String,
    /// Full URL of the model endpoint
    model_url: String,
}

/// Sampling parameters sent with every generation request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: usize,
    pub temperature: f32,
    pub top_p: f32,
    pub do_sample: bool,
}

impl GenerationParameters {
    /// Parameters for content capped at `max_length` characters
    pub fn for_max_length(max_length: usize) -> Self {
        Self {
            max_new_tokens: max_length.min(MAX_NEW_TOKENS_CAP),
            temperature: 0.7,
            top_p: 0.9,
            do_sample: true,
        }
    }
}

/// Request body accepted by the inference API
#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a GenerationParameters,
}

/// One entry of the inference API's response array
#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

impl HuggingFaceClient {
    /// Create new inference client
    /// DOCUMENTATION: `timeout` bounds each individual attempt
    pub fn new(api_key: String, model_url: String, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_key,
            model_url,
        })
    }

    /// Run one text-generation call
    ///
    /// # Arguments
    /// * `inputs` - full instruction sent to the model
    /// * `parameters` - sampling parameters
    ///
    /// # Returns
    /// The first generated text, exactly as the model returned it
    pub async fn generate(
        &self,
        inputs: &str,
        parameters: &GenerationParameters,
    ) -> Result<String, UpstreamFailure> {
        if self.api_key.is_empty() {
            return Err(UpstreamFailure::Rejected(
                "HUGGING_FACE_API_KEY is not configured".to_string(),
            ));
        }

        log::debug!(
            "Text generation request: max_new_tokens={}, input_chars={}",
            parameters.max_new_tokens,
            inputs.chars().count()
        );

        let response = self
            .client
            .post(&self.model_url)
            .bearer_auth(&self.api_key)
            .json(&InferenceRequest { inputs, parameters })
            .send()
            .await
            .map_err(|e| UpstreamFailure::from_transport(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamFailure::from_status(status));
        }

        let generated: Vec<GeneratedText> = response
            .json()
            .await
            .map_err(|e| UpstreamFailure::from_transport(&e))?;

        generated
            .into_iter()
            .next()
            .map(|entry| entry.generated_text)
            .ok_or_else(|| UpstreamFailure::Rejected("empty generation array".to_string()))
    }
}
