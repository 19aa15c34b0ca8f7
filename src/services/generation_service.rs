// src/services/generation_service.rs
// DOCUMENTATION: Business logic for platform-specific content generation
// PURPOSE: Validate, build the instruction, call the model with retries, shape the output

use crate::errors::{GatewayError, Upstream};
use crate::models::{GenerateRequest, GenerateResponse, GenerationRequest, Platform, PlatformProfile};
use crate::services::hugging_face_client::{GenerationParameters, HuggingFaceClient};
use crate::services::retry::{run_with_retries, RetryPolicy, UpstreamFailure};
use validator::Validate;

/// Anchor appended to every instruction; the model's echo of the
/// instruction is stripped up to its first occurrence.
pub const CONTENT_MARKER: &str = "Content:";

const ELLIPSIS: &str = "...";

pub struct GenerationService;

impl GenerationService {
    /// Turn the wire request into a validated one
    /// DOCUMENTATION: Runs before any upstream work; failures are never retried
    pub fn validate(req: GenerateRequest) -> Result<GenerationRequest, GatewayError> {
        if req.validate().is_err() {
            return Err(GatewayError::InvalidRequest(
                "Prompt and platform are required".to_string(),
            ));
        }

        let platform = req
            .platform
            .parse::<Platform>()
            .map_err(|_| GatewayError::InvalidRequest("Invalid platform specified".to_string()))?;

        Ok(GenerationRequest {
            prompt: req.prompt,
            platform,
        })
    }

    /// Outbound instruction: `"<prefix> <prompt>\n\nContent:"`
    pub fn build_instruction(profile: &PlatformProfile, prompt: &str) -> String {
        format!(
            "{} {}\n\n{}",
            profile.instruction_prefix, prompt, CONTENT_MARKER
        )
    }

    /// Strip the echoed instruction from a completion
    /// DOCUMENTATION: Keeps everything after the first marker, trimmed.
    /// Without a marker, or with nothing after it, the trimmed raw completion is kept;
    /// a completion that only echoes the instruction therefore reaches the caller
    /// as the instruction text itself.
    pub fn shape_completion(raw: &str) -> String {
        match raw.split_once(CONTENT_MARKER) {
            Some((_, after)) if !after.trim().is_empty() => after.trim().to_string(),
            _ => raw.trim().to_string(),
        }
    }

    /// Cap `text` at `max_length` characters, marking truncation with "..."
    pub fn enforce_length(text: String, max_length: usize) -> String {
        if text.chars().count() <= max_length {
            return text;
        }

        let keep = max_length.saturating_sub(ELLIPSIS.len());
        let mut truncated: String = text.chars().take(keep).collect();
        truncated.push_str(&ELLIPSIS[..max_length.min(ELLIPSIS.len())]);
        truncated
    }

    /// Generate platform-compliant content
    /// DOCUMENTATION: Main entry point used by POST /api/generate
    ///
    /// Process:
    /// 1. Validate prompt and platform
    /// 2. Build the platform instruction
    /// 3. Call the model, retrying transient failures per `policy`
    /// 4. Shape and length-limit the completion
    ///
    /// Cancellation is best-effort with no upstream rollback: dropping the
    /// future abandons the in-flight call or pending retry delay, but the
    /// provider may still finish work it already received.
    pub async fn generate(
        client: &HuggingFaceClient,
        policy: &RetryPolicy,
        req: GenerateRequest,
    ) -> Result<GenerateResponse, GatewayError> {
        let request = Self::validate(req)?;
        let profile = request.platform.profile();
        let instruction = Self::build_instruction(&profile, &request.prompt);
        let parameters = GenerationParameters::for_max_length(profile.max_length);

        log::info!(
            "Generating {} content (prompt_chars={})",
            request.platform,
            request.prompt.chars().count()
        );

        let instruction = instruction.as_str();
        let parameters = &parameters;
        let shaped = run_with_retries(policy, "Text generation", |_| async move {
            let raw = client.generate(instruction, parameters).await?;
            let shaped = Self::shape_completion(&raw);
            if shaped.is_empty() {
                return Err(UpstreamFailure::Transient("empty completion".to_string()));
            }
            Ok(shaped)
        })
        .await
        .map_err(|failure| match failure {
            UpstreamFailure::Transient(reason) => {
                log::error!(
                    "Text generation unavailable after {} attempts: {}",
                    policy.max_attempts,
                    reason
                );
                GatewayError::UpstreamUnavailable(Upstream::TextGeneration)
            }
            UpstreamFailure::Rejected(reason) => {
                log::error!("Text generation rejected by upstream: {}", reason);
                GatewayError::UpstreamRejected(Upstream::TextGeneration)
            }
        })?;

        Ok(GenerateResponse {
            content: Self::enforce_length(shaped, profile.max_length),
        })
    }
}
