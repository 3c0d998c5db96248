// ABOUTME: Google Gemini LLM provider implementation for the generation fallback
// ABOUTME: Sends text and inline image parts to the generateContent endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! # Gemini Provider
//!
//! Implementation of the `LlmProvider` trait for Google's Gemini models.
//!
//! ## Configuration
//!
//! Set the `GEMINI_API_KEY` environment variable with your API key from
//! Google AI Studio. `GEMINI_MODEL` overrides the default multimodal model.
//!
//! ## Response handling
//!
//! Generated text lives several levels deep in the response
//! (`candidates[0].content.parts[0].text`). Any missing level yields an empty
//! `content` rather than an error; the caller decides what "no text" means.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::{ChatRequest, ChatResponse, LlmProvider};
use crate::config::environment::GeminiConfig;
use crate::constants::defaults;
use crate::errors::{AppError, ErrorCode};
use crate::utils::http_client::create_client_with_timeout;

// ============================================================================
// API Request/Response Types
// ============================================================================

/// Gemini API request structure
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

/// Content structure for Gemini API requests
#[derive(Debug, Serialize)]
struct GeminiContent {
    role: &'static str,
    parts: Vec<ContentPart>,
}

/// Part of request content
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ContentPart {
    /// Text content
    Text { text: String },
    /// Base64 encoded binary content
    InlineData { inline_data: InlineData },
}

/// Inline binary payload
#[derive(Debug, Serialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Gemini API response structure
#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

/// Response candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

/// Candidate content; parts are read leniently so unknown part kinds do not fail parsing
#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// API error response from Gemini
#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Google Gemini LLM provider
pub struct GeminiProvider {
    api_key: String,
    client: Client,
    model: String,
    base_url: String,
}

impl GeminiProvider {
    /// Create a new Gemini provider with an API key
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: Client::new(),
            model: defaults::GEMINI_MODEL.to_owned(),
            base_url: defaults::GEMINI_BASE_URL.to_owned(),
        }
    }

    /// Create a provider from loaded configuration
    #[must_use]
    pub fn from_config(config: &GeminiConfig, timeout_secs: u64) -> Self {
        Self {
            api_key: config.api_key.clone(),
            client: create_client_with_timeout(timeout_secs),
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Build the `generateContent` URL for the configured model
    fn build_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build a single user turn: prompt text first, then any images
    fn build_gemini_request(request: &ChatRequest) -> GeminiRequest {
        let mut parts = Vec::with_capacity(1 + request.images.len());
        if !request.prompt.is_empty() {
            parts.push(ContentPart::Text {
                text: request.prompt.clone(),
            });
        }
        parts.extend(request.images.iter().map(|image| ContentPart::InlineData {
            inline_data: InlineData {
                mime_type: image.mime_type.clone(),
                data: STANDARD.encode(&image.data),
            },
        }));
        GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts,
            }],
        }
    }

    /// Extract text content from Gemini response, empty when any level is missing
    fn extract_content(response: &GeminiResponse) -> String {
        response
            .candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.clone())
            .unwrap_or_default()
    }

    /// Map API error status to appropriate error type
    fn map_api_error(status: u16, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            429 => AppError::new(
                ErrorCode::ExternalRateLimited,
                Self::extract_quota_message(&message),
            ),
            401 | 403 => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Gemini rejected the API key ({status}): {message}"),
            ),
            _ => AppError::external_service("Gemini", format!("API error ({status}): {message}")),
        }
    }

    /// Extract a user-friendly quota/rate limit message from Gemini error
    fn extract_quota_message(message: &str) -> String {
        // Example: "Please retry in 6.406453963s."
        const RETRY_PREFIX: &str = "Please retry in ";
        if let Some(retry_pos) = message.find(RETRY_PREFIX) {
            let after_prefix = &message[retry_pos + RETRY_PREFIX.len()..];
            if let Some(s_pos) = after_prefix.find('s') {
                if let Ok(seconds) = after_prefix[..s_pos].parse::<f64>() {
                    let seconds_int = seconds.ceil() as u64;
                    return format!(
                        "AI service quota exceeded. Please try again in {seconds_int} seconds."
                    );
                }
            }
        }
        "AI service quota exceeded. Please wait a moment and try again.".to_owned()
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, request), fields(provider = "gemini"))]
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        let url = self.build_url();

        let gemini_request = Self::build_gemini_request(request);

        debug!(model = %self.model, "Sending request to Gemini API");

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&gemini_request)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status.as_u16(), &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_service("Gemini", format!("malformed response body: {e}"))
            })?;

        if let Some(error) = gemini_response.error {
            return Err(AppError::external_service("Gemini", error.message));
        }

        let content = Self::extract_content(&gemini_response);
        debug!(chars = content.len(), "Received Gemini response");

        Ok(ChatResponse { content })
    }
}

impl Debug for GeminiProvider {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiProvider")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}
