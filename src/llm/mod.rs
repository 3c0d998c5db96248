// ABOUTME: LLM provider abstraction layer for pluggable text generation
// ABOUTME: Defines the provider contract plus message and request types, with inline image support
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! # LLM Provider Interface
//!
//! This module defines the contract a text-generation backend implements to
//! serve FitBot's fallback path. Gemini is the production implementation;
//! tests plug in scripted fakes.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitbot::llm::{ChatRequest, LlmProvider};
//!
//! async fn example(provider: &dyn LlmProvider) {
//!     let request = ChatRequest::new("What's a good warm-up routine?");
//!     let response = provider.complete(&request).await;
//! }
//! ```

mod gemini;
pub mod prompts;

pub use gemini::GeminiProvider;
pub use prompts::get_fitbot_system_prompt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Binary image content sent alongside the prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// MIME type, e.g. `image/jpeg`
    pub mime_type: String,
    /// Raw decoded bytes
    pub data: Vec<u8>,
}

/// A single-turn generation request: one user prompt plus optional images
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Full prompt text, persona and history included
    pub prompt: String,
    /// Inline images attached to the prompt
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<InlineImage>,
}

impl ChatRequest {
    /// Create a text-only request
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            images: Vec::new(),
        }
    }

    /// Attach an inline image
    #[must_use]
    pub fn with_image(mut self, image: InlineImage) -> Self {
        self.images.push(image);
        self
    }
}

/// Response from a chat completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Generated text, empty when the provider returned no text part
    pub content: String,
}

// ============================================================================
// Provider Trait
// ============================================================================

/// LLM provider trait for chat completion
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Unique provider identifier (e.g., "gemini")
    fn name(&self) -> &'static str;

    /// Perform a chat completion
    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_images_skipped_when_empty() {
        let json = serde_json::to_value(ChatRequest::new("hi")).unwrap();
        assert!(json.get("images").is_none());

        let with_image = ChatRequest::new("hi").with_image(InlineImage {
            mime_type: "image/png".to_owned(),
            data: vec![1, 2, 3],
        });
        assert_eq!(with_image.images.len(), 1);
        assert_eq!(with_image.prompt, "hi");
    }
}
