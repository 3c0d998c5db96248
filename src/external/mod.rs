// ABOUTME: External client adapter over the text-generation and video-search services
// ABOUTME: Converts every upstream failure into a user-facing sentinel or an absent suggestion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! External API clients
//!
//! [`ExternalClient`] is the only place that talks to third-party services.
//! Both operations are a single best-effort call with no retry. Generation
//! returns either the reply or a fixed sentinel to display in its place.
//! Video search returns `None` on any failure or when no video provider is
//! configured.

pub mod youtube_client;

pub use youtube_client::{VideoCandidate, VideoSearchProvider, YouTubeClient};

use std::sync::Arc;
use std::time::Instant;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::{defaults, fallback_messages};
use crate::errors::{AppError, AppResult};
use crate::llm::{ChatRequest, InlineImage, LlmProvider};
use crate::logging::AppLogger;
use crate::utils::RandomSource;

/// MIME type assumed when an image arrives without a data-URL header
pub const DEFAULT_IMAGE_MIME: &str = "image/jpeg";

/// Watch URL prefix for a video id
pub const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// Search phrasings; `{subject}` is replaced with the exercise being asked about
pub const SEARCH_TEMPLATES: &[&str] = &[
    "how to do {subject} proper form",
    "{subject} correct technique tutorial",
    "{subject} exercise guide for beginners",
    "{subject} kaise kare",
];

/// Markers that identify a Hindi-language title
const HINDI_MARKERS: &[&str] = &["hindi", "हिंदी", "kaise", "kare"];

const INDIA_FLAG: &str = "🇮🇳";
const UK_FLAG: &str = "🇬🇧";

/// A video chosen for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoSuggestion {
    /// Canonical watch URL
    pub url: String,
    /// Decoded title prefixed with a language flag
    pub title: String,
}

/// Adapter over the generation and video search services
pub struct ExternalClient {
    llm: Arc<dyn LlmProvider>,
    video: Option<Arc<dyn VideoSearchProvider>>,
    rng: Arc<RandomSource>,
    max_results: u32,
}

impl ExternalClient {
    /// Create an adapter with generation only; video search is disabled
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>, rng: Arc<RandomSource>) -> Self {
        Self {
            llm,
            video: None,
            rng,
            max_results: defaults::YOUTUBE_MAX_RESULTS,
        }
    }

    /// Enable video suggestions
    #[must_use]
    pub fn with_video_provider(
        mut self,
        video: Arc<dyn VideoSearchProvider>,
        max_results: u32,
    ) -> Self {
        self.video = Some(video);
        self.max_results = max_results.max(1);
        self
    }

    /// Whether video search is configured
    #[must_use]
    pub fn video_enabled(&self) -> bool {
        self.video.is_some()
    }

    /// Generate a reply for `user_turn`, with `context` prepended
    ///
    /// The prompt is `context + "\n" + user_turn`. An attached image is
    /// decoded and sent inline.
    ///
    /// # Errors
    ///
    /// Upstream failure, an empty reply, or an undecodable image each return
    /// the fixed sentinel to show the user in place of a reply.
    pub async fn generate_text(
        &self,
        context: &str,
        user_turn: &str,
        image: Option<&str>,
    ) -> Result<String, &'static str> {
        let mut request = ChatRequest::new(format!("{context}\n{user_turn}"));
        if let Some(raw) = image {
            match decode_image(raw) {
                Ok(inline) => request = request.with_image(inline),
                Err(e) => {
                    warn!(error = %e, "Image decode failed");
                    return Err(fallback_messages::IMAGE_UNPROCESSABLE);
                }
            }
        }

        let started = Instant::now();
        let result = self.llm.complete(&request).await;
        let elapsed = elapsed_ms(started);

        match result {
            Ok(response) => {
                AppLogger::log_external_call(self.llm.name(), "generate", true, elapsed);
                let text = response.content.trim();
                if text.is_empty() {
                    warn!(provider = self.llm.name(), "Generation returned no text");
                    Err(fallback_messages::NOT_UNDERSTOOD)
                } else {
                    Ok(text.to_owned())
                }
            }
            Err(e) => {
                AppLogger::log_external_call(self.llm.name(), "generate", false, elapsed);
                warn!(provider = self.llm.name(), error = %e, "Generation failed");
                Err(fallback_messages::NOT_UNDERSTOOD)
            }
        }
    }

    /// Find one video about `subject`
    ///
    /// The pick is uniform over the returned candidates, so repeated calls
    /// can suggest different videos.
    pub async fn search_video(&self, subject: &str) -> Option<VideoSuggestion> {
        let provider = self.video.as_ref()?;
        let query = self.search_query(subject);
        debug!(%query, "Searching for exercise video");

        let started = Instant::now();
        let result = provider.search(&query, self.max_results).await;
        let elapsed = elapsed_ms(started);

        let candidates = match result {
            Ok(candidates) => {
                AppLogger::log_external_call("youtube", "search", true, elapsed);
                candidates
            }
            Err(e) => {
                AppLogger::log_external_call("youtube", "search", false, elapsed);
                warn!(error = %e, "Video search failed");
                return None;
            }
        };

        let picked = self.rng.choose(&candidates)?;
        Some(VideoSuggestion {
            url: format!("{WATCH_URL_PREFIX}{}", picked.video_id),
            title: display_title(&picked.title),
        })
    }

    /// Render a randomly chosen phrasing for a subject
    #[must_use]
    pub fn search_query(&self, subject: &str) -> String {
        let template = self
            .rng
            .choose(SEARCH_TEMPLATES)
            .copied()
            .unwrap_or("{subject}");
        template.replace("{subject}", subject.trim())
    }
}

/// Decode an inbound image, with or without a `data:<mime>;base64,` header
///
/// # Errors
///
/// Returns `INVALID_FORMAT` if the payload is not valid base64 or decodes to
/// nothing.
pub fn decode_image(raw: &str) -> AppResult<InlineImage> {
    let (mime_type, payload) = match raw.split_once("base64,") {
        Some((header, payload)) => {
            let mime = header
                .strip_prefix("data:")
                .map(|h| h.trim_end_matches(';'))
                .filter(|m| !m.is_empty())
                .unwrap_or(DEFAULT_IMAGE_MIME);
            (mime.to_owned(), payload)
        }
        None => (DEFAULT_IMAGE_MIME.to_owned(), raw),
    };

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let data = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| AppError::invalid_format(format!("Image is not valid base64: {e}")))?;
    if data.is_empty() {
        return Err(AppError::invalid_format("Image payload is empty"));
    }
    Ok(InlineImage { mime_type, data })
}

/// Language flag for a video title
#[must_use]
pub fn language_emoji(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    let has_marker = HINDI_MARKERS.iter().any(|m| lower.contains(m));
    let has_devanagari = title.chars().any(|c| ('\u{0900}'..='\u{097F}').contains(&c));
    if has_marker || has_devanagari {
        INDIA_FLAG
    } else {
        UK_FLAG
    }
}

/// Decode HTML entities and prefix the language flag
#[must_use]
pub fn display_title(raw: &str) -> String {
    let decoded = html_escape::decode_html_entities(raw);
    format!("{} {}", language_emoji(&decoded), decoded.trim())
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
