// ABOUTME: YouTube Data API v3 search client for exercise video suggestions
// ABOUTME: Returns raw candidate videos; selection and formatting happen in the adapter
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! YouTube Data API client
//!
//! Only the `search` endpoint is used:
//! `GET {base}/search?part=snippet&type=video&q=…&maxResults=…&key=…`.
//! Items without a video id (channels, playlists) are dropped.

use std::fmt;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::environment::YouTubeConfig;
use crate::errors::{AppError, AppResult};
use crate::utils::http_client::create_client_with_timeout;

/// Service name used in error messages
const SERVICE: &str = "YouTube API";

/// A candidate video returned by a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCandidate {
    /// YouTube video id
    pub video_id: String,
    /// Title as returned by the API (may contain HTML entities)
    pub title: String,
}

/// Source of candidate videos for a free-text query
#[async_trait]
pub trait VideoSearchProvider: Send + Sync {
    /// Search for up to `max_results` videos
    async fn search(&self, query: &str, max_results: u32) -> AppResult<Vec<VideoCandidate>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: Option<SearchItemId>,
    snippet: Option<Snippet>,
}

#[derive(Debug, Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Snippet {
    title: Option<String>,
}

impl SearchItem {
    fn into_candidate(self) -> Option<VideoCandidate> {
        let video_id = self.id?.video_id.filter(|id| !id.is_empty())?;
        let title = self.snippet.and_then(|s| s.title).unwrap_or_default();
        Some(VideoCandidate { video_id, title })
    }
}

/// YouTube search client
#[derive(Clone)]
pub struct YouTubeClient {
    api_key: String,
    base_url: String,
    http_client: Client,
}

impl YouTubeClient {
    /// Create a client from configuration
    #[must_use]
    pub fn new(config: &YouTubeConfig, timeout_secs: u64) -> Self {
        Self {
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            http_client: create_client_with_timeout(timeout_secs),
        }
    }

    fn parse_search_body(body: &str) -> AppResult<Vec<VideoCandidate>> {
        let parsed: SearchResponse = serde_json::from_str(body).map_err(|e| {
            AppError::external_service(SERVICE, format!("JSON parse error: {e}"))
        })?;
        Ok(parsed
            .items
            .into_iter()
            .filter_map(SearchItem::into_candidate)
            .collect())
    }
}

#[async_trait]
impl VideoSearchProvider for YouTubeClient {
    #[instrument(skip(self), fields(service = "youtube"))]
    async fn search(&self, query: &str, max_results: u32) -> AppResult<Vec<VideoCandidate>> {
        if query.trim().is_empty() {
            return Err(AppError::invalid_input("Search query cannot be empty"));
        }

        let url = format!("{}/search", self.base_url);
        let max_results = max_results.to_string();
        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("q", query),
                ("maxResults", max_results.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(AppError::external_service(
                SERVICE,
                format!("HTTP {status}: {body}"),
            ));
        }

        let candidates = Self::parse_search_body(&body)?;
        debug!(count = candidates.len(), "YouTube search returned candidates");
        Ok(candidates)
    }
}

impl fmt::Debug for YouTubeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeClient")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_body_extracts_videos() {
        let body = r#"{
            "items": [
                {"id": {"kind": "youtube#video", "videoId": "abc123"}, "snippet": {"title": "Squat Form"}},
                {"id": {"kind": "youtube#channel", "channelId": "chan"}, "snippet": {"title": "A Channel"}},
                {"id": {"videoId": "def456"}}
            ]
        }"#;
        let candidates = YouTubeClient::parse_search_body(body).unwrap();
        assert_eq!(
            candidates,
            vec![
                VideoCandidate {
                    video_id: "abc123".into(),
                    title: "Squat Form".into()
                },
                VideoCandidate {
                    video_id: "def456".into(),
                    title: String::new()
                },
            ]
        );
    }

    #[test]
    fn test_parse_search_body_without_items() {
        assert!(YouTubeClient::parse_search_body("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_search_body_rejects_garbage() {
        assert!(YouTubeClient::parse_search_body("<html>").is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let client = YouTubeClient::new(
            &YouTubeConfig {
                api_key: "secret-key".into(),
                base_url: "https://example.test/".into(),
                max_results: 5,
            },
            5,
        );
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("https://example.test\""));
    }
}
