// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides fake generation and video providers plus seeded resource builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `fitbot`

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use fitbot::{
    config::environment::ServerConfig,
    errors::{AppError, AppResult},
    external::{ExternalClient, VideoCandidate, VideoSearchProvider},
    knowledge::KnowledgeBase,
    llm::{ChatRequest, ChatResponse, LlmProvider},
    resources::{ServerResources, ServerResourcesBuilder},
    router::MessageRouter,
    utils::RandomSource,
};

/// Seed used by every test that needs repeatable randomness
pub const TEST_SEED: u64 = 0x00F1_7B07;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

// ============================================================================
// Fake LLM provider
// ============================================================================

/// What the fake generation backend answers with
#[derive(Debug, Clone)]
pub enum FakeReply {
    /// Successful completion with this text
    Text(String),
    /// Upstream failure
    Failure,
}

/// Generation backend that records every request
pub struct FakeLlm {
    reply: FakeReply,
    calls: AtomicUsize,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeLlm {
    /// Always answers with `text`
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: FakeReply::Text(text.to_owned()),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Always fails
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            reply: FakeReply::Failure,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Number of completions requested
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Requests received so far
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Prompt text of the most recent request
    pub fn last_prompt(&self) -> Option<String> {
        self.requests
            .lock()
            .unwrap()
            .last()
            .map(|r| r.prompt.clone())
    }
}

#[async_trait]
impl LlmProvider for FakeLlm {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        match &self.reply {
            FakeReply::Text(text) => Ok(ChatResponse {
                content: text.clone(),
            }),
            FakeReply::Failure => Err(AppError::external_service("Fake", "upstream down")),
        }
    }
}

// ============================================================================
// Fake video search provider
// ============================================================================

/// Video search backend that records every query
pub struct FakeVideoSearch {
    results: Option<Vec<VideoCandidate>>,
    queries: Mutex<Vec<(String, u32)>>,
}

impl FakeVideoSearch {
    /// Returns these candidates for every query
    pub fn with_results(results: Vec<VideoCandidate>) -> Arc<Self> {
        Arc::new(Self {
            results: Some(results),
            queries: Mutex::new(Vec::new()),
        })
    }

    /// Returns no candidates
    pub fn empty() -> Arc<Self> {
        Self::with_results(Vec::new())
    }

    /// Fails every query
    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            results: None,
            queries: Mutex::new(Vec::new()),
        })
    }

    /// Number of searches made
    pub fn calls(&self) -> usize {
        self.queries.lock().unwrap().len()
    }

    /// Queries received so far with their result caps
    pub fn queries(&self) -> Vec<(String, u32)> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl VideoSearchProvider for FakeVideoSearch {
    async fn search(&self, query: &str, max_results: u32) -> AppResult<Vec<VideoCandidate>> {
        self.queries
            .lock()
            .unwrap()
            .push((query.to_owned(), max_results));
        self.results
            .clone()
            .ok_or_else(|| AppError::external_service("Fake video", "search failed"))
    }
}

/// Candidate with the given id and title
pub fn candidate(video_id: &str, title: &str) -> VideoCandidate {
    VideoCandidate {
        video_id: video_id.to_owned(),
        title: title.to_owned(),
    }
}

/// Three distinct squat videos
pub fn squat_candidates() -> Vec<VideoCandidate> {
    vec![
        candidate("vid_a", "Perfect Squat Form"),
        candidate("vid_b", "Squat kaise kare"),
        candidate("vid_c", "Squats &amp; Knees: Common Mistakes"),
    ]
}

// ============================================================================
// Builders
// ============================================================================

/// Configuration with only the required key set
pub fn test_config() -> ServerConfig {
    test_config_with(&[])
}

/// Configuration with the required key plus extra variables
pub fn test_config_with(vars: &[(&str, &str)]) -> ServerConfig {
    let mut map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    map.entry("GEMINI_API_KEY".to_owned())
        .or_insert_with(|| "test-gemini-key".to_owned());
    ServerConfig::from_lookup(|key| map.get(key).cloned()).expect("test config")
}

/// Seeded random source
pub fn seeded_rng() -> Arc<RandomSource> {
    Arc::new(RandomSource::seeded(TEST_SEED))
}

/// Embedded knowledge base
pub fn knowledge() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::embedded().expect("embedded knowledge base"))
}

/// External adapter over fakes
pub fn external_client(
    llm: Arc<FakeLlm>,
    video: Option<Arc<FakeVideoSearch>>,
    rng: Arc<RandomSource>,
) -> Arc<ExternalClient> {
    let mut client = ExternalClient::new(llm, rng);
    if let Some(video) = video {
        client = client.with_video_provider(video, 5);
    }
    Arc::new(client)
}

/// Router over fakes with the default rule table
pub fn message_router(llm: Arc<FakeLlm>, video: Option<Arc<FakeVideoSearch>>) -> MessageRouter {
    init_test_logging();
    let rng = seeded_rng();
    let external = external_client(llm, video, Arc::clone(&rng));
    MessageRouter::new(knowledge(), external, rng, &test_config().router)
}

/// Full server resources over fakes
pub fn server_resources(
    llm: Arc<FakeLlm>,
    video: Option<Arc<FakeVideoSearch>>,
) -> Arc<ServerResources> {
    init_test_logging();
    let mut builder = ServerResourcesBuilder::new(test_config())
        .llm(llm)
        .rng(seeded_rng());
    if let Some(video) = video {
        builder = builder.video(video);
    }
    Arc::new(builder.build().expect("server resources"))
}
