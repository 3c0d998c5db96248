// ABOUTME: Shared server resources wired once at startup and handed to every route
// ABOUTME: Builds the knowledge base, external adapter, router, session store and chat service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! Server resources
//!
//! Everything a request handler needs lives in [`ServerResources`], created
//! once and shared through an `Arc`. Production wiring comes from
//! [`ServerResources::from_config`]; tests inject fakes through
//! [`ServerResourcesBuilder`].

use std::sync::Arc;

use crate::config::environment::ServerConfig;
use crate::errors::AppResult;
use crate::external::{ExternalClient, VideoSearchProvider, YouTubeClient};
use crate::knowledge::KnowledgeBase;
use crate::llm::{GeminiProvider, LlmProvider};
use crate::router::MessageRouter;
use crate::services::ChatService;
use crate::session::{InMemorySessionStore, SessionStore};
use crate::utils::RandomSource;

/// Shared, immutable server state
pub struct ServerResources {
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
    /// Static knowledge base
    pub knowledge: Arc<KnowledgeBase>,
    /// Third-party service adapter
    pub external: Arc<ExternalClient>,
    /// Keyword router
    pub router: Arc<MessageRouter>,
    /// Session history backend
    pub sessions: Arc<dyn SessionStore>,
    /// Chat orchestration
    pub chat: Arc<ChatService>,
}

impl ServerResources {
    /// Wire production clients from configuration
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the embedded knowledge base is invalid
    pub fn from_config(config: ServerConfig) -> AppResult<Self> {
        let timeout = config.external_timeout_secs;
        let llm: Arc<dyn LlmProvider> = Arc::new(GeminiProvider::from_config(&config.gemini, timeout));
        let video = config
            .youtube
            .as_ref()
            .map(|yt| Arc::new(YouTubeClient::new(yt, timeout)) as Arc<dyn VideoSearchProvider>);

        let mut builder = ServerResourcesBuilder::new(config).llm(llm);
        if let Some(video) = video {
            builder = builder.video(video);
        }
        builder.build()
    }
}

/// Builder for [`ServerResources`] with injectable collaborators
pub struct ServerResourcesBuilder {
    config: ServerConfig,
    llm: Option<Arc<dyn LlmProvider>>,
    video: Option<Arc<dyn VideoSearchProvider>>,
    sessions: Option<Arc<dyn SessionStore>>,
    rng: Option<Arc<RandomSource>>,
    knowledge: Option<Arc<KnowledgeBase>>,
}

impl ServerResourcesBuilder {
    /// Start from a configuration
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            llm: None,
            video: None,
            sessions: None,
            rng: None,
            knowledge: None,
        }
    }

    /// Generation backend; defaults to Gemini built from the configuration
    #[must_use]
    pub fn llm(mut self, llm: Arc<dyn LlmProvider>) -> Self {
        self.llm = Some(llm);
        self
    }

    /// Video search backend; video suggestions are disabled without one
    #[must_use]
    pub fn video(mut self, video: Arc<dyn VideoSearchProvider>) -> Self {
        self.video = Some(video);
        self
    }

    /// Session backend; defaults to in-memory
    #[must_use]
    pub fn sessions(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Random source; defaults to OS entropy
    #[must_use]
    pub fn rng(mut self, rng: Arc<RandomSource>) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Knowledge base; defaults to the embedded document
    #[must_use]
    pub fn knowledge(mut self, knowledge: Arc<KnowledgeBase>) -> Self {
        self.knowledge = Some(knowledge);
        self
    }

    /// Assemble the resources
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the embedded knowledge base is invalid
    pub fn build(self) -> AppResult<ServerResources> {
        let config = Arc::new(self.config);
        let knowledge = match self.knowledge {
            Some(knowledge) => knowledge,
            None => Arc::new(KnowledgeBase::embedded()?),
        };
        let rng = self.rng.unwrap_or_else(|| Arc::new(RandomSource::from_entropy()));
        let llm = self.llm.unwrap_or_else(|| {
            Arc::new(GeminiProvider::from_config(
                &config.gemini,
                config.external_timeout_secs,
            ))
        });
        let max_results = config
            .youtube
            .as_ref()
            .map_or(crate::constants::defaults::YOUTUBE_MAX_RESULTS, |yt| yt.max_results);

        let mut external = ExternalClient::new(llm, Arc::clone(&rng));
        if let Some(video) = self.video {
            external = external.with_video_provider(video, max_results);
        }
        let external = Arc::new(external);

        let router = Arc::new(MessageRouter::new(
            Arc::clone(&knowledge),
            Arc::clone(&external),
            rng,
            &config.router,
        ));
        let sessions = self
            .sessions
            .unwrap_or_else(|| Arc::new(InMemorySessionStore::new()));
        let chat = Arc::new(ChatService::new(
            Arc::clone(&router),
            Arc::clone(&external),
            Arc::clone(&sessions),
        ));

        Ok(ServerResources {
            config,
            knowledge,
            external,
            router,
            sessions,
            chat,
        })
    }
}
