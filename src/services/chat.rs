// ABOUTME: Chat domain service that validates input, records history and dispatches replies
// ABOUTME: Image messages go straight to generation; text messages go through the router
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

use std::sync::Arc;
use std::time::Instant;

use crate::constants::{defaults, fallback_messages};
use crate::errors::{AppError, AppResult};
use crate::external::ExternalClient;
use crate::logging::AppLogger;
use crate::router::{build_context, MessageRouter};
use crate::session::{assistant_turn, user_turn, SessionStore};

/// An inbound chat message
#[derive(Debug, Clone, Default)]
pub struct ChatInput {
    /// Message text, possibly empty when an image is attached
    pub message: String,
    /// Session to record the turn in
    pub session_id: Option<String>,
    /// Base64 image, optionally as a data URL
    pub image: Option<String>,
}

/// The reply to a chat message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatOutput {
    /// Reply text
    pub response: String,
    /// Whether the client should animate the reply; false when it carries a video link
    pub should_type: bool,
}

/// Use the given session id, or the default session when it is absent or blank
#[must_use]
pub fn resolve_session_id(session_id: Option<&str>) -> String {
    session_id
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(defaults::SESSION_ID)
        .to_owned()
}

/// Chat orchestration over the router, external adapter and session store
pub struct ChatService {
    router: Arc<MessageRouter>,
    external: Arc<ExternalClient>,
    sessions: Arc<dyn SessionStore>,
}

impl ChatService {
    /// Create the service
    #[must_use]
    pub fn new(
        router: Arc<MessageRouter>,
        external: Arc<ExternalClient>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            router,
            external,
            sessions,
        }
    }

    /// Answer one message and record the user turn
    ///
    /// The assistant turn is recorded only when a reply was produced; a
    /// generation failure sentinel is returned but left out of the history.
    ///
    /// # Errors
    ///
    /// Returns `MISSING_REQUIRED_FIELD` when there is neither text nor an
    /// image; no external service is called in that case. Session store
    /// failures are propagated.
    pub async fn handle_message(&self, input: ChatInput) -> AppResult<ChatOutput> {
        let started = Instant::now();
        let message = input.message.trim();
        let image = input
            .image
            .as_deref()
            .map(str::trim)
            .filter(|img| !img.is_empty());

        if message.is_empty() && image.is_none() {
            return Err(AppError::missing_field(fallback_messages::NO_INPUT));
        }

        let session_id = resolve_session_id(input.session_id.as_deref());
        let history = self.sessions.get(&session_id).await?;
        let turn = user_turn(message, image.is_some());
        self.sessions.append(&session_id, turn.clone()).await?;

        let (output, route, generated) = if let Some(image) = image {
            let (response, generated) = match self
                .external
                .generate_text(&build_context(&history), &turn, Some(image))
                .await
            {
                Ok(text) => (text, true),
                Err(sentinel) => (sentinel.to_owned(), false),
            };
            (
                ChatOutput {
                    response,
                    should_type: true,
                },
                "image".to_owned(),
                generated,
            )
        } else {
            let reply = self.router.respond(message, &history).await;
            (
                ChatOutput {
                    response: reply.text,
                    should_type: reply.video.is_none(),
                },
                reply.classification.label(),
                !reply.degraded,
            )
        };

        // Sentinels are shown to the user but never become prior conversation
        if generated {
            self.sessions
                .append(&session_id, assistant_turn(&output.response))
                .await?;
        }

        AppLogger::log_chat_turn(
            &session_id,
            &route,
            image.is_some(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        Ok(output)
    }

    /// Turns recorded for a session, empty if it was never used
    ///
    /// # Errors
    ///
    /// Propagates session store failures
    pub async fn history(&self, session_id: Option<&str>) -> AppResult<Vec<String>> {
        self.sessions.get(&resolve_session_id(session_id)).await
    }

    /// Forget a session's turns
    ///
    /// # Errors
    ///
    /// Propagates session store failures
    pub async fn clear_history(&self, session_id: Option<&str>) -> AppResult<()> {
        self.sessions.clear(&resolve_session_id(session_id)).await
    }
}
