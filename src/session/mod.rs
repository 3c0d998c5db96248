// ABOUTME: Session history storage abstraction with a pluggable backend
// ABOUTME: Default in-memory backend keeps ordered chat turns per session id in a DashMap
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! Conversation history per session
//!
//! History is an ordered list of turn strings (`"User: …"`, `"Assistant: …"`).
//! It is process-local and unbounded; it is only cleared by an explicit reset.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::errors::AppResult;

/// Prefix for user turns
pub const USER_PREFIX: &str = "User: ";
/// Prefix for assistant turns
pub const ASSISTANT_PREFIX: &str = "Assistant: ";

/// Storage backend for session turn history
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Ordered turns for a session; empty if the session was never used
    async fn get(&self, session_id: &str) -> AppResult<Vec<String>>;

    /// Append a turn to the end of a session's history
    async fn append(&self, session_id: &str, turn: String) -> AppResult<()>;

    /// Drop every turn for a session; succeeds if the session is unknown
    async fn clear(&self, session_id: &str) -> AppResult<()>;
}

/// Format a user turn for history
#[must_use]
pub fn user_turn(message: &str, has_image: bool) -> String {
    match (has_image, message.is_empty()) {
        (true, true) => format!("{USER_PREFIX}(image attached)"),
        (true, false) => format!("{USER_PREFIX}{message} (image attached)"),
        (false, _) => format!("{USER_PREFIX}{message}"),
    }
}

/// Format an assistant turn for history
#[must_use]
pub fn assistant_turn(reply: &str) -> String {
    format!("{ASSISTANT_PREFIX}{reply}")
}

/// In-process session store
///
/// Appends for a session take that shard's write lock, so a single append is
/// atomic. Turns from concurrent requests on one session may still interleave.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, Vec<String>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions that currently hold turns
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> AppResult<Vec<String>> {
        Ok(self
            .sessions
            .get(session_id)
            .map(|turns| turns.value().clone())
            .unwrap_or_default())
    }

    async fn append(&self, session_id: &str, turn: String) -> AppResult<()> {
        self.sessions
            .entry(session_id.to_owned())
            .or_default()
            .push(turn);
        Ok(())
    }

    async fn clear(&self, session_id: &str) -> AppResult<()> {
        self.sessions.remove(session_id);
        Ok(())
    }
}
