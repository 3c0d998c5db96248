// ABOUTME: Message router that classifies chat text and composes the reply
// ABOUTME: Answers from the knowledge base when a rule matches, otherwise asks the generation service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! # Message Router
//!
//! Classification runs the ordered [`RouteRule`] table over the normalized
//! message and stops at the first match. Replies other than appreciation are
//! then post-processed: when the message asks how to perform an exercise, one
//! video search is made and a link is appended if it returns anything.
//!
//! The router never fails. Anything that prevents a reply from being built
//! becomes a fixed apology.

pub mod rules;
pub mod video_intent;

pub use rules::{default_rules, Classification, Matcher, RouteRule, RouteTarget};
pub use video_intent::VideoIntent;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::environment::RouterConfig;
use crate::constants::fallback_messages;
use crate::external::{ExternalClient, VideoSuggestion};
use crate::knowledge::KnowledgeBase;
use crate::llm::get_fitbot_system_prompt;
use crate::session::user_turn;
use crate::utils::RandomSource;

/// A composed reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutedReply {
    /// How the message was classified
    pub classification: Classification,
    /// Final text, including any video block
    pub text: String,
    /// Video appended to the text, if any
    pub video: Option<VideoSuggestion>,
    /// Generation failed and the text carries a fixed sentinel instead of a reply
    pub degraded: bool,
}

/// Keyword router over the knowledge base with a generation fallback
pub struct MessageRouter {
    knowledge: Arc<KnowledgeBase>,
    rules: Vec<RouteRule>,
    external: Arc<ExternalClient>,
    rng: Arc<RandomSource>,
}

impl MessageRouter {
    /// Create a router with the default rule table
    #[must_use]
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        external: Arc<ExternalClient>,
        rng: Arc<RandomSource>,
        config: &RouterConfig,
    ) -> Self {
        Self::with_rules(
            knowledge,
            external,
            rng,
            default_rules(config.appreciation_max_tokens),
        )
    }

    /// Create a router with a custom rule table
    #[must_use]
    pub fn with_rules(
        knowledge: Arc<KnowledgeBase>,
        external: Arc<ExternalClient>,
        rng: Arc<RandomSource>,
        rules: Vec<RouteRule>,
    ) -> Self {
        Self {
            knowledge,
            rules,
            external,
            rng,
        }
    }

    /// The routing table, in evaluation order
    #[must_use]
    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Classify a raw message
    #[must_use]
    pub fn classify(&self, message: &str) -> Classification {
        let normalized = normalize(message);
        self.classify_normalized(&normalized)
    }

    fn classify_normalized(&self, normalized: &str) -> Classification {
        self.rules
            .iter()
            .find_map(|rule| rule.evaluate(normalized, &self.knowledge))
            .unwrap_or(Classification::Fallback)
    }

    /// Build the reply for a message
    ///
    /// `history` is the session's prior turns and is only used as context for
    /// the generation fallback.
    pub async fn respond(&self, message: &str, history: &[String]) -> RoutedReply {
        let normalized = normalize(message);
        let classification = self.classify_normalized(&normalized);
        debug!(route = %classification, "Message classified");

        let (base, degraded) = match &classification {
            Classification::Fallback => match self
                .external
                .generate_text(&build_context(history), &user_turn(message.trim(), false), None)
                .await
            {
                Ok(text) => (text, false),
                Err(sentinel) => (sentinel.to_owned(), true),
            },
            other => (self.render(other), false),
        };

        // Short thanks stay a pure appreciation reply even when they name a technique
        let intent = match classification {
            Classification::Appreciation => None,
            _ => video_intent::detect(&normalized),
        };
        let video = match intent {
            Some(intent) => {
                debug!(subject = %intent.subject, "Video intent detected");
                self.external.search_video(&intent.subject).await
            }
            None => None,
        };

        RoutedReply {
            classification,
            text: append_video(base, video.as_ref()),
            video,
            degraded,
        }
    }

    fn render(&self, classification: &Classification) -> String {
        let rendered = match classification {
            Classification::Appreciation => self
                .rng
                .choose(self.knowledge.appreciation_responses())
                .cloned(),
            Classification::Topic(key) => self.knowledge.render_topic(*key),
            Classification::ExerciseGuide(name) => {
                self.knowledge.guide(name).map(|guide| guide.render())
            }
            Classification::Fallback => None,
        };

        rendered.unwrap_or_else(|| {
            warn!(route = %classification, "No reply could be rendered");
            fallback_messages::APOLOGY.to_owned()
        })
    }
}

/// Trim and lowercase a message for keyword matching
#[must_use]
pub fn normalize(message: &str) -> String {
    message.trim().to_lowercase()
}

/// Persona followed by the conversation so far
#[must_use]
pub fn build_context(history: &[String]) -> String {
    let mut context = format!(
        "{}\n\nPrevious conversation:\n",
        get_fitbot_system_prompt().trim_end()
    );
    for turn in history {
        context.push_str(turn);
        context.push('\n');
    }
    context
}

/// Append the video block to a reply; `None` leaves the reply unchanged
#[must_use]
pub fn append_video(reply: String, video: Option<&VideoSuggestion>) -> String {
    match video {
        Some(video) => format!(
            "{reply}\n\n🎥 Watch this video: {}\n{}",
            video.title, video.url
        ),
        None => reply,
    }
}
