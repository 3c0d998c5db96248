// ABOUTME: Ordered keyword routing table mapping message predicates to reply targets
// ABOUTME: First matching rule wins; the table itself is data and can be inspected in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

use std::fmt;

use crate::knowledge::{KnowledgeBase, TopicKey};

/// Gratitude and approval words that mark a short message as appreciation
pub const APPRECIATION_KEYWORDS: &[&str] = &[
    "thanks",
    "thank you",
    "thx",
    "great",
    "cool",
    "awesome",
    "nice",
    "good",
    "perfect",
    "amazing",
    "helpful",
    "appreciate",
];

/// Phrase that turns an exercise name into a guide request
pub const GUIDE_TRIGGER: &str = "how to";

/// Topic keyword groups, in evaluation order
pub const TOPIC_KEYWORDS: &[(TopicKey, &[&str])] = &[
    (TopicKey::Bmi, &["bmi", "body mass index"]),
    (TopicKey::Chest, &["chest"]),
    (TopicKey::Machines, &["machine"]),
    (TopicKey::Yoga, &["yoga"]),
    (TopicKey::Stretching, &["stretch", "flexibility"]),
    (TopicKey::Cardio, &["cardio"]),
    (TopicKey::WeightTraining, &["weight", "strength"]),
    (TopicKey::Nutrition, &["nutrition", "diet", "food", "eat"]),
    (TopicKey::Workout, &["workout", "exercise"]),
];

/// Outcome of classifying a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Short thanks or praise
    Appreciation,
    /// Knowledge base topic
    Topic(TopicKey),
    /// Step list for a named exercise
    ExerciseGuide(String),
    /// Nothing matched; ask the generation service
    Fallback,
}

impl Classification {
    /// Short label for logs
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Appreciation => "appreciation".to_owned(),
            Self::Topic(key) => format!("topic:{key}"),
            Self::ExerciseGuide(name) => format!("exercise_guide:{name}"),
            Self::Fallback => "fallback".to_owned(),
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// Predicate over a normalized message
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Contains any keyword and has fewer than `max_tokens` whitespace tokens
    ShortWithAny {
        /// Keywords, matched as substrings
        keywords: &'static [&'static str],
        /// Exclusive token limit
        max_tokens: usize,
    },
    /// Contains the phrase
    Contains(&'static str),
    /// Contains any keyword
    AnyOf(&'static [&'static str]),
}

impl Matcher {
    /// Evaluate against a normalized message
    #[must_use]
    pub fn matches(&self, message: &str) -> bool {
        match self {
            Self::ShortWithAny {
                keywords,
                max_tokens,
            } => token_count(message) < *max_tokens && contains_any(message, keywords),
            Self::Contains(phrase) => message.contains(phrase),
            Self::AnyOf(keywords) => contains_any(message, keywords),
        }
    }
}

/// What a matching rule produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteTarget {
    /// Random appreciation reply
    Appreciation,
    /// Guide for the first exercise the message names
    ExerciseGuide,
    /// Fixed topic template
    Topic(TopicKey),
}

/// One row of the routing table
#[derive(Debug, Clone)]
pub struct RouteRule {
    /// Rule name for logs and tests
    pub name: &'static str,
    /// Predicate
    pub matcher: Matcher,
    /// Result when the predicate holds
    pub target: RouteTarget,
}

impl RouteRule {
    /// Classify a normalized message, `None` if this rule does not apply
    ///
    /// A guide rule only applies when the knowledge base has a guide for an
    /// exercise named in the message.
    #[must_use]
    pub fn evaluate(&self, message: &str, knowledge: &KnowledgeBase) -> Option<Classification> {
        if !self.matcher.matches(message) {
            return None;
        }
        match self.target {
            RouteTarget::Appreciation => Some(Classification::Appreciation),
            RouteTarget::Topic(key) => Some(Classification::Topic(key)),
            RouteTarget::ExerciseGuide => knowledge
                .find_guide(message)
                .map(|guide| Classification::ExerciseGuide(guide.name.clone())),
        }
    }
}

/// The default table: appreciation, exercise guides, then topics
#[must_use]
pub fn default_rules(appreciation_max_tokens: usize) -> Vec<RouteRule> {
    let mut rules = vec![
        RouteRule {
            name: "appreciation",
            matcher: Matcher::ShortWithAny {
                keywords: APPRECIATION_KEYWORDS,
                max_tokens: appreciation_max_tokens,
            },
            target: RouteTarget::Appreciation,
        },
        RouteRule {
            name: "exercise_guide",
            matcher: Matcher::Contains(GUIDE_TRIGGER),
            target: RouteTarget::ExerciseGuide,
        },
    ];
    rules.extend(TOPIC_KEYWORDS.iter().map(|(key, keywords)| RouteRule {
        name: key.as_str(),
        matcher: Matcher::AnyOf(keywords),
        target: RouteTarget::Topic(*key),
    }));
    rules
}

/// Whitespace-delimited token count
#[must_use]
pub fn token_count(message: &str) -> usize {
    message.split_whitespace().count()
}

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| message.contains(k))
}
