// ABOUTME: Static fitness knowledge base with topic entries, exercise guides and appreciation replies
// ABOUTME: Loaded once from embedded JSON and rendered into deterministic reply templates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! Fitness knowledge base
//!
//! The knowledge base is an immutable document embedded at compile time and
//! parsed once at startup. Every topic the router can select must be present;
//! a document missing a topic or the appreciation list is rejected at load.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;

use crate::errors::{AppError, AppResult};

/// Embedded knowledge base document (single source of truth)
const EMBEDDED_KNOWLEDGE_JSON: &str = include_str!("fitness_knowledge.json");

/// Knowledge base topics the router can answer from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicKey {
    /// Yoga practice
    Yoga,
    /// General workouts
    Workout,
    /// Cardiovascular training
    Cardio,
    /// Resistance training
    WeightTraining,
    /// Flexibility work
    Stretching,
    /// Diet and food
    Nutrition,
    /// Body mass index
    Bmi,
    /// Chest training
    Chest,
    /// Gym machines
    Machines,
}

impl TopicKey {
    /// Every topic, in declaration order
    pub const ALL: [Self; 9] = [
        Self::Yoga,
        Self::Workout,
        Self::Cardio,
        Self::WeightTraining,
        Self::Stretching,
        Self::Nutrition,
        Self::Bmi,
        Self::Chest,
        Self::Machines,
    ];

    /// Key as it appears in the knowledge document
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yoga => "yoga",
            Self::Workout => "workout",
            Self::Cardio => "cardio",
            Self::WeightTraining => "weight_training",
            Self::Stretching => "stretching",
            Self::Nutrition => "nutrition",
            Self::Bmi => "bmi",
            Self::Chest => "chest",
            Self::Machines => "machines",
        }
    }

    /// Heading used as the first word of a rendered reply
    #[must_use]
    pub const fn display_title(self) -> &'static str {
        match self {
            Self::Yoga => "Yoga",
            Self::Workout => "Workout",
            Self::Cardio => "Cardio",
            Self::WeightTraining => "Weight Training",
            Self::Stretching => "Stretching",
            Self::Nutrition => "Nutrition",
            Self::Bmi => "BMI",
            Self::Chest => "Chest Training",
            Self::Machines => "Gym Machines",
        }
    }
}

impl fmt::Display for TopicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One topic's list-valued sections
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TopicEntry {
    /// One-paragraph definition
    #[serde(default)]
    pub definition: Option<String>,
    /// Key benefits
    #[serde(default)]
    pub benefits: Vec<String>,
    /// Common types or categories
    #[serde(default)]
    pub types: Vec<String>,
    /// Example exercises
    #[serde(default)]
    pub exercises: Vec<String>,
    /// Practical tips
    #[serde(default)]
    pub tips: Vec<String>,
}

/// Step-by-step instructions for a single exercise
#[derive(Debug, Clone, Deserialize)]
pub struct ExerciseGuide {
    /// Canonical exercise name
    pub name: String,
    /// Display title
    pub title: String,
    /// Spellings that identify this exercise in a message
    pub aliases: Vec<String>,
    /// Ordered instructions
    pub steps: Vec<String>,
    /// Form tips
    #[serde(default)]
    pub tips: Vec<String>,
}

impl ExerciseGuide {
    /// Whether a normalized message mentions this exercise
    #[must_use]
    pub fn is_mentioned_in(&self, message: &str) -> bool {
        self.aliases.iter().any(|alias| message.contains(alias.as_str()))
    }

    /// Render the numbered step list
    #[must_use]
    pub fn render(&self) -> String {
        let steps = self
            .steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("{}. {step}", i + 1))
            .collect::<Vec<_>>()
            .join("\n");

        let mut out = format!("How to do a {}:\n{steps}", self.title);
        if !self.tips.is_empty() {
            out.push_str("\n\nTips:\n");
            out.push_str(&bullets(&self.tips));
        }
        out
    }
}

/// Immutable fitness knowledge base
#[derive(Debug, Clone, Deserialize)]
pub struct KnowledgeBase {
    topics: HashMap<TopicKey, TopicEntry>,
    appreciation_responses: Vec<String>,
    #[serde(default)]
    exercise_guides: Vec<ExerciseGuide>,
}

impl KnowledgeBase {
    /// Load the knowledge base compiled into the binary
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the embedded document is invalid
    pub fn embedded() -> AppResult<Self> {
        Self::from_json(EMBEDDED_KNOWLEDGE_JSON)
    }

    /// Parse and validate a knowledge document
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the JSON is malformed, a topic is
    /// missing, or there are no appreciation responses
    pub fn from_json(json: &str) -> AppResult<Self> {
        let kb: Self = serde_json::from_str(json)
            .map_err(|e| AppError::config(format!("Invalid knowledge base document: {e}")))?;

        if let Some(missing) = TopicKey::ALL.iter().find(|k| !kb.topics.contains_key(k)) {
            return Err(AppError::config(format!(
                "Knowledge base is missing topic '{missing}'"
            )));
        }
        if kb.appreciation_responses.is_empty() {
            return Err(AppError::config(
                "Knowledge base has no appreciation responses",
            ));
        }
        Ok(kb)
    }

    /// Look up a topic entry
    #[must_use]
    pub fn topic(&self, key: TopicKey) -> Option<&TopicEntry> {
        self.topics.get(&key)
    }

    /// Interchangeable replies to thanks and praise
    #[must_use]
    pub fn appreciation_responses(&self) -> &[String] {
        &self.appreciation_responses
    }

    /// Exercise guides, in document order
    #[must_use]
    pub fn exercise_guides(&self) -> &[ExerciseGuide] {
        &self.exercise_guides
    }

    /// Look up an exercise guide by canonical name
    #[must_use]
    pub fn guide(&self, name: &str) -> Option<&ExerciseGuide> {
        self.exercise_guides.iter().find(|g| g.name == name)
    }

    /// First guide (in document order) mentioned by a normalized message
    #[must_use]
    pub fn find_guide(&self, message: &str) -> Option<&ExerciseGuide> {
        self.exercise_guides
            .iter()
            .find(|g| g.is_mentioned_in(message))
    }

    /// Render a topic reply
    ///
    /// Sections appear in a fixed order and empty sections are skipped.
    #[must_use]
    pub fn render_topic(&self, key: TopicKey) -> Option<String> {
        let entry = self.topic(key)?;
        let title = key.display_title();

        let mut blocks = vec![entry
            .definition
            .as_deref()
            .map_or_else(|| format!("{title}:"), |d| format!("{title}: {d}"))];

        for (label, items) in [
            ("Key Benefits", &entry.benefits),
            ("Common Types", &entry.types),
            ("Exercises", &entry.exercises),
            ("Tips", &entry.tips),
        ] {
            if !items.is_empty() {
                blocks.push(format!("{label}:\n{}", bullets(items)));
            }
        }

        Some(blocks.join("\n\n"))
    }
}

fn bullets(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}
