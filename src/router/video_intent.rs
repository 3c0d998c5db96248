// ABOUTME: Detects when a message asks for exercise instruction that a video could illustrate
// ABOUTME: Requires both an exercise keyword and an instructional keyword, and picks a search subject
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

/// Named exercises, most specific spelling first; these become search subjects
pub const EXERCISE_SUBJECTS: &[&str] = &[
    "bench press",
    "squat",
    "push-up",
    "pushup",
    "push up",
    "pull-up",
    "pullup",
    "pull up",
    "deadlift",
    "plank",
    "lunge",
    "burpee",
    "crunch",
    "bicep curl",
    "shoulder press",
    "yoga",
    "stretch",
];

/// Generic exercise words that signal interest but are not searchable subjects
pub const EXERCISE_TERMS: &[&str] = &["exercise", "workout", "form", "technique", "posture"];

/// Words that ask to be shown how something is done
pub const INSTRUCTIONAL_KEYWORDS: &[&str] = &[
    "how to",
    "technique",
    "guide",
    "tutorial",
    "demonstrate",
    "show me",
    "example",
];

/// A request that should be answered with a video as well
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoIntent {
    /// What to search for
    pub subject: String,
}

/// Detect a video intent in a normalized message
#[must_use]
pub fn detect(message: &str) -> Option<VideoIntent> {
    let subject = EXERCISE_SUBJECTS.iter().find(|s| message.contains(*s));
    let mentions_exercise =
        subject.is_some() || EXERCISE_TERMS.iter().any(|t| message.contains(t));
    let wants_instruction = INSTRUCTIONAL_KEYWORDS.iter().any(|k| message.contains(k));

    if !(mentions_exercise && wants_instruction) {
        return None;
    }

    Some(VideoIntent {
        subject: subject.map_or_else(|| message.trim().to_owned(), |s| (*s).to_owned()),
    })
}
