// ABOUTME: System prompts for LLM interactions loaded at compile time
// ABOUTME: Provides the FitBot trainer persona prepended to every generation request
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! # System Prompts
//!
//! Prompts live in markdown files next to this module and are embedded at
//! compile time so they can be edited without touching Rust code.

/// FitBot gym trainer persona
pub const FITBOT_SYSTEM_PROMPT: &str = include_str!("fitbot_system.md");

/// Get the persona instruction used for every fallback generation
#[must_use]
pub const fn get_fitbot_system_prompt() -> &'static str {
    FITBOT_SYSTEM_PROMPT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_persona_and_domain() {
        let prompt = get_fitbot_system_prompt();
        assert!(prompt.contains("FitBot"));
        assert!(prompt.contains("fitness"));
    }
}
