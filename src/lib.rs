// ABOUTME: Main library entry point for the FitBot fitness chat service
// ABOUTME: Keyword routing over a static knowledge base with LLM fallback and video suggestions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

#![deny(unsafe_code)]

//! # FitBot
//!
//! A conversational responder for fitness questions. Each message is
//! classified by an ordered keyword table:
//!
//! - short thanks or praise gets a canned appreciation reply
//! - "how to" plus a known exercise gets a step-by-step guide
//! - a fitness topic keyword gets a fixed knowledge base template
//! - anything else is sent to Google Gemini with the conversation so far
//!
//! When a message asks how to perform an exercise, a YouTube video link is
//! appended if video search is configured.
//!
//! ## Architecture
//!
//! - **Router**: ordered rule table, reply rendering, video post-processing
//! - **External**: Gemini generation and YouTube search, failures become fallbacks
//! - **Session**: pluggable per-session turn history, in-memory by default
//! - **Services / Routes**: chat orchestration behind an axum HTTP API
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use fitbot::config::environment::ServerConfig;
//! use fitbot::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("{}", config.summary());
//!     Ok(())
//! }
//! ```

/// Environment configuration
pub mod config;

/// Unified error types
pub mod errors;

/// Third-party service adapter
pub mod external;

/// Static fitness knowledge base
pub mod knowledge;

/// LLM provider abstraction and Gemini implementation
pub mod llm;

/// Logging configuration
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Shared server resources
pub mod resources;

/// Message classification and reply composition
pub mod router;

/// HTTP route handlers
pub mod routes;

/// HTTP server assembly
pub mod server;

/// Domain services
pub mod services;

/// Session history storage
pub mod session;

/// Shared utilities
pub mod utils;

/// Application constants, re-exported from `fitbot_core`
pub use fitbot_core::constants;
