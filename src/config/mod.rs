// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven server configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! Configuration module for FitBot

/// Environment and server configuration
pub mod environment;

pub use environment::{
    CorsConfig, Environment, GeminiConfig, RouterConfig, ServerConfig, YouTubeConfig,
};
