// ABOUTME: Integration tests for loading server configuration from process environment
// ABOUTME: Runs serially because every test mutates the shared environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::env;

use fitbot::config::environment::{Environment, ServerConfig};
use fitbot::errors::ErrorCode;
use fitbot::server::request_timeout;
use serial_test::serial;

const MANAGED_VARS: &[&str] = &[
    "GEMINI_API_KEY",
    "GEMINI_MODEL",
    "GEMINI_BASE_URL",
    "YOUTUBE_API_KEY",
    "YOUTUBE_BASE_URL",
    "YOUTUBE_MAX_RESULTS",
    "HTTP_PORT",
    "HOST",
    "CORS_ALLOWED_ORIGINS",
    "EXTERNAL_TIMEOUT_SECS",
    "APPRECIATION_MAX_TOKENS",
    "ENVIRONMENT",
];

fn clear_env() {
    for key in MANAGED_VARS {
        env::remove_var(key);
    }
}

#[test]
#[serial]
fn test_missing_gemini_key_refuses_to_load() {
    clear_env();

    let err = ServerConfig::from_env().unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigMissing);
    assert!(err.message.contains("GEMINI_API_KEY"));
}

#[test]
#[serial]
fn test_blank_gemini_key_is_treated_as_missing() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "   ");

    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissing);

    clear_env();
}

#[test]
#[serial]
fn test_defaults_with_only_required_key() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "gem-key");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 5000);
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(config.gemini.model, "gemini-1.5-pro");
    assert!(config.youtube.is_none());
    assert!(!config.video_enabled());
    assert_eq!(config.cors.allowed_origins, "*");
    assert_eq!(config.external_timeout_secs, 30);
    assert_eq!(config.router.appreciation_max_tokens, 5);
    assert!(config.summary().contains("Video Suggestions: Disabled"));
    assert_eq!(request_timeout(&config).as_secs(), 65);

    clear_env();
}

#[test]
#[serial]
fn test_overrides_are_applied() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "gem-key");
    env::set_var("YOUTUBE_API_KEY", "yt-key");
    env::set_var("YOUTUBE_MAX_RESULTS", "3");
    env::set_var("HTTP_PORT", "8080");
    env::set_var("HOST", "0.0.0.0");
    env::set_var("ENVIRONMENT", "production");
    env::set_var("EXTERNAL_TIMEOUT_SECS", "10");

    let config = ServerConfig::from_env().unwrap();

    assert_eq!(config.http_port, 8080);
    assert_eq!(config.host, "0.0.0.0");
    assert!(config.environment.is_production());
    let youtube = config.youtube.as_ref().unwrap();
    assert_eq!(youtube.api_key, "yt-key");
    assert_eq!(youtube.max_results, 3);
    assert!(config.summary().contains("Video Suggestions: Enabled"));
    assert!(!config.summary().contains("yt-key"));
    assert!(!format!("{config:?}").contains("gem-key"));
    assert_eq!(request_timeout(&config).as_secs(), 25);

    clear_env();
}

#[test]
#[serial]
fn test_unparseable_number_is_config_error() {
    clear_env();
    env::set_var("GEMINI_API_KEY", "gem-key");
    env::set_var("HTTP_PORT", "not-a-port");

    let err = ServerConfig::from_env().unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalid);
    assert!(err.message.contains("HTTP_PORT"));

    clear_env();
}
