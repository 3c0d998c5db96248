// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses API credentials, listen address, CORS, timeouts and routing thresholds
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! Environment-based configuration
//!
//! All settings come from environment variables (optionally seeded from a
//! `.env` file by the binary). The Gemini key is the only required value:
//! without it the server refuses to start. The YouTube key is optional and
//! its absence simply disables video suggestions.

use std::env;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{defaults, env_vars};
use crate::errors::{AppError, AppResult, ErrorCode};

/// Environment type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Gemini generation endpoint settings
#[derive(Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// API key
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// API base URL
    pub base_url: String,
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// YouTube search endpoint settings
#[derive(Clone, Serialize, Deserialize)]
pub struct YouTubeConfig {
    /// API key
    pub api_key: String,
    /// API base URL
    pub base_url: String,
    /// Maximum candidates requested per search
    pub max_results: u32,
}

impl fmt::Debug for YouTubeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("YouTubeConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("max_results", &self.max_results)
            .finish()
    }
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Comma separated list of origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Routing thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Appreciation replies only apply to messages with fewer tokens than this
    pub appreciation_max_tokens: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            appreciation_max_tokens: defaults::APPRECIATION_MAX_TOKENS,
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// HTTP listen host
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Generation endpoint
    pub gemini: GeminiConfig,
    /// Video search endpoint, `None` disables video suggestions
    pub youtube: Option<YouTubeConfig>,
    /// CORS settings
    pub cors: CorsConfig,
    /// Timeout for every outbound request, in seconds
    pub external_timeout_secs: u64,
    /// Routing thresholds
    pub router: RouterConfig,
}

impl ServerConfig {
    /// Load configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns `CONFIG_MISSING` if `GEMINI_API_KEY` is unset or blank, and
    /// `CONFIG_INVALID` if a numeric variable cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Same as [`ServerConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let gemini_key = non_empty(env_vars::GEMINI_API_KEY).ok_or_else(|| {
            AppError::config_missing(format!(
                "{} not found. Please set it in the environment or a .env file",
                env_vars::GEMINI_API_KEY
            ))
        })?;

        let youtube = match non_empty(env_vars::YOUTUBE_API_KEY) {
            Some(api_key) => Some(YouTubeConfig {
                api_key,
                base_url: non_empty(env_vars::YOUTUBE_BASE_URL)
                    .unwrap_or_else(|| defaults::YOUTUBE_BASE_URL.to_owned()),
                max_results: parse_or(
                    non_empty(env_vars::YOUTUBE_MAX_RESULTS),
                    env_vars::YOUTUBE_MAX_RESULTS,
                    defaults::YOUTUBE_MAX_RESULTS,
                )?,
            }),
            None => None,
        };

        Ok(Self {
            http_port: parse_or(
                non_empty(env_vars::HTTP_PORT),
                env_vars::HTTP_PORT,
                defaults::HTTP_PORT,
            )?,
            host: non_empty(env_vars::HOST).unwrap_or_else(|| defaults::HOST.to_owned()),
            environment: non_empty(env_vars::ENVIRONMENT)
                .map(|v| Environment::from_str_or_default(&v))
                .unwrap_or_default(),
            gemini: GeminiConfig {
                api_key: gemini_key,
                model: non_empty(env_vars::GEMINI_MODEL)
                    .unwrap_or_else(|| defaults::GEMINI_MODEL.to_owned()),
                base_url: non_empty(env_vars::GEMINI_BASE_URL)
                    .unwrap_or_else(|| defaults::GEMINI_BASE_URL.to_owned()),
            },
            youtube,
            cors: non_empty(env_vars::CORS_ALLOWED_ORIGINS)
                .map(|allowed_origins| CorsConfig { allowed_origins })
                .unwrap_or_default(),
            external_timeout_secs: parse_or(
                non_empty(env_vars::EXTERNAL_TIMEOUT_SECS),
                env_vars::EXTERNAL_TIMEOUT_SECS,
                defaults::EXTERNAL_TIMEOUT_SECS,
            )?,
            router: RouterConfig {
                appreciation_max_tokens: parse_or(
                    non_empty(env_vars::APPRECIATION_MAX_TOKENS),
                    env_vars::APPRECIATION_MAX_TOKENS,
                    defaults::APPRECIATION_MAX_TOKENS,
                )?,
            },
        })
    }

    /// Whether video suggestions are enabled
    #[must_use]
    pub const fn video_enabled(&self) -> bool {
        self.youtube.is_some()
    }

    /// Settings that are acceptable locally but risky in a production deployment
    #[must_use]
    pub fn production_warnings(&self) -> Vec<&'static str> {
        let mut warnings = Vec::new();
        if !self.environment.is_production() {
            return warnings;
        }
        let origins = self.cors.allowed_origins.trim();
        if origins.is_empty() || origins == "*" {
            warnings.push("CORS allows any origin; set CORS_ALLOWED_ORIGINS");
        }
        if !self.video_enabled() {
            warnings.push("YOUTUBE_API_KEY is not set; video suggestions are disabled");
        }
        warnings
    }

    /// Get a human-readable configuration summary, without secrets
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "FitBot Configuration:\n\
             - Listen: {}:{}\n\
             - Environment: {}\n\
             - Gemini Model: {}\n\
             - Video Suggestions: {}\n\
             - CORS Origins: {}\n\
             - External Timeout: {}s\n\
             - Appreciation Token Limit: {}",
            self.host,
            self.http_port,
            self.environment,
            self.gemini.model,
            if self.video_enabled() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.cors.allowed_origins,
            self.external_timeout_secs,
            self.router.appreciation_max_tokens,
        )
    }
}

/// Parse an optional raw value, falling back to a default when absent
fn parse_or<T: FromStr>(raw: Option<String>, key: &str, default: T) -> AppResult<T> {
    raw.map_or(Ok(default), |value| {
        value.parse().map_err(|_| {
            AppError::new(
                ErrorCode::ConfigInvalid,
                format!("{key} has an invalid value: {value}"),
            )
        })
    })
}
