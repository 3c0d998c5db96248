// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for configuration, endpoints and fallback replies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Service identity used in structured logs
pub mod service_names {
    /// Name of the HTTP server binary and log target
    pub const FITBOT_SERVER: &str = "fitbot-server";
}

/// Environment variable names read at startup
pub mod env_vars {
    /// Gemini API key (required)
    pub const GEMINI_API_KEY: &str = "GEMINI_API_KEY";
    /// Gemini model override
    pub const GEMINI_MODEL: &str = "GEMINI_MODEL";
    /// Gemini API base URL override
    pub const GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";
    /// YouTube Data API key (optional, enables video suggestions)
    pub const YOUTUBE_API_KEY: &str = "YOUTUBE_API_KEY";
    /// YouTube Data API base URL override
    pub const YOUTUBE_BASE_URL: &str = "YOUTUBE_BASE_URL";
    /// Maximum number of candidate videos requested per search
    pub const YOUTUBE_MAX_RESULTS: &str = "YOUTUBE_MAX_RESULTS";
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// HTTP listen host
    pub const HOST: &str = "HOST";
    /// Comma separated CORS origins, or `*`
    pub const CORS_ALLOWED_ORIGINS: &str = "CORS_ALLOWED_ORIGINS";
    /// Timeout applied to every outbound HTTP request
    pub const EXTERNAL_TIMEOUT_SECS: &str = "EXTERNAL_TIMEOUT_SECS";
    /// Token threshold for the appreciation rule
    pub const APPRECIATION_MAX_TOKENS: &str = "APPRECIATION_MAX_TOKENS";
    /// Deployment environment name
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}

/// Default configuration values
pub mod defaults {
    /// Default HTTP port
    pub const HTTP_PORT: u16 = 5000;
    /// Default listen host
    pub const HOST: &str = "127.0.0.1";
    /// Default Gemini model (multimodal)
    pub const GEMINI_MODEL: &str = "gemini-1.5-pro";
    /// Default Gemini API base URL
    pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Default YouTube Data API base URL
    pub const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
    /// Default number of candidate videos per search
    pub const YOUTUBE_MAX_RESULTS: u32 = 5;
    /// Default outbound request timeout in seconds
    pub const EXTERNAL_TIMEOUT_SECS: u64 = 30;
    /// Messages with fewer tokens than this may be treated as appreciation
    pub const APPRECIATION_MAX_TOKENS: usize = 5;
    /// Session used when the client does not send one
    pub const SESSION_ID: &str = "default";
}

/// HTTP endpoint paths
pub mod endpoints {
    /// Chat endpoint
    pub const CHAT: &str = "/chat";
    /// Session history reset endpoint
    pub const CLEAR_HISTORY: &str = "/clear-history";
    /// Session history fetch endpoint
    pub const GET_HISTORY: &str = "/get-history";
    /// Liveness endpoint
    pub const HEALTH: &str = "/health";
    /// Readiness endpoint
    pub const READY: &str = "/ready";
}

/// Static user-facing replies used when a real answer is unavailable
pub mod fallback_messages {
    /// Generation returned nothing usable
    pub const NOT_UNDERSTOOD: &str = "I'm having trouble understanding. Could you rephrase that?";
    /// Attached image could not be decoded
    pub const IMAGE_UNPROCESSABLE: &str =
        "I couldn't process the image you sent. Please make sure it's a valid image file.";
    /// Catch-all apology for internal failures inside the responder
    pub const APOLOGY: &str = "I'm having trouble connecting. Please try again.";
    /// Acknowledgement returned by the history reset endpoint
    pub const HISTORY_CLEARED: &str = "Chat history cleared successfully";
    /// Error text when neither text nor image was sent
    pub const NO_INPUT: &str = "No message or image provided";
}
