// ABOUTME: CORS middleware configuration for HTTP API endpoints
// ABOUTME: Allows the browser chat client to call the API from configured origins
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::environment::CorsConfig;

/// Configure CORS from `CORS_ALLOWED_ORIGINS`
///
/// `*` or an empty value allows any origin. Otherwise the value is a comma
/// separated origin list; entries that are not valid header values are
/// skipped, and if none survive any origin is allowed.
///
/// ```bash
/// export CORS_ALLOWED_ORIGINS="https://fitbot.example.com,http://localhost:3000"
/// ```
pub fn setup_cors(config: &CorsConfig) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(&config.allowed_origins))
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
            HeaderName::from_static("x-request-id"),
        ])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}

fn allow_origin(allowed: &str) -> AllowOrigin {
    let allowed = allowed.trim();
    if allowed.is_empty() || allowed == "*" {
        return AllowOrigin::any();
    }

    let origins: Vec<HeaderValue> = allowed
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();

    if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    }
}
