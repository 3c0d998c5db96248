// ABOUTME: Outbound HTTP client construction with timeout configuration
// ABOUTME: Builds the reqwest clients shared by the Gemini and YouTube adapters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Connect timeout applied to every outbound client
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Create a new HTTP client with the given request timeout
///
/// Falls back to a default client if the builder fails, which only happens
/// when the TLS backend cannot be initialised.
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs.max(1))))
        .build()
        .unwrap_or_else(|_| Client::new())
}
