// ABOUTME: Utility modules for common functionality across the application
// ABOUTME: Contains outbound HTTP client helpers and the shared random source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

/// HTTP client configuration and helpers
pub mod http_client;
/// Seedable random selection
pub mod random;

pub use random::RandomSource;
