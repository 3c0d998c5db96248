// ABOUTME: Route module organization for the FitBot HTTP endpoints
// ABOUTME: Groups chat and health routes by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! HTTP routes
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to the service layer.

/// Chat message and session history routes
pub mod chat;
/// Health check and readiness routes
pub mod health;

pub use chat::{
    ChatRequestBody, ChatResponseBody, ChatRoutes, ClearHistoryRequest, HistoryResponse,
    MessageResponse,
};
pub use health::HealthRoutes;
