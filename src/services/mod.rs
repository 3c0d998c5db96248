// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Holds the chat service shared by the HTTP routes and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! Domain service layer
//!
//! Route handlers stay thin: they decode requests and delegate here.

/// Chat message handling and session history
pub mod chat;

pub use chat::{ChatInput, ChatOutput, ChatService};
