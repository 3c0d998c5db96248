// ABOUTME: Core types and constants for the FitBot fitness chat responder
// ABOUTME: Foundation crate with error handling and shared constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

#![deny(unsafe_code)]

//! # FitBot Core
//!
//! Foundation crate providing shared types and constants for the FitBot
//! responder. It changes rarely, which keeps incremental builds of the main
//! crate cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Environment variable names, defaults and user-facing fallback text

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;
