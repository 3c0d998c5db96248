// ABOUTME: Error handling re-exports from the fitbot-core crate
// ABOUTME: Keeps crate::errors paths stable for application modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! Unified error types, re-exported from `fitbot_core::errors`

pub use fitbot_core::errors::*;
