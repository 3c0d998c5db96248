// ABOUTME: HTTP middleware for request tracing, cross-origin access and failure recovery
// ABOUTME: Provides request ids, request spans, the CORS layer and JSON panic/timeout responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

pub mod cors;
pub mod recovery;
pub mod tracing;

// CORS configuration
pub use cors::setup_cors;

// Panic and timeout responses
pub use recovery::{panic_response, timeout_middleware, TIMEOUT_MESSAGE};

// Request tracing
pub use tracing::{create_request_span, new_request_id, MakeRequestUuid, REQUEST_ID_HEADER};
