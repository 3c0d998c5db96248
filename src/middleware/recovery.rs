// ABOUTME: Failure middleware that turns panics and overlong requests into JSON error responses
// ABOUTME: Keeps every non-success response on the same {error, code} envelope as handler errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

use std::any::Any;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use crate::errors::AppError;

/// Message returned when a request exceeds the overall timeout
pub const TIMEOUT_MESSAGE: &str = "Request timed out";

/// Render a caught handler panic as a 500 with the panic text
///
/// Used with `CatchPanicLayer::custom`.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Request handler panicked");
    AppError::internal(format!("Internal server error: {detail}")).into_response()
}

/// Abandon a request that runs past `limit` and answer 500
///
/// ```rust,ignore
/// router.layer(middleware::from_fn_with_state(limit, timeout_middleware))
/// ```
pub async fn timeout_middleware(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            warn!(timeout_secs = limit.as_secs(), "Request exceeded timeout");
            AppError::internal(TIMEOUT_MESSAGE).into_response()
        }
    }
}
