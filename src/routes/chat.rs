// ABOUTME: Chat route handlers for the message, history reset and history fetch endpoints
// ABOUTME: Thin axum handlers that decode JSON and delegate to the chat service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! Chat routes
//!
//! - `POST /chat` answers a message
//! - `POST /clear-history` forgets a session
//! - `GET /get-history` lists a session's turns

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::constants::{endpoints, fallback_messages};
use crate::errors::{AppError, ErrorCode};
use crate::resources::ServerResources;
use crate::services::ChatInput;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Body of `POST /chat`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequestBody {
    /// Message text
    #[serde(default)]
    pub message: Option<String>,
    /// Session id, `"default"` when absent
    #[serde(default)]
    pub session_id: Option<String>,
    /// Base64 image or data URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Body of a successful `POST /chat`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponseBody {
    /// Reply text
    pub response: String,
    /// Whether the client should animate the reply
    #[serde(rename = "shouldType")]
    pub should_type: bool,
}

/// Body of `POST /clear-history`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClearHistoryRequest {
    /// Session id, `"default"` when absent
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Query of `GET /get-history`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    /// Session id, `"default"` when absent
    pub session_id: Option<String>,
}

/// Body of `GET /get-history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryResponse {
    /// Ordered turns
    pub history: Vec<String>,
}

/// Body of `POST /clear-history`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Acknowledgement text
    pub message: String,
}

// ============================================================================
// Chat Routes
// ============================================================================

/// Chat routes handler
pub struct ChatRoutes;

impl ChatRoutes {
    /// Create all chat routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::CHAT, post(Self::chat))
            .route(endpoints::CLEAR_HISTORY, post(Self::clear_history))
            .route(endpoints::GET_HISTORY, get(Self::get_history))
            .with_state(resources)
    }

    /// Answer a chat message
    async fn chat(
        State(resources): State<Arc<ServerResources>>,
        payload: Result<Json<ChatRequestBody>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let Json(body) = payload.map_err(|rejection| {
            AppError::new(
                ErrorCode::InvalidFormat,
                format!("Invalid chat request: {}", rejection.body_text()),
            )
        })?;

        let output = resources
            .chat
            .handle_message(ChatInput {
                message: body.message.unwrap_or_default(),
                session_id: body.session_id,
                image: body.image,
            })
            .await
            .map_err(|e| {
                if e.code.http_status() >= 500 {
                    error!(error = %e, "Chat request failed");
                }
                e
            })?;

        Ok((
            StatusCode::OK,
            Json(ChatResponseBody {
                response: output.response,
                should_type: output.should_type,
            }),
        )
            .into_response())
    }

    /// Forget a session; a missing or unreadable body resets the default session
    async fn clear_history(
        State(resources): State<Arc<ServerResources>>,
        payload: Option<Json<ClearHistoryRequest>>,
    ) -> Result<Response, AppError> {
        let body = payload.map(|Json(b)| b).unwrap_or_default();
        resources
            .chat
            .clear_history(body.session_id.as_deref())
            .await?;
        info!(
            session = body.session_id.as_deref().unwrap_or("default"),
            "Chat history cleared"
        );

        Ok((
            StatusCode::OK,
            Json(MessageResponse {
                message: fallback_messages::HISTORY_CLEARED.to_owned(),
            }),
        )
            .into_response())
    }

    /// List a session's turns
    async fn get_history(
        State(resources): State<Arc<ServerResources>>,
        Query(query): Query<HistoryQuery>,
    ) -> Result<Response, AppError> {
        let history = resources.chat.history(query.session_id.as_deref()).await?;
        Ok((StatusCode::OK, Json(HistoryResponse { history })).into_response())
    }
}
