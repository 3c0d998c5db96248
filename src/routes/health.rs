// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides liveness and readiness endpoints for load balancers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! Health check routes

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::constants::{endpoints, service_names};
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "service": service_names::FITBOT_SERVER,
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(
            State(resources): State<Arc<ServerResources>>,
        ) -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "ready",
                "model": resources.config.gemini.model,
                "video_suggestions": resources.external.video_enabled(),
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        Router::new()
            .route(endpoints::HEALTH, get(health_handler))
            .route(endpoints::READY, get(ready_handler))
            .with_state(resources)
    }
}
