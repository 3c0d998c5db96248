// ABOUTME: HTTP server assembly: route merging, middleware layers and the serve loop
// ABOUTME: Binds the configured address and shuts down gracefully on Ctrl+C
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! HTTP server

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{body::Body, http::Request, middleware, Router};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::config::environment::ServerConfig;
use crate::middleware::{
    create_request_span, panic_response, setup_cors, timeout_middleware, MakeRequestUuid,
};
use crate::resources::ServerResources;
use crate::routes::{ChatRoutes, HealthRoutes};

/// Extra time allowed on top of the outbound timeouts before a request is abandoned
const REQUEST_TIMEOUT_MARGIN_SECS: u64 = 5;

/// Overall request timeout
///
/// A chat turn can make one generation call and one video search in sequence.
#[must_use]
pub const fn request_timeout(config: &ServerConfig) -> Duration {
    Duration::from_secs(
        config
            .external_timeout_secs
            .saturating_mul(2)
            .saturating_add(REQUEST_TIMEOUT_MARGIN_SECS),
    )
}

/// Build the application router with all middleware applied
pub fn build_app(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);
    let timeout = request_timeout(&resources.config);

    Router::new()
        .merge(ChatRoutes::routes(Arc::clone(&resources)))
        .merge(HealthRoutes::routes(resources))
        .layer(cors)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(timeout, timeout_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| create_request_span(request)),
        )
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Run the server until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if resources cannot be built or the address cannot be bound
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let host = config.host.clone();
    let port = config.http_port;
    for warning in config.production_warnings() {
        warn!(warning, "Production configuration");
    }

    let resources =
        Arc::new(ServerResources::from_config(config).context("Failed to build server resources")?);
    let app = build_app(resources);

    let listener = bind_listener(&host, port).await?;
    let addr = listener
        .local_addr()
        .context("Failed to read bound address")?;
    info!(%addr, "FitBot server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("FitBot server stopped");
    Ok(())
}

/// Bind the listen socket; `host` may be an IP address or a resolvable hostname
///
/// # Errors
///
/// Returns an error if the host does not resolve or the port cannot be bound
pub async fn bind_listener(host: &str, port: u16) -> Result<TcpListener> {
    TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind {host}:{port}"))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
