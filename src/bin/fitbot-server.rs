// ABOUTME: FitBot HTTP server binary entry point
// ABOUTME: Loads .env and environment configuration, applies CLI overrides and starts serving
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 FitBot Contributors

//! # FitBot Server Binary
//!
//! Starts the chat API. `GEMINI_API_KEY` must be set, either in the
//! environment or in a `.env` file in the working directory.

use anyhow::{Context, Result};
use clap::Parser;
use fitbot::{config::environment::ServerConfig, constants::endpoints, logging, server};
use tracing::info;

#[derive(Parser)]
#[command(name = "fitbot-server")]
#[command(about = "FitBot - fitness chat API with knowledge base answers and AI fallback")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Override listen host
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // A missing .env file is normal outside local development
    let _ = dotenvy::dotenv();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env().context("Failed to load configuration")?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(host) = args.host {
        config.host = host;
    }

    info!("{}", config.summary());
    display_available_endpoints(&config);

    server::run_server(config).await
}

fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);
    info!("=== Available Endpoints ===");
    info!("  POST {base}{}", endpoints::CHAT);
    info!("  POST {base}{}", endpoints::CLEAR_HISTORY);
    info!("  GET  {base}{}?session_id=<id>", endpoints::GET_HISTORY);
    info!("  GET  {base}{}", endpoints::HEALTH);
    info!("  GET  {base}{}", endpoints::READY);
}
