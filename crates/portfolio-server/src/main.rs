//! portfolio-server
//!
//! Serves the portfolio tools over line-delimited JSON-RPC on stdio
//! (default) or as a small REST API.

mod config;
mod handlers;
mod state;
mod stdio;

#[cfg(test)]
mod fixtures;

use std::sync::Arc;

use axum::{routing::{get, post}, Router};
use tokio::io::BufReader;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::ToolRegistry;
use portfolio_advisor::{register_portfolio_tools, AdvisorConfig, PORTFOLIO_ASSISTANT_PROMPT};

use crate::config::{ServerConfig, Transport};
use crate::handlers::{call_tool, health_check, list_tools};
use crate::state::AppState;
use crate::stdio::RpcServer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment first so RUST_LOG from .env applies
    dotenvy::dotenv().ok();

    // stdout is the protocol channel; logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let advisor = AdvisorConfig::from_env()?;
    let server = ServerConfig::from_env()?;

    let analytics = Arc::new(advisor.analytics());
    let store = analytics.store().describe();
    tracing::info!("Holdings store: {}", store);

    let mut tools = ToolRegistry::new();
    register_portfolio_tools(&mut tools, analytics);

    tracing::info!("Registered {} tools:", tools.len());
    for name in tools.names() {
        tracing::info!("  • {}", name);
    }

    let tools = Arc::new(tools);
    tracing::info!("Transport: {}", server.transport);
    match server.transport {
        Transport::Stdio => {
            RpcServer::new(tools, PORTFOLIO_ASSISTANT_PROMPT)
                .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await?;
        }
        Transport::Http => serve_http(AppState { tools, store }, &server.bind_addr).await?,
    }

    Ok(())
}

async fn serve_http(state: AppState, addr: &str) -> anyhow::Result<()> {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/tools", get(list_tools))
        .route("/api/tools/{name}", post(call_tool))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("portfolio-server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health            - Health check");
    tracing::info!("  GET  /api/tools         - List tool schemas");
    tracing::info!("  POST /api/tools/{{name}}  - Run a tool (body: arguments)");

    axum::serve(listener, app).await?;

    Ok(())
}
