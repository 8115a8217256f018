//! HTTP Handlers

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;

use agent_core::{AgentError, ToolCall, ToolResult, ToolSchema};

use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub tools: usize,
    pub store: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(err: &AgentError) -> ApiError {
    let (status, code) = match err {
        AgentError::ToolNotFound(_) => (StatusCode::NOT_FOUND, "TOOL_NOT_FOUND"),
        AgentError::ToolValidation(_) | AgentError::Parse(_) => (StatusCode::BAD_REQUEST, "INVALID_INPUT"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "TOOL_ERROR"),
    };
    (
        status,
        Json(ErrorResponse {
            error: err.user_message(),
            code: code.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        tools: state.tools.len(),
        store: state.store.clone(),
    })
}

/// Tool schemas, sorted by name
pub async fn list_tools(State(state): State<AppState>) -> Json<Vec<ToolSchema>> {
    Json(state.tools.schemas())
}

/// Decode a request body into tool arguments; an empty body means no arguments
fn parse_arguments(body: &[u8]) -> Result<HashMap<String, serde_json::Value>, AgentError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(HashMap::new());
    }
    serde_json::from_slice(body)
        .map_err(|e| AgentError::Parse(format!("body must be a JSON object of arguments: {}", e)))
}

/// Run one tool; the body is its arguments object (optional)
pub async fn call_tool(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolResult>, ApiError> {
    let arguments = parse_arguments(&body).map_err(|e| {
        tracing::warn!(tool = %name, "Rejected tool call: {}", e);
        api_error(&e)
    })?;

    let call = ToolCall {
        name,
        arguments,
        id: Some(uuid::Uuid::new_v4().to_string()),
    };

    let result = state.tools.execute(&call).await.map_err(|e| {
        if matches!(e, AgentError::ToolExecution(_) | AgentError::Io(_)) {
            tracing::error!(tool = %call.name, "Tool error: {}", e);
        } else {
            tracing::warn!(tool = %call.name, "Rejected tool call: {}", e);
        }
        api_error(&e)
    })?;

    Ok(Json(result))
}
