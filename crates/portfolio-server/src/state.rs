//! Application State

use std::sync::Arc;

use agent_core::ToolRegistry;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Tool registry with the portfolio tools
    pub tools: Arc<ToolRegistry>,

    /// Holdings store description, for health output
    pub store: String,
}
