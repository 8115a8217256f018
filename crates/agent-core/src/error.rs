//! Error Types

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Tool layer error types
#[derive(Error, Debug)]
pub enum AgentError {
    /// Tool not found in registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool arguments failed validation
    #[error("Tool validation error: {0}")]
    ToolValidation(String),

    /// Tool ran but could not produce a result
    #[error("Tool execution error: {0}")]
    ToolExecution(String),

    /// Malformed protocol input
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AgentError {
    /// Convert to a user-friendly message
    pub fn user_message(&self) -> String {
        match self {
            AgentError::ToolNotFound(name) => format!("The tool '{}' is not available.", name),
            AgentError::ToolValidation(msg) => format!("Invalid tool input: {}", msg),
            AgentError::ToolExecution(msg) => format!("Tool error: {}", msg),
            AgentError::Parse(msg) => format!("Could not understand the request: {}", msg),
            AgentError::Config(_) => "The server is misconfigured.".into(),
            AgentError::Io(_) | AgentError::Json(_) => "An unexpected error occurred.".into(),
        }
    }
}
