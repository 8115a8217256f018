//! Error Types for Portfolio Advisor

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Malformed holdings store {}: {source}", path.display())]
    MalformedStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Holding with ticker '{0}' not found")]
    HoldingNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Arithmetic overflow computing {0}")]
    Overflow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Lookup misses never reach here; they are reported as payloads
impl From<AdvisorError> for agent_core::AgentError {
    fn from(err: AdvisorError) -> Self {
        match err {
            AdvisorError::Config(msg) => agent_core::AgentError::Config(msg),
            other => agent_core::AgentError::ToolExecution(other.to_string()),
        }
    }
}
