//! # agent-core
//!
//! Tool abstraction shared by the portfolio tool servers.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Transport (stdio / HTTP)                │
//! │                            │                              │
//! │                  ┌─────────▼─────────┐                    │
//! │                  │   ToolRegistry    │  dispatch by name  │
//! │                  └─────────┬─────────┘                    │
//! │        ┌───────────────────┼───────────────────┐          │
//! │   ┌────▼────┐         ┌────▼────┐         ┌────▼────┐     │
//! │   │  Tool   │         │  Tool   │   ...   │  Tool   │     │
//! │   └─────────┘         └─────────┘         └─────────┘     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Transports never look inside a tool; they hand a [`ToolCall`] to the
//! registry and relay the [`ToolResult`].

pub mod error;
pub mod tool;

pub use error::{AgentError, Result};
pub use tool::{Tool, ToolCall, ToolRegistry, ToolResult, ToolSchema};
