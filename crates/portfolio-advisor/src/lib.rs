//! # portfolio-advisor
//!
//! Read-only analytics over a local holdings snapshot, exposed as agent tools.
//!
//! ## Pipeline
//!
//! ```text
//! ┌──────────────────┐    ┌──────────┐    ┌──────────────────────────────┐
//! │ portfolio_data   │───►│  enrich  │───►│ summary / diversification /  │
//! │ .json (snapshot) │    │ (2 dp)   │    │ risk (1-10 heuristic)        │
//! └──────────────────┘    └──────────┘    └──────────────────────────────┘
//!                                                        │
//!                                                        ▼
//!                                          get_all_holdings, assess_risk, ...
//! ```
//!
//! ## Example: one holding
//!
//! ```text
//! AAPL  10 @ 150 → 180
//!   total_value 1800.00  total_cost 1500.00  profit_loss 300.00 (20.00%)
//!   weight 100%  HHI 1.0  sectors 1  → risk 10.0 (High)
//! ```
//!
//! Money, percentages and HHI are `rust_decimal::Decimal`; they serialize as
//! plain JSON numbers.

pub mod analytics;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod svckit;

pub use analytics::{PortfolioAnalytics, SectorMap};
pub use config::AdvisorConfig;
pub use error::{AdvisorError, Result};
pub use model::{
    DiversificationReport, EnrichedHolding, Holding, HoldingLookup, PortfolioSummary,
    RiskAssessment, RiskLevel, Snapshot,
};
pub use store::{HoldingsStore, JsonFileStore, MemoryStore};
pub use svckit::register_portfolio_tools;

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        AllHoldingsTool,
        DiversificationTool,
        HoldingByTickerTool,
        PortfolioSummaryTool,
        RiskAnalyzerTool,
    };
}

/// Instructions handed to a connecting assistant
pub const PORTFOLIO_ASSISTANT_PROMPT: &str = r#"You are a portfolio assistant with read-only access to a local holdings snapshot.

Use the tools whenever the user asks about current portfolio data:

- `get_all_holdings` - every holding with value, cost and profit/loss
- `get_holding_by_ticker` - one holding by ticker (case-insensitive)
- `get_portfolio_summary` - totals and overall profit/loss percentage
- `assess_diversification` - sector weights, top positions, HHI
- `assess_risk` - heuristic 1-10 risk score with contributing factors

The risk score is a simple heuristic, not investment advice. Say so when presenting it."#;
