//! Service Kit - Agent Tools
//!
//! The portfolio operations wrapped as `agent_core::Tool`s. Each tool holds
//! a shared [`PortfolioAnalytics`] and reloads the snapshot on every call.

mod diversification;
mod portfolio_tracker;
mod risk_analyzer;

use std::sync::Arc;

use agent_core::ToolRegistry;

use crate::analytics::PortfolioAnalytics;

pub use diversification::DiversificationTool;
pub use portfolio_tracker::{AllHoldingsTool, HoldingByTickerTool, PortfolioSummaryTool};
pub use risk_analyzer::RiskAnalyzerTool;

/// Register all five portfolio tools against one analytics service
pub fn register_portfolio_tools(registry: &mut ToolRegistry, analytics: Arc<PortfolioAnalytics>) {
    registry.register(AllHoldingsTool::new(analytics.clone()));
    registry.register(HoldingByTickerTool::new(analytics.clone()));
    registry.register(PortfolioSummaryTool::new(analytics.clone()));
    registry.register(DiversificationTool::new(analytics.clone()));
    registry.register(RiskAnalyzerTool::new(analytics));
}
