//! Risk Analyzer Tool
//!
//! Heuristic 1-10 risk score with the factors that produced it.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use crate::analytics::PortfolioAnalytics;

/// `assess_risk`
pub struct RiskAnalyzerTool {
    analytics: Arc<PortfolioAnalytics>,
}

impl RiskAnalyzerTool {
    pub const NAME: &'static str = "assess_risk";

    pub fn new(analytics: Arc<PortfolioAnalytics>) -> Self {
        Self { analytics }
    }
}

#[async_trait]
impl Tool for RiskAnalyzerTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Provide a simple heuristic risk assessment (score 1-10, higher is riskier) considering position concentration, HHI, sector concentration, higher-volatility names and number of holdings.".into(),
            parameters: Vec::new(),
            category: Some("analysis".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<ToolResult> {
        let assessment = self.analytics.risk()?;
        tracing::info!(
            score = %assessment.risk_score,
            level = %assessment.risk_level,
            "risk assessed"
        );
        ToolResult::json(Self::NAME, &assessment)
    }
}
