//! Diversification Tool

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema};

use crate::analytics::PortfolioAnalytics;

/// `assess_diversification`
pub struct DiversificationTool {
    analytics: Arc<PortfolioAnalytics>,
}

impl DiversificationTool {
    pub const NAME: &'static str = "assess_diversification";

    pub fn new(analytics: Arc<PortfolioAnalytics>) -> Self {
        Self { analytics }
    }
}

#[async_trait]
impl Tool for DiversificationTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Assess portfolio diversification: sector weights, top position weights, Herfindahl-Hirschman Index (0-1, lower is more diversified), largest position weight and a brief interpretation.".into(),
            parameters: Vec::new(),
            category: Some("analysis".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<ToolResult> {
        let report = self.analytics.diversification()?;
        ToolResult::json(Self::NAME, &report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_empty_portfolio_payload() {
        let analytics = Arc::new(PortfolioAnalytics::with_store(Arc::new(MemoryStore::default())));
        let result = DiversificationTool::new(analytics)
            .execute(&ToolCall::new(DiversificationTool::NAME))
            .await
            .unwrap();

        assert_eq!(
            result.data.unwrap(),
            serde_json::json!({
                "sector_weights": {},
                "position_weights": [],
                "hhi": 0.0,
                "top_position_weight": 0.0,
                "num_holdings": 0,
                "notes": "No holdings found.",
            })
        );
    }
}
