//! Portfolio Tracker Tools
//!
//! Holdings listing, single-ticker lookup, and the portfolio summary.

use std::sync::Arc;

use async_trait::async_trait;

use agent_core::{
    tool::ParameterSchema,
    Result as CoreResult, Tool, ToolCall, ToolResult, ToolSchema,
};

use crate::analytics::PortfolioAnalytics;

/// `get_all_holdings`
pub struct AllHoldingsTool {
    analytics: Arc<PortfolioAnalytics>,
}

impl AllHoldingsTool {
    pub const NAME: &'static str = "get_all_holdings";

    pub fn new(analytics: Arc<PortfolioAnalytics>) -> Self {
        Self { analytics }
    }
}

#[async_trait]
impl Tool for AllHoldingsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get all portfolio holdings with current values and profit/loss, plus portfolio totals.".into(),
            parameters: Vec::new(),
            category: Some("portfolio".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<ToolResult> {
        let overview = self.analytics.all_holdings()?;
        ToolResult::json(Self::NAME, &overview)
    }
}

/// `get_holding_by_ticker`
pub struct HoldingByTickerTool {
    analytics: Arc<PortfolioAnalytics>,
}

impl HoldingByTickerTool {
    pub const NAME: &'static str = "get_holding_by_ticker";

    pub fn new(analytics: Arc<PortfolioAnalytics>) -> Self {
        Self { analytics }
    }
}

#[async_trait]
impl Tool for HoldingByTickerTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get details for a specific holding by ticker symbol. Returns an object with an 'error' key if the ticker is not held.".into(),
            parameters: vec![ParameterSchema::required_string(
                "ticker",
                "Stock ticker symbol (e.g., 'AAPL', 'MSFT'), case-insensitive",
            )],
            category: Some("portfolio".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, call: &ToolCall) -> CoreResult<ToolResult> {
        let ticker = call.str_arg("ticker").ok_or_else(|| {
            agent_core::AgentError::ToolValidation("ticker must be a string".into())
        })?;

        // a miss is reported in the payload, not as a failure
        let lookup = self.analytics.holding_by_ticker(ticker)?;
        ToolResult::json(Self::NAME, &lookup)
    }
}

/// `get_portfolio_summary`
pub struct PortfolioSummaryTool {
    analytics: Arc<PortfolioAnalytics>,
}

impl PortfolioSummaryTool {
    pub const NAME: &'static str = "get_portfolio_summary";

    pub fn new(analytics: Arc<PortfolioAnalytics>) -> Self {
        Self { analytics }
    }
}

#[async_trait]
impl Tool for PortfolioSummaryTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.into(),
            description: "Get a summary of the entire portfolio: number of holdings, total value, total cost, overall profit/loss amount and percentage.".into(),
            parameters: Vec::new(),
            category: Some("portfolio".into()),
            has_side_effects: false,
        }
    }

    async fn execute(&self, _call: &ToolCall) -> CoreResult<ToolResult> {
        let summary = self.analytics.summary()?;
        ToolResult::json(Self::NAME, &summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Holding;
    use crate::store::MemoryStore;
    use agent_core::AgentError;
    use rust_decimal_macros::dec;

    fn analytics() -> Arc<PortfolioAnalytics> {
        Arc::new(PortfolioAnalytics::with_store(Arc::new(MemoryStore::new(vec![
            Holding::new("AAPL", "Apple", dec!(10), dec!(150), dec!(180)),
            Holding::new("NVDA", "NVIDIA", dec!(2), dec!(400), dec!(500)),
        ]))))
    }

    #[tokio::test]
    async fn test_all_holdings_payload() {
        let tool = AllHoldingsTool::new(analytics());
        let result = tool.execute(&ToolCall::new(AllHoldingsTool::NAME)).await.unwrap();

        assert!(result.success);
        let data = result.data.unwrap();
        assert_eq!(data["holdings"].as_array().unwrap().len(), 2);
        assert_eq!(data["holdings"][0]["total_value"], 1800.0);
        assert_eq!(data["summary"]["total_holdings"], 2);
        assert_eq!(data["summary"]["total_portfolio_value"], 2800.0);
        assert!(data["summary"].get("overall_profit_loss_pct").is_none());
    }

    #[tokio::test]
    async fn test_lookup_by_ticker() {
        let tool = HoldingByTickerTool::new(analytics());

        let call = ToolCall::new(HoldingByTickerTool::NAME).with_argument("ticker", serde_json::json!("nvda"));
        let data = tool.execute(&call).await.unwrap().data.unwrap();
        assert_eq!(data["ticker"], "NVDA");
        assert_eq!(data["profit_loss_pct"], 25.0);

        let call = ToolCall::new(HoldingByTickerTool::NAME).with_argument("ticker", serde_json::json!("IBM"));
        let result = tool.execute(&call).await.unwrap();
        assert!(result.success);
        assert_eq!(
            result.data.unwrap(),
            serde_json::json!({ "error": "Holding with ticker 'IBM' not found" })
        );
    }

    #[tokio::test]
    async fn test_lookup_rejects_non_string_ticker() {
        let tool = HoldingByTickerTool::new(analytics());
        let call = ToolCall::new(HoldingByTickerTool::NAME).with_argument("ticker", serde_json::json!(42));

        let err = tool.execute(&call).await.unwrap_err();
        assert!(matches!(err, AgentError::ToolValidation(_)));
    }

    #[tokio::test]
    async fn test_summary_payload() {
        let tool = PortfolioSummaryTool::new(analytics());
        let data = tool
            .execute(&ToolCall::new(PortfolioSummaryTool::NAME))
            .await
            .unwrap()
            .data
            .unwrap();

        // (300 + 200) / (1500 + 800)
        assert_eq!(data["overall_profit_loss"], 500.0);
        let pct = data["overall_profit_loss_pct"].as_f64().unwrap();
        assert!((pct - 21.74).abs() < 1e-9, "pct = {}", pct);
    }

    #[tokio::test]
    async fn test_overflowing_snapshot_is_execution_error() {
        let analytics = Arc::new(PortfolioAnalytics::with_store(Arc::new(MemoryStore::new(vec![
            Holding::new("BIG", "Big", dec!(100000000000000000000), dec!(1), dec!(10000000000)),
        ]))));

        let err = AllHoldingsTool::new(analytics)
            .execute(&ToolCall::new(AllHoldingsTool::NAME))
            .await
            .unwrap_err();
        assert!(matches!(err, AgentError::ToolExecution(ref m) if m.contains("overflow")));
    }
}
