//! Shared test registry

use std::sync::Arc;

use agent_core::ToolRegistry;
use portfolio_advisor::{register_portfolio_tools, Holding, MemoryStore, PortfolioAnalytics};

pub fn registry() -> Arc<ToolRegistry> {
    let holdings: Vec<Holding> = serde_json::from_value(serde_json::json!([
        { "ticker": "AAPL", "name": "Apple Inc.", "quantity": 10, "purchase_price": 150, "current_price": 180 },
        { "ticker": "MSFT", "name": "Microsoft", "quantity": 5, "purchase_price": 300, "current_price": 420 },
    ]))
    .unwrap();

    let analytics = Arc::new(PortfolioAnalytics::with_store(Arc::new(MemoryStore::new(holdings))));
    let mut tools = ToolRegistry::new();
    register_portfolio_tools(&mut tools, analytics);
    Arc::new(tools)
}
