//! Portfolio totals
//!
//! Totals add up the per-holding figures exactly as reported (already
//! rounded to cents), so a summary always agrees with the rows beside it.

use rust_decimal::Decimal;

use super::checked;
use crate::error::Result;
use crate::model::{EnrichedHolding, HoldingsTotals, PortfolioSummary};

pub fn totals(holdings: &[EnrichedHolding]) -> Result<HoldingsTotals> {
    let value = checked::sum(holdings.iter().map(|h| h.total_value), "total portfolio value")?;
    let cost = checked::sum(holdings.iter().map(|h| h.total_cost), "total portfolio cost")?;
    let profit_loss = checked::sum(holdings.iter().map(|h| h.profit_loss), "overall profit/loss")?;

    Ok(HoldingsTotals {
        total_holdings: holdings.len(),
        total_portfolio_value: value.round_dp(2),
        total_portfolio_cost: cost.round_dp(2),
        overall_profit_loss: profit_loss.round_dp(2),
    })
}

pub fn summarize(holdings: &[EnrichedHolding]) -> Result<PortfolioSummary> {
    let totals = totals(holdings)?;
    let overall_profit_loss_pct = if totals.total_portfolio_cost > Decimal::ZERO {
        checked::percent(
            totals.overall_profit_loss,
            totals.total_portfolio_cost,
            "overall profit/loss %",
        )?
        .round_dp(2)
    } else {
        Decimal::ZERO
    };

    Ok(PortfolioSummary {
        totals,
        overall_profit_loss_pct,
    })
}
