//! Holding enrichment
//!
//! Each derived field is computed from the stored fields and rounded to
//! cents on its own; nothing is derived from an already-rounded field.

use rust_decimal::Decimal;

use super::checked;
use crate::error::Result;
use crate::model::{EnrichedHolding, Holding};

pub fn enrich(holding: &Holding) -> Result<EnrichedHolding> {
    let total_cost = holding.cost()?;
    let total_value = holding.market_value()?;
    let profit_loss = checked::sub(total_value, total_cost, &format!("profit/loss of {}", holding.ticker))?;
    let profit_loss_pct = if total_cost > Decimal::ZERO {
        checked::percent(profit_loss, total_cost, &format!("profit/loss % of {}", holding.ticker))?
    } else {
        Decimal::ZERO
    };

    Ok(EnrichedHolding {
        ticker: holding.ticker.clone(),
        name: holding.name.clone(),
        quantity: holding.quantity,
        purchase_price: holding.purchase_price,
        current_price: holding.current_price,
        total_value: total_value.round_dp(2),
        total_cost: total_cost.round_dp(2),
        profit_loss: profit_loss.round_dp(2),
        profit_loss_pct: profit_loss_pct.round_dp(2),
    })
}
