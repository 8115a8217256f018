//! Domain Models
//!
//! Holdings as stored, holdings as reported, and the records each analytics
//! operation returns. Uses `rust_decimal` for all monetary values.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::analytics::checked;
use crate::error::{AdvisorError, Result};

/// One owned position, as stored in the snapshot
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Ticker symbol (e.g., "AAPL")
    pub ticker: String,

    /// Display name
    pub name: String,

    /// Units held
    pub quantity: Decimal,

    /// Cost basis per unit
    pub purchase_price: Decimal,

    /// Latest known price per unit
    pub current_price: Decimal,
}

impl Holding {
    pub fn new(
        ticker: impl Into<String>,
        name: impl Into<String>,
        quantity: Decimal,
        purchase_price: Decimal,
        current_price: Decimal,
    ) -> Self {
        Self {
            ticker: ticker.into(),
            name: name.into(),
            quantity,
            purchase_price,
            current_price,
        }
    }

    /// Unrounded current value (quantity * current price)
    pub fn market_value(&self) -> Result<Decimal> {
        checked::mul(self.quantity, self.current_price, &format!("market value of {}", self.ticker))
    }

    /// Unrounded cost (quantity * purchase price)
    pub fn cost(&self) -> Result<Decimal> {
        checked::mul(self.quantity, self.purchase_price, &format!("cost of {}", self.ticker))
    }

    /// Case-insensitive ticker match
    pub fn matches_ticker(&self, ticker: &str) -> bool {
        self.ticker.to_uppercase() == ticker.to_uppercase()
    }
}

/// A holding with derived valuation fields, each rounded to cents
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnrichedHolding {
    pub ticker: String,
    pub name: String,
    pub quantity: Decimal,
    pub purchase_price: Decimal,
    pub current_price: Decimal,

    /// quantity * current_price
    pub total_value: Decimal,

    /// quantity * purchase_price
    pub total_cost: Decimal,

    /// total_value - total_cost
    pub profit_loss: Decimal,

    /// profit_loss / total_cost * 100, zero when nothing was paid
    pub profit_loss_pct: Decimal,
}

impl EnrichedHolding {
    /// The stored fields this holding was derived from
    pub fn raw(&self) -> Holding {
        Holding {
            ticker: self.ticker.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            purchase_price: self.purchase_price,
            current_price: self.current_price,
        }
    }

    /// Unrounded current value, recomputed from the stored fields
    pub fn market_value(&self) -> Result<Decimal> {
        checked::mul(self.quantity, self.current_price, &format!("market value of {}", self.ticker))
    }
}

/// The holdings collection as loaded from a store
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Holdings in stored order
    #[serde(default)]
    pub holdings: Vec<Holding>,
}

impl Snapshot {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

/// Portfolio totals as reported alongside the holdings list
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingsTotals {
    pub total_holdings: usize,
    pub total_portfolio_value: Decimal,
    pub total_portfolio_cost: Decimal,
    pub overall_profit_loss: Decimal,
}

/// Portfolio totals plus the overall return percentage
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    #[serde(flatten)]
    pub totals: HoldingsTotals,
    pub overall_profit_loss_pct: Decimal,
}

/// Result of the get-all-holdings operation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HoldingsOverview {
    pub holdings: Vec<EnrichedHolding>,
    pub summary: HoldingsTotals,
}

/// Result of a ticker lookup: the holding, or an `{error}` payload
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoldingLookup {
    Found(EnrichedHolding),
    NotFound { error: String },
}

impl HoldingLookup {
    pub fn not_found(ticker: &str) -> Self {
        HoldingLookup::NotFound {
            error: AdvisorError::HoldingNotFound(ticker.to_string()).to_string(),
        }
    }

    pub fn holding(&self) -> Option<&EnrichedHolding> {
        match self {
            HoldingLookup::Found(h) => Some(h),
            HoldingLookup::NotFound { .. } => None,
        }
    }
}

/// One entry of the ranked position list
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionWeight {
    pub ticker: String,
    pub name: String,
    pub weight_pct: Decimal,
}

/// Sector and position concentration of a portfolio
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DiversificationReport {
    /// Sector -> percent of total current value
    pub sector_weights: BTreeMap<String, Decimal>,

    /// Largest positions first, at most ten
    pub position_weights: Vec<PositionWeight>,

    /// Herfindahl-Hirschman Index over value fractions (0..1)
    pub hhi: Decimal,

    /// Weight of the largest position, in percent
    pub top_position_weight: Decimal,

    pub num_holdings: usize,

    /// Human-readable interpretation
    pub notes: String,
}

impl DiversificationReport {
    pub fn num_sectors(&self) -> usize {
        self.sector_weights.len()
    }
}

/// Coarse risk label derived from the score
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// `>= 8` High, `>= 5` Moderate, otherwise Low
    pub fn from_score(score: Decimal) -> Self {
        if score >= Decimal::from(8) {
            RiskLevel::High
        } else if score >= Decimal::from(5) {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Moderate => write!(f, "Moderate"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

/// The quantities that fed risk scoring
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskInputs {
    pub top_position_weight_pct: Decimal,
    pub hhi: Decimal,
    pub num_holdings: usize,
    pub num_sectors: usize,

    /// Whether any holding is on the volatile-names list
    #[serde(skip)]
    pub holds_volatile_names: bool,
}

/// Heuristic risk score with its explanation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// 1.0 ..= 10.0, one decimal
    pub risk_score: Decimal,
    pub risk_level: RiskLevel,

    /// Triggered rules, in evaluation order
    pub factors: Vec<String>,
    pub inputs: RiskInputs,
}
