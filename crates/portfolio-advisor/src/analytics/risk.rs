//! Risk Scorer
//!
//! Heuristic 1-10 risk score. Each category is a ladder of rules checked
//! top to bottom; the first rule that matches adds its delta and factor,
//! and the rest of that category is skipped.
//!
//! ```text
//! base 1.0
//!  + top position   >=40 +4 | >=25 +2 | >=15 +1
//!  + HHI            >=0.25 +3 | >=0.15 +2 | >=0.10 +1
//!  + sectors        <=2 +2 | <=3 +1
//!  + volatile names  +1
//!  + 1..=4 holdings  +1
//! clamp [1, 10] → >=8 High, >=5 Moderate, else Low
//! ```

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::diversification::DiversificationAssessor;
use crate::error::Result;
use crate::model::{EnrichedHolding, RiskAssessment, RiskInputs, RiskLevel};

/// Tickers treated as higher-volatility names unless configured otherwise
pub const DEFAULT_VOLATILE_TICKERS: [&str; 2] = ["TSLA", "NVDA"];

const BASE_SCORE: Decimal = dec!(1.0);
const MIN_SCORE: Decimal = dec!(1.0);
const MAX_SCORE: Decimal = dec!(10.0);

/// One rung of a scoring ladder
#[derive(Clone, Debug)]
pub struct ScoringRule {
    pub predicate: fn(&RiskInputs) -> bool,
    pub delta: Decimal,
    pub factor: &'static str,
}

/// Ordered rules; at most one fires
#[derive(Clone, Debug)]
pub struct RuleCategory {
    pub name: &'static str,
    pub rules: Vec<ScoringRule>,
}

impl RuleCategory {
    pub fn first_match(&self, inputs: &RiskInputs) -> Option<&ScoringRule> {
        self.rules.iter().find(|rule| (rule.predicate)(inputs))
    }
}

/// The standard scoring table
pub fn default_categories() -> Vec<RuleCategory> {
    vec![
        RuleCategory {
            name: "top_position",
            rules: vec![
                ScoringRule {
                    predicate: |i| i.top_position_weight_pct >= dec!(40),
                    delta: dec!(4),
                    factor: "Very high single-position concentration (>=40%).",
                },
                ScoringRule {
                    predicate: |i| i.top_position_weight_pct >= dec!(25),
                    delta: dec!(2),
                    factor: "High single-position concentration (>=25%).",
                },
                ScoringRule {
                    predicate: |i| i.top_position_weight_pct >= dec!(15),
                    delta: dec!(1),
                    factor: "Moderate single-position concentration (>=15%).",
                },
            ],
        },
        RuleCategory {
            name: "hhi",
            rules: vec![
                ScoringRule {
                    predicate: |i| i.hhi >= dec!(0.25),
                    delta: dec!(3),
                    factor: "High overall concentration by HHI (>=0.25).",
                },
                ScoringRule {
                    predicate: |i| i.hhi >= dec!(0.15),
                    delta: dec!(2),
                    factor: "Elevated concentration by HHI (>=0.15).",
                },
                ScoringRule {
                    predicate: |i| i.hhi >= dec!(0.10),
                    delta: dec!(1),
                    factor: "Some concentration by HHI (>=0.10).",
                },
            ],
        },
        RuleCategory {
            name: "sectors",
            rules: vec![
                ScoringRule {
                    predicate: |i| i.num_sectors <= 2,
                    delta: dec!(2),
                    factor: "Limited sector diversification (<=2 sectors).",
                },
                ScoringRule {
                    predicate: |i| i.num_sectors <= 3,
                    delta: dec!(1),
                    factor: "Concentrated across few sectors (<=3 sectors).",
                },
            ],
        },
        RuleCategory {
            name: "volatility",
            rules: vec![ScoringRule {
                predicate: |i| i.holds_volatile_names,
                delta: dec!(1),
                factor: "Includes higher-volatility names (e.g., TSLA/NVDA).",
            }],
        },
        RuleCategory {
            name: "holdings_count",
            rules: vec![ScoringRule {
                predicate: |i| i.num_holdings > 0 && i.num_holdings <= 4,
                delta: dec!(1),
                factor: "Few holdings (<=4) increases idiosyncratic risk.",
            }],
        },
    ]
}

/// Scores portfolios against a rule table
#[derive(Clone, Debug)]
pub struct RiskScorer {
    assessor: DiversificationAssessor,
    volatile_tickers: BTreeSet<String>,
    categories: Vec<RuleCategory>,
}

impl Default for RiskScorer {
    fn default() -> Self {
        Self::new(DiversificationAssessor::default(), DEFAULT_VOLATILE_TICKERS)
    }
}

impl RiskScorer {
    pub fn new<I, S>(assessor: DiversificationAssessor, volatile_tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            assessor,
            volatile_tickers: volatile_tickers
                .into_iter()
                .map(|t| t.as_ref().to_uppercase())
                .collect(),
            categories: default_categories(),
        }
    }

    /// Replace the rule table
    pub fn with_categories(mut self, categories: Vec<RuleCategory>) -> Self {
        self.categories = categories;
        self
    }

    /// Derive scoring inputs: a fresh diversification pass plus a ticker check
    pub fn inputs(&self, holdings: &[EnrichedHolding]) -> Result<RiskInputs> {
        let report = self.assessor.assess(holdings)?;
        let holds_volatile_names = holdings
            .iter()
            .any(|h| self.volatile_tickers.contains(&h.ticker.to_uppercase()));

        Ok(RiskInputs {
            top_position_weight_pct: report.top_position_weight,
            hhi: report.hhi,
            num_holdings: report.num_holdings,
            num_sectors: report.num_sectors(),
            holds_volatile_names,
        })
    }

    pub fn assess(&self, holdings: &[EnrichedHolding]) -> Result<RiskAssessment> {
        Ok(self.score(self.inputs(holdings)?))
    }

    /// Apply the rule table to precomputed inputs
    pub fn score(&self, inputs: RiskInputs) -> RiskAssessment {
        let mut score = BASE_SCORE;
        let mut factors = Vec::new();

        for category in &self.categories {
            if let Some(rule) = category.first_match(&inputs) {
                tracing::trace!(category = category.name, delta = %rule.delta, "risk rule matched");
                score += rule.delta;
                factors.push(rule.factor.to_string());
            }
        }

        let risk_score = score.clamp(MIN_SCORE, MAX_SCORE).round_dp(1);
        let risk_level = RiskLevel::from_score(risk_score);

        tracing::debug!(%risk_score, %risk_level, factors = factors.len(), "scored portfolio risk");

        RiskAssessment {
            risk_score,
            risk_level,
            factors,
            inputs,
        }
    }
}
