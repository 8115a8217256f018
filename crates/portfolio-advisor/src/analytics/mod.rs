//! Portfolio Analytics
//!
//! Straight pipeline over a freshly loaded snapshot:
//!
//! ```text
//! HoldingsStore ─► enrich ─┬─► summary
//!                          └─► diversification ─► risk
//! ```
//!
//! Nothing is cached between calls; each operation reloads from the store.

pub(crate) mod checked;
pub mod diversification;
pub mod enrich;
pub mod risk;
pub mod sectors;
pub mod summary;

use std::sync::Arc;

pub use diversification::{ConcentrationFlags, DiversificationAssessor};
pub use enrich::enrich;
pub use risk::{RiskScorer, RuleCategory, ScoringRule};
pub use sectors::SectorMap;

use crate::error::Result;
use crate::model::{
    DiversificationReport, EnrichedHolding, HoldingLookup, HoldingsOverview, PortfolioSummary,
    RiskAssessment, Snapshot,
};
use crate::store::HoldingsStore;

/// The five portfolio operations, bound to one store
#[derive(Clone)]
pub struct PortfolioAnalytics {
    store: Arc<dyn HoldingsStore>,
    assessor: DiversificationAssessor,
    scorer: RiskScorer,
}

impl PortfolioAnalytics {
    pub fn new<I, S>(store: Arc<dyn HoldingsStore>, sectors: SectorMap, volatile_tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let assessor = DiversificationAssessor::new(sectors);
        let scorer = RiskScorer::new(assessor.clone(), volatile_tickers);
        Self {
            store,
            assessor,
            scorer,
        }
    }

    /// Default sector table and volatile names
    pub fn with_store(store: Arc<dyn HoldingsStore>) -> Self {
        Self::new(store, SectorMap::default(), risk::DEFAULT_VOLATILE_TICKERS)
    }

    pub fn store(&self) -> &dyn HoldingsStore {
        self.store.as_ref()
    }

    pub fn snapshot(&self) -> Result<Snapshot> {
        self.store.load()
    }

    pub fn enriched_holdings(&self) -> Result<Vec<EnrichedHolding>> {
        let snapshot = self.snapshot()?;
        snapshot.holdings.iter().map(enrich).collect()
    }

    /// Every holding with valuation fields, plus totals
    pub fn all_holdings(&self) -> Result<HoldingsOverview> {
        let holdings = self.enriched_holdings()?;
        let summary = summary::totals(&holdings)?;
        Ok(HoldingsOverview { holdings, summary })
    }

    /// First holding whose ticker matches, ignoring case
    pub fn holding_by_ticker(&self, ticker: &str) -> Result<HoldingLookup> {
        let snapshot = self.snapshot()?;
        match snapshot.holdings.iter().find(|h| h.matches_ticker(ticker)) {
            Some(holding) => Ok(HoldingLookup::Found(enrich(holding)?)),
            None => Ok(HoldingLookup::not_found(ticker)),
        }
    }

    pub fn summary(&self) -> Result<PortfolioSummary> {
        let holdings = self.enriched_holdings()?;
        summary::summarize(&holdings)
    }

    pub fn diversification(&self) -> Result<DiversificationReport> {
        let holdings = self.enriched_holdings()?;
        self.assessor.assess(&holdings)
    }

    pub fn risk(&self) -> Result<RiskAssessment> {
        let holdings = self.enriched_holdings()?;
        self.scorer.assess(&holdings)
    }
}
