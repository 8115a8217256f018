//! Ticker → sector classification

use std::collections::HashMap;

/// Sector name used for tickers the table does not know
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// Immutable ticker → sector table, keyed by uppercased ticker
#[derive(Clone, Debug)]
pub struct SectorMap {
    sectors: HashMap<String, String>,
}

impl Default for SectorMap {
    /// Minimal table covering the common demo tickers
    fn default() -> Self {
        Self::from_pairs([
            ("AAPL", "Technology"),
            ("MSFT", "Technology"),
            ("GOOGL", "Communication Services"),
            ("AMZN", "Consumer Discretionary"),
            ("TSLA", "Consumer Discretionary"),
            ("META", "Communication Services"),
            ("NVDA", "Technology"),
            ("NFLX", "Communication Services"),
        ])
    }
}

impl SectorMap {
    pub fn from_pairs<I, T, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, S)>,
        T: AsRef<str>,
        S: Into<String>,
    {
        let sectors = pairs
            .into_iter()
            .map(|(ticker, sector)| (ticker.as_ref().to_uppercase(), sector.into()))
            .collect();
        Self { sectors }
    }

    /// Copy of this table with `overrides` taking precedence
    pub fn merged_with(&self, overrides: &SectorMap) -> Self {
        let mut sectors = self.sectors.clone();
        sectors.extend(overrides.sectors.iter().map(|(k, v)| (k.clone(), v.clone())));
        Self { sectors }
    }

    /// Sector for a ticker, case-insensitive, `Unknown` when unmapped
    pub fn sector_of(&self, ticker: &str) -> &str {
        self.sectors
            .get(&ticker.to_uppercase())
            .map_or(UNKNOWN_SECTOR, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}
