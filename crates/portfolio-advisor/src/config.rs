//! Advisor Configuration
//!
//! Read from the environment (`.env` is loaded by the binary first).
//!
//! | Variable | Default |
//! |---|---|
//! | `PORTFOLIO_FILE` | `portfolio_data.json` |
//! | `PORTFOLIO_VOLATILE_TICKERS` | `TSLA,NVDA` |
//! | `PORTFOLIO_SECTORS` | none (`TICKER=Sector,...` overrides) |

use std::path::PathBuf;
use std::sync::Arc;

use crate::analytics::risk::DEFAULT_VOLATILE_TICKERS;
use crate::analytics::{PortfolioAnalytics, SectorMap};
use crate::error::{AdvisorError, Result};
use crate::store::JsonFileStore;

pub const DEFAULT_PORTFOLIO_FILE: &str = "portfolio_data.json";

#[derive(Clone, Debug)]
pub struct AdvisorConfig {
    /// Holdings snapshot location
    pub portfolio_file: PathBuf,

    /// Uppercased tickers that count as higher-volatility names
    pub volatile_tickers: Vec<String>,

    /// Default table plus any overrides
    pub sectors: SectorMap,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            portfolio_file: PathBuf::from(DEFAULT_PORTFOLIO_FILE),
            volatile_tickers: DEFAULT_VOLATILE_TICKERS.iter().map(|t| t.to_string()).collect(),
            sectors: SectorMap::default(),
        }
    }
}

impl AdvisorConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test map, ...)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(path) = lookup("PORTFOLIO_FILE").filter(|p| !p.trim().is_empty()) {
            config.portfolio_file = PathBuf::from(path.trim());
        }

        if let Some(list) = lookup("PORTFOLIO_VOLATILE_TICKERS") {
            config.volatile_tickers = split_list(&list).map(str::to_uppercase).collect();
        }

        if let Some(overrides) = lookup("PORTFOLIO_SECTORS") {
            let overrides = parse_sector_overrides(&overrides)?;
            config.sectors = config.sectors.merged_with(&overrides);
        }

        Ok(config)
    }

    /// Analytics over the configured JSON file
    pub fn analytics(&self) -> PortfolioAnalytics {
        PortfolioAnalytics::new(
            Arc::new(JsonFileStore::new(&self.portfolio_file)),
            self.sectors.clone(),
            &self.volatile_tickers,
        )
    }
}

fn split_list(s: &str) -> impl Iterator<Item = &str> {
    s.split(',').map(str::trim).filter(|item| !item.is_empty())
}

/// Parse `AAPL=Technology, XOM=Energy`
fn parse_sector_overrides(list: &str) -> Result<SectorMap> {
    let mut pairs = Vec::new();
    for entry in split_list(list) {
        let (ticker, sector) = entry.split_once('=').ok_or_else(|| {
            AdvisorError::Config(format!("PORTFOLIO_SECTORS entry '{}' is not TICKER=Sector", entry))
        })?;
        let (ticker, sector) = (ticker.trim(), sector.trim());
        if ticker.is_empty() || sector.is_empty() {
            return Err(AdvisorError::Config(format!(
                "PORTFOLIO_SECTORS entry '{}' has an empty ticker or sector",
                entry
            )));
        }
        pairs.push((ticker.to_string(), sector.to_string()));
    }
    Ok(SectorMap::from_pairs(pairs))
}
