//! In-memory store
//!
//! Fixed holdings for tests and demos.

use super::HoldingsStore;
use crate::error::Result;
use crate::model::{Holding, Snapshot};

/// Store that always returns the same holdings
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    holdings: Vec<Holding>,
}

impl MemoryStore {
    pub fn new(holdings: Vec<Holding>) -> Self {
        Self { holdings }
    }
}

impl HoldingsStore for MemoryStore {
    fn load(&self) -> Result<Snapshot> {
        Ok(Snapshot::new(self.holdings.clone()))
    }

    fn describe(&self) -> String {
        format!("in-memory ({} holdings)", self.holdings.len())
    }
}
