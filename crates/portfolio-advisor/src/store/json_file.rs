//! JSON file store
//!
//! Reads `{"holdings": [...]}` from disk on every load.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::HoldingsStore;
use crate::error::{AdvisorError, Result};
use crate::model::Snapshot;

/// Holdings snapshot backed by a JSON file
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HoldingsStore for JsonFileStore {
    fn load(&self) -> Result<Snapshot> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "holdings file absent, using empty portfolio");
                return Ok(Snapshot::default());
            }
            Err(e) => return Err(AdvisorError::Io(e)),
        };

        let snapshot: Snapshot = serde_json::from_str(&content).map_err(|source| {
            tracing::warn!(path = %self.path.display(), error = %source, "malformed holdings file");
            AdvisorError::MalformedStore {
                path: self.path.clone(),
                source,
            }
        })?;

        tracing::debug!(
            path = %self.path.display(),
            holdings = snapshot.holdings.len(),
            "loaded holdings snapshot"
        );
        Ok(snapshot)
    }

    fn describe(&self) -> String {
        format!("json file {}", self.path.display())
    }
}
