//! Holdings Stores
//!
//! Where snapshots come from. Every analytics call asks the store for a
//! fresh snapshot; nothing is cached.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::error::Result;
use crate::model::Snapshot;

/// Source of holdings snapshots (Strategy pattern)
///
/// Implement this for each backing store: JSON file, broker export, etc.
pub trait HoldingsStore: Send + Sync {
    /// Load the current snapshot. An absent store yields an empty snapshot.
    fn load(&self) -> Result<Snapshot>;

    /// Store description for logs
    fn describe(&self) -> String;
}
