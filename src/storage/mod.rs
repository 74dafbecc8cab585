//! Storage layer
//!
//! - `models`: the immutable [`Record`]
//! - `versioned`: per-code append-only histories with lazy expiration
//! - `guard`: the process-wide reader/writer lock around the store
//! - `journal`: optional JSON Lines persistence

pub mod guard;
pub mod journal;
pub mod models;
pub mod versioned;

use std::sync::Arc;

pub use guard::LinkStore;
pub use journal::{FileJournal, Journal, NullJournal};
pub use models::Record;
pub use versioned::VersionedStore;

use crate::config::StorageConfig;
use crate::errors::Result;

/// Opens the journal named by the storage configuration.
pub fn open_journal(config: &StorageConfig) -> Result<Arc<dyn Journal>> {
    match config.journal_path() {
        Some(path) => Ok(Arc::new(FileJournal::open(path)?)),
        None => Ok(Arc::new(NullJournal)),
    }
}
