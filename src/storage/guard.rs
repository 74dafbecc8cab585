//! Process-wide reader/writer coordination for the versioned store
//!
//! Reads (`resolve`, `history`, `list_current`) take the shared mode and the
//! single mutation (`append`) takes the exclusive mode, so a reader sees the
//! store entirely before or entirely after any append.
//!
//! `parking_lot::RwLock` is task-fair: once a writer is queued, new readers
//! wait behind it, so a continuous stream of redirects cannot starve `create`.
//! One lock covers the whole store; writes to different codes are
//! serialized too.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{info, trace};

use super::journal::Journal;
use super::{Record, VersionedStore};
use crate::errors::Result;

#[derive(Debug, Default)]
pub struct LinkStore {
    inner: RwLock<VersionedStore>,
}

impl LinkStore {
    pub fn new(store: VersionedStore) -> Self {
        Self {
            inner: RwLock::new(store),
        }
    }

    /// Rebuilds the store from a journal, replaying records in file order.
    pub fn restore(journal: &dyn Journal) -> Result<Self> {
        let records = journal.load()?;
        let store = VersionedStore::from_records(records);
        info!(
            "Restored {} codes ({} versions) from {} journal",
            store.len(),
            store.version_count(),
            journal.backend_name()
        );
        Ok(Self::new(store))
    }

    /// Shared mode.
    pub fn read(&self) -> RwLockReadGuard<'_, VersionedStore> {
        self.inner.read()
    }

    /// Exclusive mode. The store must only be modified through this guard.
    pub fn write(&self) -> RwLockWriteGuard<'_, VersionedStore> {
        self.inner.write()
    }

    pub fn resolve(&self, code: &str, now: DateTime<Utc>) -> Option<String> {
        let store = self.read();
        let url = store.resolve(code, now).map(str::to_owned);
        trace!(code, found = url.is_some(), "resolve");
        url
    }

    pub fn history(&self, code: &str) -> Option<Vec<Record>> {
        self.read().history(code).map(<[Record]>::to_vec)
    }

    pub fn list_current(&self, now: DateTime<Utc>) -> BTreeMap<String, String> {
        self.read().list_current(now)
    }

    pub fn append(&self, record: Record) {
        self.write().append(record);
    }

    pub fn code_count(&self) -> usize {
        self.read().len()
    }
}
