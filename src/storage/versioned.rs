//! Versioned code → URL store
//!
//! Every code owns an append-only history. The "current" mapping is derived
//! from the latest version only: when that version has expired the code
//! resolves to nothing, even if an older version would still be valid.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};

use super::Record;

#[derive(Debug, Default, Clone)]
pub struct VersionedStore {
    histories: HashMap<String, Vec<Record>>,
}

impl VersionedStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store by appending `records` in iteration order.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let mut store = Self::new();
        for record in records {
            store.append(record);
        }
        store
    }

    /// Number of codes that have ever been created.
    pub fn len(&self) -> usize {
        self.histories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histories.is_empty()
    }

    /// Total number of versions across all codes.
    pub fn version_count(&self) -> usize {
        self.histories.values().map(Vec::len).sum()
    }

    /// Latest version of `code`, expired or not.
    pub fn latest(&self, code: &str) -> Option<&Record> {
        self.histories.get(code).and_then(|history| history.last())
    }

    /// URL of the current version if it is unexpired at `now`.
    pub fn resolve(&self, code: &str, now: DateTime<Utc>) -> Option<&str> {
        self.latest(code)
            .filter(|record| !record.is_expired_at(now))
            .map(|record| record.url.as_str())
    }

    /// Full history of `code` in creation order, including expired versions.
    pub fn history(&self, code: &str) -> Option<&[Record]> {
        self.histories
            .get(code)
            .filter(|history| !history.is_empty())
            .map(Vec::as_slice)
    }

    /// Every code whose current version is unexpired at `now`, sorted by code.
    pub fn list_current(&self, now: DateTime<Utc>) -> BTreeMap<String, String> {
        self.histories
            .iter()
            .filter_map(|(code, history)| {
                let record = history.last()?;
                (!record.is_expired_at(now)).then(|| (code.clone(), record.url.clone()))
            })
            .collect()
    }

    /// Appends `record` to its code's history. Overwriting an existing code
    /// is a normal operation and never fails.
    pub fn append(&mut self, record: Record) {
        self.histories
            .entry(record.code.clone())
            .or_default()
            .push(record);
    }

    /// Creation timestamp for the next version of `code`.
    ///
    /// Never earlier than the latest existing version, so `created_at`
    /// stays non-decreasing when the wall clock steps backwards.
    pub fn next_created_at(&self, code: &str, now: DateTime<Utc>) -> DateTime<Utc> {
        match self.latest(code) {
            Some(latest) if latest.created_at > now => latest.created_at,
            _ => now,
        }
    }

    /// All records of all codes; per-code order is preserved.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.histories.values().flatten()
    }
}
