//! Link service
//!
//! The four operations the HTTP gateway calls: `resolve`, `history`,
//! `list_current` and `create`. Reads take the store's shared mode; `create`
//! passes the confirmation gate first and then appends under the exclusive
//! mode, writing the journal entry before the in-memory append.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, error, info};

use super::clock::{Clock, SystemClock};
use super::confirm::{ConfirmationGate, GateDecision, RandomTokenGenerator, TokenGenerator};
use super::expiry::{ExpiryDirective, ExpiryParams};
use crate::errors::Result;
use crate::storage::{Journal, LinkStore, NullJournal, Record};

/// A create (or reassign) request as parsed by the gateway.
///
/// `url` must already have passed URL validation.
#[derive(Debug, Clone, Default)]
pub struct CreateRequest {
    pub code: String,
    pub url: String,
    pub expiry: ExpiryParams,
    pub query_token: Option<String>,
    pub cookie_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The record was appended to the code's history.
    Created(Record),
    /// No write happened; the caller must present this token in both the
    /// query string and the cookie.
    NeedsConfirmation(String),
    /// The request was rejected before reaching the gate.
    BadRequest(String),
}

pub struct LinkService {
    store: Arc<LinkStore>,
    journal: Arc<dyn Journal>,
    gate: ConfirmationGate,
    clock: Arc<dyn Clock>,
}

impl LinkService {
    pub fn new(
        store: Arc<LinkStore>,
        journal: Arc<dyn Journal>,
        clock: Arc<dyn Clock>,
        tokens: Arc<dyn TokenGenerator>,
    ) -> Self {
        Self {
            store,
            journal,
            gate: ConfirmationGate::new(tokens),
            clock,
        }
    }

    /// In-memory service with the system clock and random tokens.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(LinkStore::default()),
            Arc::new(NullJournal),
            Arc::new(SystemClock),
            Arc::new(RandomTokenGenerator),
        )
    }

    /// Restores the store from `journal` and keeps appending to it.
    pub fn open(journal: Arc<dyn Journal>) -> Result<Self> {
        let store = LinkStore::restore(journal.as_ref())?;
        Ok(Self::new(
            Arc::new(store),
            journal,
            Arc::new(SystemClock),
            Arc::new(RandomTokenGenerator),
        ))
    }

    pub fn store(&self) -> &Arc<LinkStore> {
        &self.store
    }

    pub fn resolve(&self, code: &str) -> Option<String> {
        self.store.resolve(code, self.clock.now())
    }

    pub fn history(&self, code: &str) -> Option<Vec<Record>> {
        self.store.history(code)
    }

    pub fn list_current(&self) -> BTreeMap<String, String> {
        self.store.list_current(self.clock.now())
    }

    /// Creates or reassigns `request.code`.
    ///
    /// The expiration directive is resolved first, then the confirmation
    /// gate runs; only a confirmed request touches the store, and it
    /// appends exactly one record. `Err` is returned only when the journal
    /// write fails, in which case the in-memory store is left unchanged.
    pub fn create(&self, request: CreateRequest) -> Result<CreateOutcome> {
        if request.code.is_empty() {
            return Ok(CreateOutcome::BadRequest(
                "short code must not be empty".to_string(),
            ));
        }

        let directive = match ExpiryDirective::resolve(&request.expiry) {
            Ok(directive) => directive,
            Err(e) => {
                debug!(code = %request.code, "Rejected create: {}", e);
                return Ok(CreateOutcome::BadRequest(e.to_string()));
            }
        };

        let decision = self.gate.check(
            request.query_token.as_deref(),
            request.cookie_token.as_deref(),
        );
        if let GateDecision::Challenged(token) = decision {
            info!(code = %request.code, "Create requires confirmation");
            return Ok(CreateOutcome::NeedsConfirmation(token));
        }

        let now = self.clock.now();
        let mut store = self.store.write();

        let created_at = store.next_created_at(&request.code, now);
        let record = Record::new(
            request.code,
            request.url,
            created_at,
            directive.expires_at(created_at),
        );

        if let Err(e) = self.journal.append(&record) {
            error!(code = %record.code, "Failed to journal record: {}", e);
            return Err(e);
        }
        store.append(record.clone());
        drop(store);

        info!(
            code = %record.code,
            url = %record.url,
            expires_at = ?record.expires_at,
            "Link created"
        );
        Ok(CreateOutcome::Created(record))
    }
}
