use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One version of a short code's mapping.
///
/// Records are never mutated once built; reassigning a code appends a new
/// `Record` to its history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub code: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Record {
    pub fn new(
        code: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<Utc>,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            code: code.into(),
            url: url.into(),
            created_at,
            expires_at,
        }
    }

    /// `true` once `now` has reached `expires_at`.
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}
