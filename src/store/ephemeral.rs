use chrono::{DateTime, Duration, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use tracing::{debug, trace};

use super::token::Token;
use crate::otp::{Secret, TotpParams};

/// Default lifetime of a record, counted from insertion.
pub const DEFAULT_TTL_SECS: u64 = 300;

/// A secret parked in memory for later refreshes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EphemeralRecord {
    pub secret: Secret,
    pub label: String,
    pub params: TotpParams,
    pub inserted_at: DateTime<Utc>,
}

impl EphemeralRecord {
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        now - self.inserted_at > ttl
    }
}

/// Token-keyed, in-memory store of secrets with a fixed time-to-live.
///
/// Expiry is lazy: every `put` and `get` sweeps out records older than the
/// TTL, there is no background timer. A record can therefore linger past
/// its TTL until the next store call, but `get` never returns one. Access
/// does not extend a record's life.
///
/// Nothing here is ever written to disk.
pub struct EphemeralStore {
    entries: DashMap<Token, EphemeralRecord>,
    ttl: Duration,
}

impl EphemeralStore {
    pub fn new(ttl_secs: u64) -> Self {
        let ttl_secs = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
        Self {
            entries: DashMap::new(),
            ttl: Duration::try_seconds(ttl_secs).unwrap_or(Duration::MAX),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a secret and hand back a fresh token for it.
    pub fn put(&self, secret: Secret, label: impl Into<String>, params: TotpParams) -> Token {
        self.put_at(secret, label, params, Utc::now())
    }

    pub fn put_at(
        &self,
        secret: Secret,
        label: impl Into<String>,
        params: TotpParams,
        now: DateTime<Utc>,
    ) -> Token {
        let record = EphemeralRecord {
            secret,
            label: label.into(),
            params,
            inserted_at: now,
        };

        let token = loop {
            let candidate = Token::generate();
            // a 128-bit collision is not expected, but never overwrite
            if let Entry::Vacant(slot) = self.entries.entry(candidate.clone()) {
                slot.insert(record);
                break candidate;
            }
        };

        self.sweep(now);
        debug!(token = token.short(), live = self.entries.len(), "Stored ephemeral secret");
        token
    }

    /// Look up a live record. Unknown, expired and deleted tokens all give `None`.
    pub fn get(&self, token: &Token) -> Option<EphemeralRecord> {
        self.get_at(token, Utc::now())
    }

    pub fn get_at(&self, token: &Token, now: DateTime<Utc>) -> Option<EphemeralRecord> {
        self.sweep(now);

        let entry = self.entries.get(token)?;
        if entry.is_expired(self.ttl, now) {
            return None;
        }
        Some(entry.value().clone())
    }

    /// Remove a record. Removing an absent token is a no-op.
    pub fn delete(&self, token: &Token) {
        if self.entries.remove(token).is_some() {
            debug!(token = token.short(), "Removed ephemeral secret");
        }
    }

    /// Number of records currently held, including any not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn sweep(&self, now: DateTime<Utc>) {
        let before = self.entries.len();
        self.entries
            .retain(|_, record| !record.is_expired(self.ttl, now));
        let evicted = before.saturating_sub(self.entries.len());
        if evicted > 0 {
            trace!(evicted, "Swept expired ephemeral secrets");
        }
    }
}

impl Default for EphemeralStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL_SECS)
    }
}

impl std::fmt::Debug for EphemeralStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EphemeralStore")
            .field("live", &self.entries.len())
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish()
    }
}
