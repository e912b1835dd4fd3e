use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::engine::{self, TotpParams, TotpResult};
use super::format::format_secret;
use super::parser::SecretParser;
use super::secret::Secret;
use crate::error::{AppError, AppResult};
use crate::store::{EphemeralStore, Token};

/// Everything needed to show a code to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCode {
    pub token: Token,
    pub code: TotpResult,
    pub label: String,
    /// Grouped rendering of the secret.
    pub display_secret: String,
}

/// Parses secrets, computes codes and keeps the short-lived token map.
#[derive(Debug)]
pub struct OtpService {
    parser: SecretParser,
    store: Arc<EphemeralStore>,
    group_size: usize,
}

impl OtpService {
    pub fn new(store: Arc<EphemeralStore>, defaults: TotpParams, group_size: usize) -> Self {
        Self {
            parser: SecretParser::new(defaults),
            store,
            group_size,
        }
    }

    pub fn store(&self) -> &Arc<EphemeralStore> {
        &self.store
    }

    /// Parse `text`, compute the first code, then park the secret.
    pub fn issue(&self, text: &str) -> AppResult<IssuedCode> {
        self.issue_at(text, Utc::now())
    }

    pub fn issue_at(&self, text: &str, now: DateTime<Utc>) -> AppResult<IssuedCode> {
        let parsed = self.parser.parse(text).map_err(|e| {
            debug!(error = %e, "Rejected secret input");
            AppError::from(e)
        })?;

        let code = compute_at(&parsed.secret, &parsed.params, now)?;
        let display_secret = format_secret(parsed.secret.expose_base32(), self.group_size);
        let label = parsed.label.clone();
        let token = self.store.put_at(parsed.secret, parsed.label, parsed.params, now);

        info!(
            token = token.short(),
            labelled = !label.is_empty(),
            "Issued TOTP code"
        );

        Ok(IssuedCode {
            token,
            code,
            label,
            display_secret,
        })
    }

    /// Recompute the code for a previously issued token.
    pub fn refresh(&self, token: &Token) -> AppResult<IssuedCode> {
        self.refresh_at(token, Utc::now())
    }

    pub fn refresh_at(&self, token: &Token, now: DateTime<Utc>) -> AppResult<IssuedCode> {
        let record = self.store.get_at(token, now).ok_or_else(|| {
            debug!(token = token.short(), "Refresh for unknown or expired token");
            AppError::SessionExpired
        })?;

        let code = compute_at(&record.secret, &record.params, now)?;

        Ok(IssuedCode {
            token: token.clone(),
            code,
            display_secret: format_secret(record.secret.expose_base32(), self.group_size),
            label: record.label.clone(),
        })
    }

    /// Forget a token. Safe to call for tokens that are already gone.
    pub fn discard(&self, token: &Token) {
        self.store.delete(token);
    }
}

fn compute_at(secret: &Secret, params: &TotpParams, now: DateTime<Utc>) -> AppResult<TotpResult> {
    let unix = u64::try_from(now.timestamp()).map_err(|_| super::TotpError::Clock)?;
    engine::compute(secret, unix, params).map_err(|e| {
        warn!(error = %e, "TOTP computation failed");
        AppError::from(e)
    })
}
