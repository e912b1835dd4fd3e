//! Turns untrusted user input into a canonical secret.

use thiserror::Error;

use super::engine::TotpParams;
use super::secret::Secret;
use super::uri::{self, SCHEME};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    #[error("no secret was provided")]
    Empty,

    #[error("secret is not valid Base32")]
    InvalidBase32,

    #[error("malformed otpauth:// URI")]
    InvalidUri,
}

/// Result of a successful parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSecret {
    pub secret: Secret,
    /// Account/issuer label from an otpauth URI; empty for bare secrets.
    pub label: String,
    pub params: TotpParams,
}

/// Parses bare Base32 secrets and otpauth URIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecretParser {
    defaults: TotpParams,
}

impl SecretParser {
    /// `defaults` apply to bare secrets and to URIs that omit a parameter.
    pub fn new(defaults: TotpParams) -> Self {
        Self { defaults }
    }

    pub fn parse(&self, text: &str) -> Result<ParsedSecret, ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::Empty);
        }

        if has_otpauth_scheme(text) {
            return uri::parse_otpauth_uri(text, self.defaults);
        }

        Ok(ParsedSecret {
            secret: Secret::from_base32(text)?,
            label: String::new(),
            params: self.defaults,
        })
    }
}

/// Parse with the default parameters (30 s, 6 digits, SHA-1).
pub fn parse(text: &str) -> Result<ParsedSecret, ParseError> {
    SecretParser::default().parse(text)
}

fn has_otpauth_scheme(text: &str) -> bool {
    let prefix_len = SCHEME.len() + "://".len();
    text.get(..prefix_len)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("otpauth://"))
}
