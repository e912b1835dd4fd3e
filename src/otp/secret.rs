//! Shared-secret material held only in memory.
//!
//! A [`Secret`] keeps both the decoded key bytes fed to HMAC and the
//! canonical Base32 text they came from. Both are zeroized on drop.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::parser::ParseError;

const BASE32: base32::Alphabet = base32::Alphabet::Rfc4648 { padding: false };

/// Decoded TOTP key plus its canonical Base32 rendering.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Secret {
    bytes: Vec<u8>,
    encoded: String,
}

impl Secret {
    /// Validate and decode Base32 text.
    ///
    /// Whitespace anywhere in the input is ignored and letters may be in
    /// either case. The remaining text must be one or more `A-Z2-7`
    /// characters followed by zero or more `=`.
    pub fn from_base32(text: &str) -> Result<Self, ParseError> {
        let mut compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
        compact.make_ascii_uppercase();

        let body_len = compact.trim_end_matches('=').len();
        let (body, padding) = compact.split_at(body_len);

        if body.is_empty() {
            let err = if padding.is_empty() {
                ParseError::Empty
            } else {
                ParseError::InvalidBase32
            };
            compact.zeroize();
            return Err(err);
        }

        if !body.bytes().all(is_base32_symbol) {
            compact.zeroize();
            return Err(ParseError::InvalidBase32);
        }

        let bytes = match base32::decode(BASE32, body) {
            Some(bytes) if !bytes.is_empty() => bytes,
            Some(mut bytes) => {
                bytes.zeroize();
                compact.zeroize();
                return Err(ParseError::InvalidBase32);
            }
            None => {
                compact.zeroize();
                return Err(ParseError::InvalidBase32);
            }
        };

        Ok(Self {
            bytes,
            encoded: compact,
        })
    }

    /// Wrap raw key bytes, e.g. the ASCII keys of the RFC 6238 test vectors.
    ///
    /// No validation happens here; an empty key is rejected later by the
    /// engine with [`TotpError::InvalidSecret`](super::TotpError::InvalidSecret).
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let encoded = base32::encode(BASE32, &bytes);
        Self { bytes, encoded }
    }

    /// Key bytes used as the HMAC key.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Canonical Base32 text: uppercase, no whitespace, padding as supplied.
    pub fn expose_base32(&self) -> &str {
        &self.encoded
    }
}

fn is_base32_symbol(b: u8) -> bool {
    matches!(b, b'A'..=b'Z' | b'2'..=b'7')
}

impl PartialEq for Secret {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Secret {}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secret")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}
