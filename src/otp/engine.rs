//! RFC 6238 code computation.
//!
//! Stateless: every function here is pure over `(secret, now, params)` and
//! safe to call from any number of tasks at once.

use std::fmt;

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Sha256, Sha512};
use thiserror::Error;

use super::secret::Secret;

pub const DEFAULT_INTERVAL: u64 = 30;
pub const DEFAULT_DIGITS: u8 = 6;
pub const MIN_DIGITS: u8 = 6;
pub const MAX_DIGITS: u8 = 8;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TotpError {
    #[error("secret cannot be used as a TOTP key")]
    InvalidSecret,

    #[error("invalid TOTP parameters: {0}")]
    InvalidParams(String),

    #[error("system clock is before the Unix epoch")]
    Clock,
}

/// HMAC hash function named by the otpauth `algorithm` parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HashAlgorithm {
    #[default]
    Sha1,
    Sha256,
    Sha512,
}

impl HashAlgorithm {
    /// Accepts `SHA1`, `sha-256`, `Sha512` and similar spellings.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().replace('-', "").as_str() {
            "SHA1" => Some(Self::Sha1),
            "SHA256" => Some(Self::Sha256),
            "SHA512" => Some(Self::Sha512),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha1 => "SHA1",
            Self::Sha256 => "SHA256",
            Self::Sha512 => "SHA512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interval, digit count and hash function for one secret.
///
/// Only constructible with an interval above zero and 6 to 8 digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotpParams {
    interval: u64,
    digits: u8,
    algorithm: HashAlgorithm,
}

impl TotpParams {
    pub fn new(interval: u64, digits: u8, algorithm: HashAlgorithm) -> Result<Self, TotpError> {
        if interval == 0 {
            return Err(TotpError::InvalidParams("interval must be positive".into()));
        }
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
            return Err(TotpError::InvalidParams(format!(
                "digits must be between {} and {}, got {}",
                MIN_DIGITS, MAX_DIGITS, digits
            )));
        }
        Ok(Self {
            interval,
            digits,
            algorithm,
        })
    }

    pub fn interval(&self) -> u64 {
        self.interval
    }

    pub fn digits(&self) -> u8 {
        self.digits
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn with_interval(self, interval: u64) -> Result<Self, TotpError> {
        Self::new(interval, self.digits, self.algorithm)
    }

    pub fn with_digits(self, digits: u8) -> Result<Self, TotpError> {
        Self::new(self.interval, digits, self.algorithm)
    }

    pub fn with_algorithm(self, algorithm: HashAlgorithm) -> Self {
        Self { algorithm, ..self }
    }
}

impl Default for TotpParams {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
            digits: DEFAULT_DIGITS,
            algorithm: HashAlgorithm::Sha1,
        }
    }
}

/// A computed code and how long it stays valid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotpResult {
    pub code: String,
    /// In `[1, interval]`. At a window boundary this is the full interval.
    pub seconds_remaining: u64,
}

/// Compute the code for `secret` at Unix time `now` (seconds).
pub fn compute(secret: &Secret, now: u64, params: &TotpParams) -> Result<TotpResult, TotpError> {
    let key = secret.as_bytes();
    if key.is_empty() {
        return Err(TotpError::InvalidSecret);
    }

    let counter = now / params.interval;
    let digest = hmac_digest(params.algorithm, key, &counter.to_be_bytes())?;

    Ok(TotpResult {
        code: truncate(&digest, params.digits),
        seconds_remaining: params.interval - (now % params.interval),
    })
}

/// [`compute`] at the current wall-clock time.
pub fn compute_now(secret: &Secret, params: &TotpParams) -> Result<TotpResult, TotpError> {
    let now = u64::try_from(chrono::Utc::now().timestamp()).map_err(|_| TotpError::Clock)?;
    compute(secret, now, params)
}

fn hmac_digest(algorithm: HashAlgorithm, key: &[u8], message: &[u8]) -> Result<Vec<u8>, TotpError> {
    macro_rules! digest {
        ($hash:ty) => {{
            let mut mac =
                Hmac::<$hash>::new_from_slice(key).map_err(|_| TotpError::InvalidSecret)?;
            mac.update(message);
            mac.finalize().into_bytes().to_vec()
        }};
    }

    Ok(match algorithm {
        HashAlgorithm::Sha1 => digest!(Sha1),
        HashAlgorithm::Sha256 => digest!(Sha256),
        HashAlgorithm::Sha512 => digest!(Sha512),
    })
}

/// Dynamic truncation, RFC 4226 section 5.3.
fn truncate(digest: &[u8], digits: u8) -> String {
    let offset = (digest[digest.len() - 1] & 0x0f) as usize;
    let binary = u32::from_be_bytes([
        digest[offset] & 0x7f,
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]);
    let code = binary % 10u32.pow(digits as u32);
    format!("{:0width$}", code, width = digits as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sha1_key() -> Secret {
        Secret::from_bytes(b"12345678901234567890".to_vec())
    }

    fn sha256_key() -> Secret {
        Secret::from_bytes(b"12345678901234567890123456789012".to_vec())
    }

    fn sha512_key() -> Secret {
        Secret::from_bytes(
            b"1234567890123456789012345678901234567890123456789012345678901234".to_vec(),
        )
    }

    fn eight_digits(algorithm: HashAlgorithm) -> TotpParams {
        TotpParams::new(30, 8, algorithm).unwrap()
    }

    #[test]
    fn test_rfc6238_sha1_vectors() {
        let params = eight_digits(HashAlgorithm::Sha1);
        let cases = [
            (59, "94287082"),
            (1111111109, "07081804"),
            (1111111111, "14050471"),
            (1234567890, "89005924"),
            (2000000000, "69279037"),
            (20000000000, "65353130"),
        ];
        for (t, expected) in cases {
            assert_eq!(compute(&sha1_key(), t, &params).unwrap().code, expected, "t={}", t);
        }
    }

    #[test]
    fn test_rfc6238_sha256_and_sha512_vectors() {
        let sha256 = eight_digits(HashAlgorithm::Sha256);
        assert_eq!(compute(&sha256_key(), 59, &sha256).unwrap().code, "46119246");
        assert_eq!(compute(&sha256_key(), 1111111109, &sha256).unwrap().code, "68084774");
        assert_eq!(compute(&sha256_key(), 20000000000, &sha256).unwrap().code, "77737706");

        let sha512 = eight_digits(HashAlgorithm::Sha512);
        assert_eq!(compute(&sha512_key(), 59, &sha512).unwrap().code, "90693936");
        assert_eq!(compute(&sha512_key(), 1111111109, &sha512).unwrap().code, "25091201");
        assert_eq!(compute(&sha512_key(), 20000000000, &sha512).unwrap().code, "47863826");
    }

    #[test]
    fn test_default_six_digits_truncates_vector() {
        let result = compute(&sha1_key(), 59, &TotpParams::default()).unwrap();
        assert_eq!(result.code, "287082");
        assert_eq!(result.seconds_remaining, 1);
    }

    #[test]
    fn test_seconds_remaining_at_boundary() {
        let params = TotpParams::default();
        let key = sha1_key();
        assert_eq!(compute(&key, 0, &params).unwrap().seconds_remaining, 30);
        assert_eq!(compute(&key, 29, &params).unwrap().seconds_remaining, 1);
        assert_eq!(compute(&key, 30, &params).unwrap().seconds_remaining, 30);
        assert_eq!(compute(&key, 31, &params).unwrap().seconds_remaining, 29);
    }

    #[test]
    fn test_code_is_stable_within_a_window() {
        let params = TotpParams::default();
        let key = sha1_key();
        let first = compute(&key, 60, &params).unwrap().code;
        for t in 61..90 {
            assert_eq!(compute(&key, t, &params).unwrap().code, first);
        }
    }

    #[test]
    fn test_empty_key_is_invalid_secret() {
        let empty = Secret::from_bytes(Vec::new());
        assert_eq!(
            compute(&empty, 59, &TotpParams::default()),
            Err(TotpError::InvalidSecret)
        );
    }

    #[test]
    fn test_params_validation() {
        assert!(TotpParams::new(0, 6, HashAlgorithm::Sha1).is_err());
        assert!(TotpParams::new(30, 5, HashAlgorithm::Sha1).is_err());
        assert!(TotpParams::new(30, 9, HashAlgorithm::Sha1).is_err());
        assert!(TotpParams::new(60, 8, HashAlgorithm::Sha512).is_ok());
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!(HashAlgorithm::from_name("sha1"), Some(HashAlgorithm::Sha1));
        assert_eq!(HashAlgorithm::from_name("SHA-256"), Some(HashAlgorithm::Sha256));
        assert_eq!(HashAlgorithm::from_name(" Sha512 "), Some(HashAlgorithm::Sha512));
        assert_eq!(HashAlgorithm::from_name("md5"), None);
    }

    #[test]
    fn test_compute_now_matches_wall_clock() {
        let key = sha1_key();
        let params = TotpParams::default();
        let before = chrono::Utc::now().timestamp() as u64;
        let result = compute_now(&key, &params).unwrap();
        let after = chrono::Utc::now().timestamp() as u64;

        assert!((before..=after).any(|t| compute(&key, t, &params).unwrap() == result));
    }
}
