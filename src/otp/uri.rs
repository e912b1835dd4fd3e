//! `otpauth://` key URIs.
//!
//! Format: `otpauth://totp/ISSUER:ACCOUNT?secret=BASE32&issuer=ISSUER&algorithm=SHA1&digits=6&period=30`

use percent_encoding::percent_decode_str;
use tracing::debug;
use url::Url;

use super::engine::{HashAlgorithm, TotpParams};
use super::parser::{ParseError, ParsedSecret};
use super::secret::Secret;

pub const SCHEME: &str = "otpauth";

/// Parse a key URI, starting from `defaults` for any parameter it omits.
pub fn parse_otpauth_uri(uri: &str, defaults: TotpParams) -> Result<ParsedSecret, ParseError> {
    let url = Url::parse(uri).map_err(|_| ParseError::InvalidUri)?;

    if !url.scheme().eq_ignore_ascii_case(SCHEME) {
        return Err(ParseError::InvalidUri);
    }

    match url.host_str() {
        Some(kind) if kind.eq_ignore_ascii_case("totp") => {}
        other => {
            debug!(otp_type = ?other, "Rejected otpauth URI type");
            return Err(ParseError::InvalidUri);
        }
    }

    let path = url.path();
    let label = percent_decode_str(path.strip_prefix('/').unwrap_or(path))
        .decode_utf8()
        .map_err(|_| ParseError::InvalidUri)?
        .trim()
        .to_string();

    let mut secret = None;
    let mut params = defaults;

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "secret" => {
                // an empty `secret=` is treated like a missing one
                let parsed = Secret::from_base32(&value).map_err(|e| match e {
                    ParseError::Empty => ParseError::InvalidUri,
                    other => other,
                })?;
                secret = Some(parsed);
            }
            "algorithm" => {
                let algorithm = HashAlgorithm::from_name(&value).ok_or(ParseError::InvalidUri)?;
                params = params.with_algorithm(algorithm);
            }
            "digits" => {
                let digits = value.parse::<u8>().map_err(|_| ParseError::InvalidUri)?;
                params = params.with_digits(digits).map_err(|_| ParseError::InvalidUri)?;
            }
            "period" => {
                let period = value.parse::<u64>().map_err(|_| ParseError::InvalidUri)?;
                params = params.with_interval(period).map_err(|_| ParseError::InvalidUri)?;
            }
            _ => {}
        }
    }

    let secret = match secret {
        Some(secret) => secret,
        None => return Err(ParseError::InvalidUri),
    };

    Ok(ParsedSecret {
        secret,
        label,
        params,
    })
}
