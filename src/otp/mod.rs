//! Secret parsing, TOTP computation and display formatting.
//!
//! Everything except [`OtpService`] is pure. The service is the only piece
//! that touches the [`EphemeralStore`](crate::store::EphemeralStore).

pub mod engine;
pub mod format;
pub mod parser;
pub mod secret;
pub mod service;
pub mod uri;

pub use engine::{compute, compute_now, HashAlgorithm, TotpError, TotpParams, TotpResult};
pub use format::{format_secret, DEFAULT_GROUP_SIZE};
pub use parser::{parse, ParseError, ParsedSecret, SecretParser};
pub use secret::Secret;
pub use service::{IssuedCode, OtpService};
pub use uri::parse_otpauth_uri;
