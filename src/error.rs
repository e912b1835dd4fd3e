use thiserror::Error;

use crate::otp::{ParseError, TotpError};

/// Application-wide error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Discord error: {0}")]
    Discord(#[from] serenity::Error),

    #[error("Invalid secret: {0}")]
    Parse(#[from] ParseError),

    #[error("Code generation failed: {0}")]
    Totp(#[from] TotpError),

    /// The token is unknown, expired or was removed. Callers cannot tell which.
    #[error("Session expired")]
    SessionExpired,
}

impl AppError {
    /// What the user should be told. Never includes secret material.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Parse(_) => {
                "Invalid secret format. Send a Base32 secret (e.g. `JBSWY3DPEHPK3PXP`) \
                or an `otpauth://` URI and try again."
            }
            Self::SessionExpired => {
                "This ephemeral secret expired or was removed. \
                Send the secret again to get a new code."
            }
            Self::Totp(_) => "Could not generate a code from this secret.",
            Self::Config(_) | Self::Discord(_) => {
                "Something went wrong on our side. Please try again later."
            }
        }
    }

    /// Whether the user can fix this by sending different input.
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::Parse(_) | Self::SessionExpired)
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
