//! Tracing setup for the binary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const DEFAULT_FILTER: &str = "otpbridge=debug,serenity=warn";

/// Filter from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into())
}

/// Read `.env`, then install the global subscriber. Returns whether a `.env` was found.
pub fn init() -> bool {
    // .env may carry RUST_LOG, so it is read before the filter is built
    let loaded = dotenvy::dotenv().is_ok();

    tracing_subscriber::registry()
        .with(env_filter())
        .with(fmt::layer())
        .init();

    loaded
}
