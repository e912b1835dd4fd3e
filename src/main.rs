use config::ConfigError;
use otpbridge::{bot, config::AppConfig, logging, otp::OtpService, store::EphemeralStore, AppError};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv_loaded = logging::init();

    info!("Starting OTPBridge v{}", env!("CARGO_PKG_VERSION"));

    if dotenv_loaded {
        info!("Loaded environment from .env");
    }

    let config = AppConfig::load()?;
    info!("Configuration loaded");

    if config.discord.token.is_empty() {
        error!("Discord token not configured!");
        error!("Set discord.token in config/local.toml or the OTPBRIDGE_DISCORD__TOKEN env var");
        return Err(AppError::Config(ConfigError::NotFound("discord.token".to_string())).into());
    }

    let defaults = config
        .totp
        .params()
        .map_err(|e| {
            AppError::Config(ConfigError::Message(format!("Invalid [totp] configuration: {}", e)))
        })?;

    // Secrets live only in this map, for at most ttl_secs plus one sweep
    let store = Arc::new(EphemeralStore::new(config.store.ttl_secs));
    info!(
        ttl_secs = config.store.ttl_secs,
        interval = defaults.interval(),
        digits = defaults.digits(),
        algorithm = %defaults.algorithm(),
        "Ephemeral store ready"
    );

    let service = Arc::new(OtpService::new(store, defaults, config.display.group_size));

    match bot::start_bot(service, &config.discord.token, config.discord.prefix.clone()).await {
        Ok(()) => info!("Discord bot shut down gracefully"),
        Err(e) => {
            error!("Discord bot error: {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
