use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::AppResult;
use crate::otp::{HashAlgorithm, TotpError, TotpParams, DEFAULT_GROUP_SIZE};
use crate::store::DEFAULT_TTL_SECS;

/// Discord bot configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DiscordConfig {
    /// Bot token. Required; usually supplied as OTPBRIDGE_DISCORD__TOKEN.
    #[serde(default)]
    pub token: String,
    /// Prefix for text commands
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    "!2fa ".to_string()
}

/// Defaults for secrets that do not carry their own parameters
#[derive(Debug, Deserialize, Clone)]
pub struct TotpConfig {
    #[serde(default = "default_interval")]
    pub interval: u64,
    #[serde(default = "default_digits")]
    pub digits: u8,
    #[serde(default)]
    pub algorithm: HashAlgorithm,
}

fn default_interval() -> u64 {
    30
}

fn default_digits() -> u8 {
    6
}

impl Default for TotpConfig {
    fn default() -> Self {
        Self {
            interval: default_interval(),
            digits: default_digits(),
            algorithm: HashAlgorithm::default(),
        }
    }
}

impl TotpConfig {
    pub fn params(&self) -> Result<TotpParams, TotpError> {
        TotpParams::new(self.interval, self.digits, self.algorithm)
    }
}

/// Ephemeral store settings
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    /// Seconds a secret stays refreshable after it was submitted
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_ttl_secs() -> u64 {
    DEFAULT_TTL_SECS
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Presentation settings
#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    /// Characters per block when echoing a secret back
    #[serde(default = "default_group_size")]
    pub group_size: usize,
}

fn default_group_size() -> usize {
    DEFAULT_GROUP_SIZE
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            group_size: default_group_size(),
        }
    }
}

/// Root application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub discord: DiscordConfig,
    #[serde(default)]
    pub totp: TotpConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> AppResult<Self> {
        Self::load_with(environment())
    }

    fn load_with(env: Environment) -> AppResult<Self> {
        let config = Config::builder()
            // Start with default config file
            .add_source(File::with_name("config/default").required(false))
            // Override with local config if present
            .add_source(File::with_name("config/local").required(false))
            .add_source(env)
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

/// Environment overrides: OTPBRIDGE_DISCORD__TOKEN, OTPBRIDGE_STORE__TTL_SECS, ...
fn environment() -> Environment {
    Environment::with_prefix("OTPBRIDGE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn from_toml(toml: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_defaults_when_empty() {
        let config = from_toml("");
        assert_eq!(config.discord.prefix, "!2fa ");
        assert_eq!(config.store.ttl_secs, 300);
        assert_eq!(config.display.group_size, 4);
        assert_eq!(config.totp.params().unwrap(), TotpParams::default());
    }

    #[test]
    fn test_overrides() {
        let config = from_toml(
            r#"
            [discord]
            token = "abc"

            [totp]
            interval = 60
            digits = 8
            algorithm = "SHA256"

            [store]
            ttl_secs = 120
            "#,
        );
        assert_eq!(config.discord.token, "abc");
        assert_eq!(config.store.ttl_secs, 120);

        let params = config.totp.params().unwrap();
        assert_eq!(params.interval(), 60);
        assert_eq!(params.digits(), 8);
        assert_eq!(params.algorithm(), HashAlgorithm::Sha256);
    }

    fn from_env(vars: &[(&str, &str)]) -> AppConfig {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::load_with(environment().source(Some(map))).unwrap()
    }

    #[test]
    fn test_env_overrides_use_single_underscore_after_prefix() {
        let config = from_env(&[
            ("OTPBRIDGE_DISCORD__TOKEN", "tok123"),
            ("OTPBRIDGE_STORE__TTL_SECS", "120"),
            ("OTPBRIDGE_TOTP__ALGORITHM", "SHA512"),
        ]);
        assert_eq!(config.discord.token, "tok123");
        assert_eq!(config.store.ttl_secs, 120);
        assert_eq!(config.totp.algorithm, HashAlgorithm::Sha512);
    }

    #[test]
    fn test_out_of_range_totp_defaults() {
        let config = from_toml("[totp]\ndigits = 12\n");
        assert!(config.totp.params().is_err());
    }
}
