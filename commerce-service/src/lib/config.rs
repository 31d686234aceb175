use std::env;

use chrono::Duration;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Token signing secret, shared by issuance and verification. Injected
    /// at startup; there is no compiled-in default.
    pub secret: String,
    pub token_ttl_days: i64,
}

impl AuthConfig {
    /// Minimum signing secret length in bytes (HMAC-SHA512 key material).
    const MIN_SECRET_BYTES: usize = 32;

    pub fn token_ttl(&self) -> Duration {
        Duration::days(self.token_ttl_days)
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (AUTH__SECRET, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables (with __ as separator)
            // Example: AUTH__SECRET=... overrides auth.secret
            .add_source(Environment::with_prefix("").separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.secret.len() < AuthConfig::MIN_SECRET_BYTES {
            return Err(ConfigError::Message(format!(
                "auth.secret must be at least {} bytes",
                AuthConfig::MIN_SECRET_BYTES
            )));
        }

        // A non-positive TTL would issue tokens already at or past expiry
        if self.auth.token_ttl_days <= 0 {
            return Err(ConfigError::Message(
                "auth.token_ttl_days must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
