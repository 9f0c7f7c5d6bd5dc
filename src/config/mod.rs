//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `PANDOC_GATEWAY` prefix and nested values use double underscores as separators.
//! The conventional plain `PORT` variable, when present, overrides the listening port.
//!
//! # Example
//!
//! ```no_run
//! use pandoc_gateway::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on port {}", config.server.port);
//! ```

mod converter;
mod error;
mod server;

pub use converter::ConverterConfig;
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Plain environment variable that overrides `server.port`.
pub const PORT_ENV_VAR: &str = "PORT";

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// configuration. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging, CORS)
    #[serde(default)]
    pub server: ServerConfig,

    /// External converter configuration (Pandoc)
    #[serde(default)]
    pub converter: ConverterConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `PANDOC_GATEWAY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Applies `PORT` on top, if set
    /// 5. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `PANDOC_GATEWAY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `PANDOC_GATEWAY__CONVERTER__PROGRAM=/opt/pandoc/bin/pandoc` -> `converter.program`
    /// - `PORT=8080` -> `server.port = 8080`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("PANDOC_GATEWAY")
                    .separator("__"),
            )
            .set_override_option("server.port", std::env::var(PORT_ENV_VAR).ok())?
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.converter.validate()?;
        Ok(())
    }
}
