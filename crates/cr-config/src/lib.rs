//! # cr-config
//!
//! Runtime settings for the civic reporter binary.
//! Precedence: built-in defaults < `.env` file < `CIVIC_*` environment variables.

use config::{Config, Environment};
use serde::Deserialize;
use thiserror::Error;

pub const ENV_PREFIX: &str = "CIVIC";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid setting `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    pub bind_addr: String,
    pub port: u16,
    /// e.g. "sqlite:civic_reports.db" or "sqlite::memory:"
    pub database_url: String,
    pub upload_dir: String,
    pub upload_url_prefix: String,
    /// Origin allowed to call the JSON API from a browser
    pub cors_origin: String,
    pub max_upload_bytes: usize,
}

impl Settings {
    /// Reads `.env` (if present) and the process environment.
    ///
    /// Runs before the logger exists, so `.env` may also carry `RUST_LOG`.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
    }

    /// Builds settings from defaults overlaid with the given environment source.
    pub fn from_source(env: Environment) -> Result<Self, ConfigError> {
        let settings: Settings = Config::builder()
            .set_default("bind_addr", "127.0.0.1")?
            .set_default("port", 8000_i64)?
            .set_default("database_url", "sqlite:civic_reports.db")?
            .set_default("upload_dir", "./data/uploads")?
            .set_default("upload_url_prefix", "/static/uploads")?
            .set_default("cors_origin", "http://localhost:3000")?
            .set_default("max_upload_bytes", 10_i64 * 1024 * 1024)?
            .add_source(env)
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::Invalid {
                key: "port",
                reason: "must be non-zero".into(),
            });
        }
        if self.database_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "database_url",
                reason: "must not be empty".into(),
            });
        }
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid {
                key: "max_upload_bytes",
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    pub fn bind_address(&self) -> (String, u16) {
        (self.bind_addr.clone(), self.port)
    }
}
