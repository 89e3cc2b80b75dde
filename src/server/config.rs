use std::{net::SocketAddr, path::PathBuf};

use crate::server::{
    error::config::ConfigError,
    util::storage::{DEFAULT_MAX_UPLOAD_SIZE, DEFAULT_UPLOAD_DIR},
};

pub static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";

/// Process configuration read from the environment.
///
/// The runtime settings document (semester, enrollment toggle, ...) lives in the database
/// and is managed by `SystemService`, not here.
pub struct Config {
    pub database_url: String,
    pub bind_address: SocketAddr,
    pub upload_dir: PathBuf,
    pub max_upload_size: u64,
}

impl Config {
    /// Reads `DATABASE_URL` (required), `BIND_ADDRESS` (defaults to `0.0.0.0:8080`),
    /// `UPLOAD_DIR` (defaults to `./uploads`) and `MAX_UPLOAD_SIZE` in bytes (defaults to 10 MiB).
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let bind_address = std::env::var("BIND_ADDRESS")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());

        let mut config = Self::new(database_url, &bind_address)?;

        if let Ok(upload_dir) = std::env::var("UPLOAD_DIR") {
            config.upload_dir = PathBuf::from(upload_dir);
        }
        if let Ok(max_upload_size) = std::env::var("MAX_UPLOAD_SIZE") {
            config.max_upload_size = parse_upload_size(&max_upload_size)?;
        }

        Ok(config)
    }

    pub fn new(database_url: String, bind_address: &str) -> Result<Self, ConfigError> {
        if database_url.trim().is_empty() {
            return Err(ConfigError::InvalidEnvValue {
                var: "DATABASE_URL".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let bind_address =
            bind_address
                .parse::<SocketAddr>()
                .map_err(|e| ConfigError::InvalidEnvValue {
                    var: "BIND_ADDRESS".to_string(),
                    reason: e.to_string(),
                })?;

        Ok(Self {
            database_url,
            bind_address,
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
        })
    }
}

/// A positive byte count
fn parse_upload_size(raw: &str) -> Result<u64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvValue {
        var: "MAX_UPLOAD_SIZE".to_string(),
        reason,
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(invalid("must be greater than zero".to_string())),
        Ok(size) => Ok(size),
        Err(e) => Err(invalid(e.to_string())),
    }
}
