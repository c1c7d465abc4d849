//! Configuration management for the contact book.
//!
//! This module handles loading and validating configuration from environment
//! variables. A `.env` file in the working directory is honoured if present.

use crate::domain::MobileLocale;
use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Where contacts are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// Process memory; lost on exit.
    Memory,
    /// A JSON file at the given path.
    File(PathBuf),
}

/// Configuration for the contact book server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on (default: 127.0.0.1:3000)
    pub bind_addr: SocketAddr,

    /// Storage backend (default: memory)
    pub store_backend: StoreBackend,

    /// Locale whose mobile-number pattern phones must match (default: id-ID)
    pub phone_locale: MobileLocale,

    /// Refuse duplicate names at the store as well as in validation (default: false)
    pub enforce_unique_names: bool,

    /// Fallback log filter when RUST_LOG is unset (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CONTACT_BOOK_BIND_ADDR`: listen address (default: 127.0.0.1:3000)
    /// - `CONTACT_STORE_BACKEND`: `memory` or `file` (default: memory)
    /// - `CONTACT_STORE_PATH`: JSON file path, required for the `file` backend
    /// - `CONTACT_PHONE_LOCALE`: mobile-number locale (default: id-ID)
    /// - `CONTACT_ENFORCE_UNIQUE_NAMES`: store-level unique names (default: false)
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env is normal; a malformed one is not
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                return Err(ConfigError::DotenvError(e.to_string()));
            }
        }

        let bind_addr = Self::parse_bind_addr()?;
        let store_backend = Self::parse_store_backend()?;

        let phone_locale = match env::var("CONTACT_PHONE_LOCALE") {
            Ok(val) => val.parse::<MobileLocale>().map_err(|e| ConfigError::InvalidValue {
                var: "CONTACT_PHONE_LOCALE".to_string(),
                reason: e.to_string(),
            })?,
            Err(_) => MobileLocale::default(),
        };

        let enforce_unique_names = Self::parse_env_bool("CONTACT_ENFORCE_UNIQUE_NAMES", false)?;
        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            bind_addr,
            store_backend,
            phone_locale,
            enforce_unique_names,
            log_level,
        })
    }

    fn parse_bind_addr() -> ConfigResult<SocketAddr> {
        let raw = env::var("CONTACT_BOOK_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());
        raw.parse::<SocketAddr>().map_err(|_| ConfigError::InvalidValue {
            var: "CONTACT_BOOK_BIND_ADDR".to_string(),
            reason: format!("Must be host:port, got: {}", raw),
        })
    }

    fn parse_store_backend() -> ConfigResult<StoreBackend> {
        let backend = env::var("CONTACT_STORE_BACKEND").unwrap_or_else(|_| "memory".to_string());

        match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "file" => {
                let path = env::var("CONTACT_STORE_PATH")
                    .map_err(|_| ConfigError::MissingVar("CONTACT_STORE_PATH".to_string()))?;
                if path.trim().is_empty() {
                    return Err(ConfigError::InvalidValue {
                        var: "CONTACT_STORE_PATH".to_string(),
                        reason: "Cannot be empty".to_string(),
                    });
                }
                Ok(StoreBackend::File(PathBuf::from(path)))
            }
            other => Err(ConfigError::InvalidValue {
                var: "CONTACT_STORE_BACKEND".to_string(),
                reason: format!("Must be 'memory' or 'file', got: {}", other),
            }),
        }
    }

    /// Parse an environment variable as a boolean with a default value.
    fn parse_env_bool(var_name: &str, default: bool) -> ConfigResult<bool> {
        match env::var(var_name) {
            Ok(val) => match val.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(ConfigError::InvalidValue {
                    var: var_name.to_string(),
                    reason: format!("Must be true or false, got: {}", val),
                }),
            },
            Err(_) => Ok(default),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([127, 0, 0, 1], 3000))),
            store_backend: StoreBackend::Memory,
            phone_locale: MobileLocale::default(),
            enforce_unique_names: false,
            log_level: "info".to_string(),
        }
    }
}
