//! Service configuration.
//!
//! Read from environment variables, after `.env` has been loaded by `main`.
//! Override tables are published to the TLD registry before any shared
//! validator is acquired.

use crate::error::ValidatorError;
use crate::validation::tld::{TldRegistry, TldTable};

/// Override tables configurable through the environment, with their variables.
const OVERRIDE_VARS: [(TldTable, &str); 6] = [
    (TldTable::GenericPlus, "TLD_GENERIC_PLUS"),
    (TldTable::GenericMinus, "TLD_GENERIC_MINUS"),
    (TldTable::CountryCodePlus, "TLD_COUNTRY_CODE_PLUS"),
    (TldTable::CountryCodeMinus, "TLD_COUNTRY_CODE_MINUS"),
    (TldTable::LocalPlus, "TLD_LOCAL_PLUS"),
    (TldTable::LocalMinus, "TLD_LOCAL_MINUS"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_address: String,
    pub port: u16,
    /// Accept local host names and local TLDs.
    pub allow_local: bool,
    /// Accept a bare TLD as the domain part of an email address.
    pub allow_tld: bool,
    /// Tables set in the environment, in declaration order.
    pub overrides: Vec<(TldTable, Vec<String>)>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: 8080,
            allow_local: false,
            allow_tld: false,
            overrides: Vec::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `BIND_ADDRESS` (default: `127.0.0.1`)
    /// - `PORT` (default: 8080)
    /// - `ALLOW_LOCAL`, `ALLOW_TLD` (default: false)
    /// - `TLD_GENERIC_PLUS`, `TLD_GENERIC_MINUS`, `TLD_COUNTRY_CODE_PLUS`,
    ///   `TLD_COUNTRY_CODE_MINUS`, `TLD_LOCAL_PLUS`, `TLD_LOCAL_MINUS`:
    ///   comma-separated labels
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };

        let overrides = OVERRIDE_VARS
            .iter()
            .filter_map(|&(table, var)| lookup(var).map(|raw| (table, split_labels(&raw))))
            .collect();

        Ok(Self {
            bind_address: lookup("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port,
            allow_local: env_bool(&lookup, "ALLOW_LOCAL", defaults.allow_local)?,
            allow_tld: env_bool(&lookup, "ALLOW_TLD", defaults.allow_tld)?,
            overrides,
        })
    }

    /// Publishes the configured override tables to `registry`.
    ///
    /// # Errors
    /// [`ValidatorError::LockedRegistry`] if a shared validator was acquired first.
    pub fn apply_overrides(&self, registry: &TldRegistry) -> Result<(), ValidatorError> {
        for (table, labels) in &self.overrides {
            registry.update_override(*table, labels)?;
        }
        Ok(())
    }
}

fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_string)
        .collect()
}

fn env_bool<F>(lookup: &F, var: &str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidBool(var.to_string(), raw)),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid PORT value: {0:?}")]
    InvalidPort(String),
    #[error("invalid boolean for {0}: {1:?}")]
    InvalidBool(String, String),
}
