//! Configuration management for Fanout
//!
//! This module defines the main `Config` struct holding the full target list
//! and runtime settings. It uses the `figment` crate to load configuration
//! from a `fanout.toml` file and merge it with environment variables; CLI
//! arguments layer on top via the `Provider` impl in [`crate::cli`].

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment, Provider,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::TargetDescriptor;

/// A malformed or missing required descriptor field, surfaced at provider
/// construction time. Fatal: the caller must not proceed to dispatch.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("target `{id}` is missing required field `{field}`")]
    MissingField { id: String, field: &'static str },
}

/// The main configuration struct for the dispatcher.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging level for the process.
    pub log_level: String,
    /// The full set of configured delivery targets, in file order.
    #[serde(default)]
    pub targets: Vec<TargetDescriptor>,
}

impl Config {
    /// Loads the configuration by layering sources: defaults, the TOML file,
    /// `FANOUT_`-prefixed environment variables, then the given provider
    /// (typically the parsed CLI arguments).
    pub fn load(config_path: &str, overrides: impl Provider) -> Result<Self> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            // Allow overriding with environment variables, e.g. FANOUT_LOG_LEVEL=debug
            .merge(Env::prefixed("FANOUT_"))
            .merge(overrides)
            .extract()?;
        Ok(config)
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            targets: Vec::new(),
        }
    }
}
