//! Command-Line Interface (CLI) argument parsing.
//!
//! This module defines the command-line arguments for the binary using the
//! `clap` crate. These arguments are parsed at startup and then merged with
//! the configuration from the `fanout.toml` file and environment variables.

use clap::Parser;
use figment::{
    value::{Dict, Map, Value},
    Error, Metadata, Profile, Provider,
};
use std::path::PathBuf;

/// Fan a single message out to a set of configured notification targets.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "fanout.toml")]
    pub config: PathBuf,

    /// Only dispatch to the targets with these IDs (repeatable).
    #[arg(short, long, value_name = "ID")]
    pub id: Vec<String>,

    /// Output format override applied to every target for this run.
    #[arg(short, long, value_name = "NAME", default_value = "")]
    pub format: String,

    /// The message to dispatch. Read from stdin when omitted.
    #[arg(short, long, value_name = "TEXT")]
    pub data: Option<String>,

    /// Logging level override (e.g. "debug").
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Provider for Cli {
    fn metadata(&self) -> Metadata {
        Metadata::named("Command-Line Arguments")
    }

    fn data(&self) -> Result<Map<Profile, Dict>, Error> {
        let mut dict = Dict::new();

        if let Some(level) = &self.log_level {
            dict.insert("log_level".into(), Value::from(level.clone()));
        }

        Ok(Map::from([(Profile::Default, dict)]))
    }
}
