use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::scoring::topic::DEFAULT_DECAY_SCALE;

pub const DEFAULT_PROJECT_NAME: &str = "ML Server";
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy, so every value can live
/// there instead of the shell environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Service name reported by the health check.
    pub project_name: String,
    /// Directory holding topic_keywords.json and emails.json.
    pub data_dir: PathBuf,
    pub bind: String,
    pub port: u16,
    /// Topic scorer decay scale, in characters of length difference.
    pub decay_scale: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_name: DEFAULT_PROJECT_NAME.to_string(),
            data_dir: PathBuf::from("./data"),
            bind: DEFAULT_BIND.to_string(),
            port: DEFAULT_PORT,
            decay_scale: DEFAULT_DECAY_SCALE,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default; only malformed numbers are errors.
    pub fn load() -> Result<Self> {
        let defaults = Self::default();

        let port = match env::var("MAILTOPIC_PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("MAILTOPIC_PORT is not a valid port: {raw}"))?,
            Err(_) => defaults.port,
        };

        let decay_scale = match env::var("MAILTOPIC_DECAY_SCALE") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("MAILTOPIC_DECAY_SCALE is not a number: {raw}"))?,
            Err(_) => defaults.decay_scale,
        };

        let config = Self {
            project_name: env::var("MAILTOPIC_PROJECT_NAME").unwrap_or(defaults.project_name),
            data_dir: env::var("MAILTOPIC_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            bind: env::var("MAILTOPIC_BIND").unwrap_or(defaults.bind),
            port,
            decay_scale,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but make no sense.
    pub fn validate(&self) -> Result<()> {
        if !self.decay_scale.is_finite() || self.decay_scale <= 0.0 {
            anyhow::bail!(
                "MAILTOPIC_DECAY_SCALE must be a positive number, got {}",
                self.decay_scale
            );
        }
        Ok(())
    }
}
