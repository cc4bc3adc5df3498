//! Configuration for a simulation run.
//!
//! Loaded from the JSON file named by `TORUS_LIFE_CONFIG`, falling back to
//! defaults. Every field is optional in the file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{Algorithm, RefreshPolicy};
use crate::error::{Error, Result};

/// Environment variable naming the config file
pub const CONFIG_ENV: &str = "TORUS_LIFE_CONFIG";

/// Cell state type the world is instantiated with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CellKind {
    /// Dead / alive, for the Life-like rules
    #[default]
    Binary,
    /// Ready / firing / refractory, for Brian's Brain
    Tristate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// World height; `None` fills the window
    pub rows: Option<usize>,
    /// World width; `None` fills the window
    pub cols: Option<usize>,
    pub cell: CellKind,
    /// Rule name, see `rules::RULE_NAMES`
    pub rule: String,
    /// Preset to stamp instead of random seeding
    pub pattern: Option<String>,
    /// Fixed seed for reproducible random seeding
    pub seed: Option<u64>,
    pub algorithm: Algorithm,
    pub refresh: RefreshPolicy,
    /// Glyph height in pixels
    pub font_size: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: None,
            cols: None,
            cell: CellKind::Binary,
            rule: "conway".to_string(),
            pattern: None,
            seed: None,
            algorithm: Algorithm::Serial,
            refresh: RefreshPolicy::PerRow,
            font_size: 16,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `TORUS_LIFE_CONFIG` if set, defaults otherwise
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                info!(path = %path, "loading configuration");
                Self::from_file(path)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == Some(0) || self.cols == Some(0) {
            return Err(Error::Config("rows and cols must be positive".to_string()));
        }
        if self.font_size == 0 {
            return Err(Error::Config("font_size must be positive".to_string()));
        }
        if self.rule.is_empty() {
            return Err(Error::Config("rule must not be empty".to_string()));
        }
        Ok(())
    }

    /// World dimensions, filling unset axes from the available glyph area
    pub fn dimensions(&self, available_rows: usize, available_cols: usize) -> (usize, usize) {
        (
            self.rows.unwrap_or(available_rows).max(1),
            self.cols.unwrap_or(available_cols).max(1),
        )
    }
}
