use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ResolveError;

pub const DEFAULT_HALF_WIDTH_DEG: f64 = 1.5;
pub const DEFAULT_MAX_CANDIDATES: u32 = 1;
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";

/// Top-level configuration file.
///
/// ```toml
/// [resolver]
/// half_width_deg = 1.5
/// max_candidates = 1
///
/// [server]
/// listen = "0.0.0.0:3000"
/// ```
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub resolver: ResolverConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Tunables for the nearest-feature search.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    /// Half-width of the search box in degrees, applied to both axes.
    /// Sparse datasets may need a wider box to find any neighbor at all.
    pub half_width_deg: f64,
    /// LIMIT on the ranked candidate query.
    pub max_candidates: u32,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            half_width_deg: DEFAULT_HALF_WIDTH_DEG,
            max_candidates: DEFAULT_MAX_CANDIDATES,
        }
    }
}

impl ResolverConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if !self.half_width_deg.is_finite() || self.half_width_deg <= 0.0 {
            return Err(ResolveError::InvalidConfig(format!(
                "half_width_deg must be a positive number, got {}",
                self.half_width_deg
            )));
        }
        if self.max_candidates == 0 {
            return Err(ResolveError::InvalidConfig(
                "max_candidates must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: DEFAULT_LISTEN.to_string(),
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        config
            .resolver
            .validate()
            .context("Invalid [resolver] section")?;
        Ok(config)
    }
}
