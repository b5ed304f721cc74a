//! Engine configuration
//!
//! Loaded from TOML. Every field is optional; omitted fields take defaults.
//!
//! ```toml
//! [normalize]
//! max_steps = 500
//! strategy = "innermost"
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::errors::ConfigError;

/// Default upper bound on rewrite steps during normalization
pub const DEFAULT_MAX_STEPS: usize = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub normalize: NormalizeConfig,
}

/// Settings for [`Normalizer`](crate::backend::eval::Normalizer)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizeConfig {
    /// Rule applications allowed before giving up
    pub max_steps: usize,
    pub strategy: Strategy,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        NormalizeConfig {
            max_steps: DEFAULT_MAX_STEPS,
            strategy: Strategy::default(),
        }
    }
}

/// Where the normalizer looks for the next redex
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Try the whole term first, then sub-terms left to right
    #[default]
    Outermost,
    /// Rewrite the leftmost innermost redex first
    Innermost,
}

impl EngineConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Read and parse a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        debug!(target: "termrite::backend::config", path = %path.display(), ?config, "Loaded engine config");
        Ok(config)
    }
}
