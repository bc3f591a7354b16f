//! Engine configuration
//!
//! Thresholds that drive alignment and the similarity cut-over. Everything
//! has a default, so an empty TOML document is a valid configuration:
//!
//! ```toml
//! match_threshold = 0.6
//! near_identical_threshold = 0.95
//! edit_distance_max_chars = 1000
//! detect_moves = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Minimum similarity for two paragraphs to be aligned as "modified"
    #[serde(default = "default_match_threshold")]
    pub match_threshold: f64,
    /// Minimum similarity for an aligned pair to count as near-identical
    #[serde(default = "default_near_identical_threshold")]
    pub near_identical_threshold: f64,
    /// Longest span (in chars) compared with edit distance before falling back to Jaccard
    #[serde(default = "default_edit_distance_max_chars")]
    pub edit_distance_max_chars: usize,
    /// Mark out-of-order matches as moved
    #[serde(default = "default_detect_moves")]
    pub detect_moves: bool,
}

fn default_match_threshold() -> f64 {
    0.6
}

fn default_near_identical_threshold() -> f64 {
    0.95
}

fn default_edit_distance_max_chars() -> usize {
    crate::similarity::EDIT_DISTANCE_MAX_CHARS
}

fn default_detect_moves() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            match_threshold: default_match_threshold(),
            near_identical_threshold: default_near_identical_threshold(),
            edit_distance_max_chars: default_edit_distance_max_chars(),
            detect_moves: default_detect_moves(),
        }
    }
}

impl EngineConfig {
    /// Load and validate configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML is malformed,
    /// or a threshold is invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_range("match_threshold", self.match_threshold)?;
        check_unit_range("near_identical_threshold", self.near_identical_threshold)?;

        if self.near_identical_threshold < self.match_threshold {
            return Err(ConfigError::ThresholdOrder {
                matching: self.match_threshold,
                near_identical: self.near_identical_threshold,
            });
        }

        if self.edit_distance_max_chars == 0 {
            return Err(ConfigError::ZeroEditDistanceLimit);
        }

        Ok(())
    }
}

fn check_unit_range(name: &'static str, value: f64) -> Result<(), ConfigError> {
    // NaN fails both comparisons
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ThresholdOutOfRange { name, value })
    }
}
