use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{name} must be within [0, 1], got {value}")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error("near_identical_threshold ({near_identical}) must not be below match_threshold ({matching})")]
    ThresholdOrder { matching: f64, near_identical: f64 },

    #[error("edit_distance_max_chars must be greater than zero")]
    ZeroEditDistanceLimit,
}
