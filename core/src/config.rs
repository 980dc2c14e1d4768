// config.rs
//! Tunables for the transforms.
//!
//! `buffer_size` is the pull chunk size of a read-mode `CompressingStream` and
//! the `BufReader` capacity of a `KeyedResourceReader`. Neither affects the
//! bytes produced; it only trades memory for fewer calls into the source.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE, MIN_BUFFER_SIZE};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("buffer size {have} outside [{min}, {max}]")]
    BufferSize { have: usize, min: usize, max: usize },

    #[error("malformed config: {0}")]
    Malformed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    pub buffer_size: usize,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { buffer_size: DEFAULT_BUFFER_SIZE }
    }
}

impl StreamConfig {
    /// Build a config from an optional requested size.
    /// - None → default.
    /// - Out-of-range requests are clamped rather than rejected.
    pub fn with_buffer_size(requested: Option<usize>) -> Self {
        let buffer_size = match requested {
            None => DEFAULT_BUFFER_SIZE,
            Some(size) => size.clamp(MIN_BUFFER_SIZE, MAX_BUFFER_SIZE),
        };
        Self { buffer_size }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BUFFER_SIZE..=MAX_BUFFER_SIZE).contains(&self.buffer_size) {
            return Err(ConfigError::BufferSize {
                have: self.buffer_size,
                min: MIN_BUFFER_SIZE,
                max: MAX_BUFFER_SIZE,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config, e.g. `{"buffer_size": 8192}`.
    /// Missing fields fall back to defaults.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: StreamConfig =
            serde_json::from_str(s).map_err(|e| ConfigError::Malformed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|e| ConfigError::Malformed(e.to_string()))
    }
}
