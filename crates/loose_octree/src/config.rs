//! Octree configuration
//!
//! Tuning parameters are fixed at tree construction and inherited unchanged
//! by every node. Configurations can be loaded from and saved to TOML or
//! RON files.

use serde::{Deserialize, Serialize};

use crate::octree::OctreeError;

/// Configuration for loose octree behavior
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OctreeConfig {
    /// Side length of the initial (and minimum) world volume
    pub initial_size: f32,

    /// Minimum node side length (prevents excessive subdivision)
    pub min_node_size: f32,

    /// Loose size multiplier in [1.0, 2.0]; sibling volumes overlap when > 1
    pub looseness: f32,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            initial_size: 100.0,
            min_node_size: 1.0,
            looseness: 1.2,
        }
    }
}

impl OctreeConfig {
    /// Clamp the configuration into its valid range
    ///
    /// A minimum node size larger than the initial world size is clamped
    /// down to the initial size, and looseness is clamped into [1.0, 2.0].
    /// Both cases are reported through the warning channel and are not
    /// fatal.
    #[must_use]
    pub fn validated(mut self) -> Self {
        if self.min_node_size > self.initial_size {
            log::warn!(
                "{}",
                OctreeError::MinSizeClamped {
                    min_size: self.min_node_size,
                    initial_size: self.initial_size,
                }
            );
            self.min_node_size = self.initial_size;
        }
        if !(1.0..=2.0).contains(&self.looseness) {
            let clamped = self.looseness.clamp(1.0, 2.0);
            log::warn!(
                "looseness {} outside [1.0, 2.0], clamping to {}",
                self.looseness,
                clamped
            );
            self.looseness = clamped;
        }
        self
    }

    /// Load configuration from a TOML or RON file
    pub fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to a TOML or RON file
    pub fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
