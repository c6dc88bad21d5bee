//! Game configuration, loadable from TOML.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest attribute count a tile may carry.
pub const MAX_ATTRIBUTES: usize = 5;
/// Values per attribute are bounded so each value prints as one digit.
pub const MAX_VALUES: u8 = 9;
pub const MIN_VALUES: u8 = 2;

/// Settings fixed for the duration of one game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of attributes on every tile.
    #[serde(default = "default_attribute_count")]
    pub attribute_count: usize,

    /// Distinct values each attribute can take.
    #[serde(default = "default_values_per_attribute")]
    pub values_per_attribute: u8,

    /// Copies of each attribute combination in the stock bag.
    #[serde(default = "default_clones")]
    pub clones_per_combination: u32,

    /// Tiles each hand holds after refilling.
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,

    /// Seed for the stock bag shuffle and automatic players.
    #[serde(default)]
    pub seed: u64,

    /// Rounds of non-play moves (per working hand) that end a game.
    #[serde(default = "default_stalemate_rounds")]
    pub stalemate_rounds: usize,

    /// How long to wait for a remote hand's move.
    #[serde(default = "default_remote_timeout_ms")]
    pub remote_timeout_ms: u64,

    /// Timeouts tolerated before a remote hand is given up on.
    #[serde(default = "default_remote_retries")]
    pub remote_retries: u32,
}

fn default_attribute_count() -> usize {
    2
}

fn default_values_per_attribute() -> u8 {
    6
}

fn default_clones() -> u32 {
    3
}

fn default_hand_size() -> usize {
    6
}

fn default_stalemate_rounds() -> usize {
    2
}

fn default_remote_timeout_ms() -> u64 {
    30_000
}

fn default_remote_retries() -> u32 {
    3
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            attribute_count: default_attribute_count(),
            values_per_attribute: default_values_per_attribute(),
            clones_per_combination: default_clones(),
            hand_size: default_hand_size(),
            seed: 0,
            stalemate_rounds: default_stalemate_rounds(),
            remote_timeout_ms: default_remote_timeout_ms(),
            remote_retries: default_remote_retries(),
        }
    }
}

impl GameConfig {
    /// Parses a configuration from TOML text and validates it.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(text).map_err(|e| Error::config(format!("invalid TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        log::debug!("loading config from {}", path.as_ref().display());
        let text = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::config(format!("cannot read config file: {}", e)))?;
        let config = Self::from_toml(&text)?;
        log::info!(
            "{:<32}{} attributes x {} values",
            "loaded config",
            config.attribute_count,
            config.values_per_attribute
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.attribute_count < 2 || self.attribute_count > MAX_ATTRIBUTES {
            return Err(Error::config(format!(
                "attribute_count must be 2-{}, got {}",
                MAX_ATTRIBUTES, self.attribute_count
            )));
        }
        if self.values_per_attribute < MIN_VALUES || self.values_per_attribute > MAX_VALUES {
            return Err(Error::config(format!(
                "values_per_attribute must be {}-{}, got {}",
                MIN_VALUES, MAX_VALUES, self.values_per_attribute
            )));
        }
        if self.clones_per_combination == 0 {
            return Err(Error::config("clones_per_combination must be positive"));
        }
        if self.hand_size == 0 {
            return Err(Error::config("hand_size must be positive"));
        }
        if self.stalemate_rounds == 0 {
            return Err(Error::config("stalemate_rounds must be positive"));
        }
        Ok(())
    }

    /// Total number of tiles in a fresh stock bag.
    pub fn tile_count(&self) -> usize {
        (self.values_per_attribute as usize).pow(self.attribute_count as u32)
            * self.clones_per_combination as usize
    }

    /// Longest legal line: one tile per value of the varying attributes.
    pub fn max_line_length(&self) -> usize {
        self.values_per_attribute as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tile_count(), 108);
        assert_eq!(config.max_line_length(), 6);
    }

    #[test]
    fn test_from_toml_partial() {
        let config = GameConfig::from_toml("hand_size = 4\nseed = 9\n").unwrap();
        assert_eq!(config.hand_size, 4);
        assert_eq!(config.seed, 9);
        assert_eq!(config.attribute_count, 2);
        assert_eq!(config.values_per_attribute, 6);
    }

    #[test]
    fn test_from_toml_rejects_bad_ranges() {
        assert!(GameConfig::from_toml("attribute_count = 1").is_err());
        assert!(GameConfig::from_toml("values_per_attribute = 10").is_err());
        assert!(GameConfig::from_toml("clones_per_combination = 0").is_err());
        assert!(GameConfig::from_toml("hand_size = \"six\"").is_err());
    }
}
