//! Coinflip Configuration
//!
//! Process-wide, read-only settings loaded from a TOML file at startup.

use serde::Deserialize;
use std::path::Path;
use tracing::info;

use crate::error::ConfigError;

// ============================================================================
// Sections
// ============================================================================

fn default_min_items() -> usize {
    1
}

fn default_max_items() -> usize {
    10
}

fn default_min_amount() -> f64 {
    1.0
}

/// Betting limits for a single join
#[derive(Debug, Clone, Deserialize)]
pub struct CoinflipConfig {
    #[serde(default = "default_min_items")]
    pub min_items: usize,
    #[serde(default = "default_max_items")]
    pub max_items: usize,
    /// Smallest acceptable bet, in dollars
    #[serde(default = "default_min_amount")]
    pub min_amount: f64,
    /// Items priced below this are shown disabled and cannot be selected
    #[serde(default)]
    pub item_threshold: f64,
    #[serde(default)]
    pub range: RangeConfig,
}

impl Default for CoinflipConfig {
    fn default() -> Self {
        Self {
            min_items: default_min_items(),
            max_items: default_max_items(),
            min_amount: default_min_amount(),
            item_threshold: 0.0,
            range: RangeConfig::default(),
        }
    }
}

/// Parameters for scaling the bet range against the pot
#[derive(Debug, Clone, Deserialize)]
pub struct RangeConfig {
    /// Pot size above which the lower bound scales with the pot
    #[serde(default)]
    pub scale_above: f64,
    #[serde(default = "default_lower_ratio")]
    pub lower_ratio: f64,
    #[serde(default = "default_upper_ratio")]
    pub upper_ratio: f64,
}

fn default_lower_ratio() -> f64 {
    0.9
}

fn default_upper_ratio() -> f64 {
    1.1
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            scale_above: 0.0,
            lower_ratio: default_lower_ratio(),
            upper_ratio: default_upper_ratio(),
        }
    }
}

fn default_game_name() -> String {
    "CS:GO".to_string()
}

/// Display strings, only used in user-facing text
#[derive(Debug, Clone, Deserialize)]
pub struct MetadataConfig {
    #[serde(default = "default_game_name")]
    pub game_name: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            game_name: default_game_name(),
        }
    }
}

fn default_image_base_url() -> String {
    "https://steamcommunity-a.akamaihd.net/economy/image/".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            image_base_url: default_image_base_url(),
        }
    }
}

// ============================================================================
// Root
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub coinflip: CoinflipConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub assets: AssetConfig,
}

impl AppConfig {
    /// Load and validate a config file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        info!(
            "Loaded coinflip config from {:?}: {}-{} items, min bet ${:.2}",
            path, config.coinflip.min_items, config.coinflip.max_items, config.coinflip.min_amount
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let c = &self.coinflip;
        if c.max_items == 0 {
            return Err(ConfigError::Invalid("max_items must be positive".into()));
        }
        if c.min_items > c.max_items {
            return Err(ConfigError::Invalid(format!(
                "min_items ({}) exceeds max_items ({})",
                c.min_items, c.max_items
            )));
        }

        let amounts = [
            ("min_amount", c.min_amount),
            ("item_threshold", c.item_threshold),
            ("range.scale_above", c.range.scale_above),
            ("range.lower_ratio", c.range.lower_ratio),
            ("range.upper_ratio", c.range.upper_ratio),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if c.range.lower_ratio > c.range.upper_ratio {
            return Err(ConfigError::Invalid(
                "range.lower_ratio exceeds range.upper_ratio".into(),
            ));
        }
        Ok(())
    }
}
