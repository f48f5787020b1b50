//! # Configuration
//!
//! Catalog, thresholds and display currency, loaded once at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BUNDLE_MINIMUM_ITEMS=4                                             │
//! │     BUNDLE_DISCOUNT_THRESHOLD=3                                        │
//! │     BUNDLE_DISCOUNT_PERCENTAGE=25                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path> or BUNDLE_CONFIG                                   │
//! │     otherwise ~/.config/bundle-builder/bundle.toml (Linux), if present │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     six products at $150.00, 3 items, 30% off                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! currency_symbol = "$"
//!
//! [settings]
//! minimum_items = 3
//! discount_threshold = 3
//! discount_percentage = 30
//!
//! [[products]]
//! id = 1
//! name = "Tie-Dye Lounge Set"
//! price_cents = 15000
//! image = "product1.svg"
//! preselected = false
//! ```
//!
//! Values are validated when the engine is built, not while parsing.

use std::path::{Path, PathBuf};

use bundle_core::{
    BundleEngine, BundleSettings, Catalog, Money, Product, DEFAULT_DISCOUNT_PERCENTAGE,
    DEFAULT_DISCOUNT_THRESHOLD, DEFAULT_MINIMUM_ITEMS,
};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult};

pub const ENV_MINIMUM_ITEMS: &str = "BUNDLE_MINIMUM_ITEMS";
pub const ENV_DISCOUNT_THRESHOLD: &str = "BUNDLE_DISCOUNT_THRESHOLD";
pub const ENV_DISCOUNT_PERCENTAGE: &str = "BUNDLE_DISCOUNT_PERCENTAGE";

const CONFIG_FILE_NAME: &str = "bundle.toml";

// =============================================================================
// Config Types
// =============================================================================

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Symbol prefixed to every amount on screen.
    pub currency_symbol: String,

    pub settings: SettingsConfig,

    /// Catalog in display order.
    pub products: Vec<Product>,
}

/// Raw threshold settings, validated into [`BundleSettings`] later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    pub minimum_items: u32,
    pub discount_threshold: u32,
    pub discount_percentage: u32,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        SettingsConfig {
            minimum_items: DEFAULT_MINIMUM_ITEMS,
            discount_threshold: DEFAULT_DISCOUNT_THRESHOLD,
            discount_percentage: DEFAULT_DISCOUNT_PERCENTAGE,
        }
    }
}

impl Default for AppConfig {
    /// The stock storefront: six outfits at $150.00 each, none preselected.
    fn default() -> Self {
        let catalog: [(u32, &str, &str); 6] = [
            (1, "Tie-Dye Lounge Set", "product1.svg"),
            (2, "Sunburst Tracksuit", "product2.png"),
            (3, "Retro Red Streetwear", "product3.svg"),
            (4, "Urban Sportwear Combo", "product4.svg"),
            (5, "Oversized Knit & Coat", "product5.svg"),
            (6, "Chic Monochrome Blazer", "product6.svg"),
        ];

        AppConfig {
            currency_symbol: "$".to_string(),
            settings: SettingsConfig::default(),
            products: catalog
                .iter()
                .map(|&(id, name, image)| {
                    Product::new(id, name, Money::from_major_minor(150, 0), image)
                })
                .collect(),
        }
    }
}

// =============================================================================
// Loading
// =============================================================================

impl AppConfig {
    /// Loads configuration from file (if any) and the process environment.
    ///
    /// An explicit `path` must exist. Without one, the platform config
    /// directory is checked and defaults are used when nothing is there.
    pub fn load(path: Option<&Path>) -> AppResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("no config file, using defaults");
                    AppConfig::default()
                }
            },
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Parses a TOML config file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| AppError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|source| AppError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Applies `BUNDLE_*` overrides read through `lookup`.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let targets = [
            (ENV_MINIMUM_ITEMS, &mut self.settings.minimum_items),
            (ENV_DISCOUNT_THRESHOLD, &mut self.settings.discount_threshold),
            (ENV_DISCOUNT_PERCENTAGE, &mut self.settings.discount_percentage),
        ];

        for (key, slot) in targets {
            let Some(raw) = lookup(key) else { continue };
            match raw.trim().parse::<u32>() {
                Ok(value) => {
                    debug!(key, value, "environment override");
                    *slot = value;
                }
                Err(_) => warn!(key, value = %raw, "ignoring non-numeric override"),
            }
        }
    }

    /// Validates the catalog and settings and builds an engine.
    pub fn build_engine(&self) -> AppResult<BundleEngine> {
        let catalog = Catalog::new(self.products.clone())?;
        let settings = BundleSettings::new(
            self.settings.minimum_items,
            self.settings.discount_threshold,
            self.settings.discount_percentage,
        )?;

        Ok(BundleEngine::new(catalog, settings))
    }
}

/// `<config dir>/bundle.toml` for this platform.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "bundle", "bundle-builder")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
