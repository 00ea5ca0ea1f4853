//! Persistent CLI Configuration Loader
//!
//! Configuration is loaded from `~/.config/zakat-engine/config.toml` on Linux,
//! `~/Library/Application Support/zakat-engine/config.toml` on macOS
//! or `%APPDATA%\zakat-engine\config.toml` on Windows, unless a path is given.
//!
//! Prices resolve from lowest to highest precedence: built-in defaults, this
//! file, the `ZAKAT_*_PRICE` environment variables, then `--gold-price`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use zakat_engine::ZakatConfig;
use zakat_engine::fitrah::StapleFood;
use zakat_engine::types::ZakatError;

/// CLI Configuration structure loaded from TOML file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CliConfig {
    /// Gold price per gram.
    pub gold_price: Option<Decimal>,
    /// Rice price per kilogram.
    pub rice_price: Option<Decimal>,
    /// Wheat price per kilogram.
    pub wheat_price: Option<Decimal>,
    /// Staple food used for Zakat Fitrah when none is given.
    pub food: Option<StapleFood>,
    /// Print JSON instead of text.
    pub json: Option<bool>,
}

impl CliConfig {
    /// Returns the full path to the default config file.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("zakat-engine").join("config.toml"))
    }

    /// Loads `path`, or the default location when `path` is `None`.
    ///
    /// A missing or malformed default file yields `CliConfig::default()`; an
    /// explicitly requested file must exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self, String> {
        if let Some(path) = path {
            let content = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config file {:?}: {}", path, e))?;
            return toml::from_str(&content).map_err(|e| format!("Failed to parse config file {:?}: {}", path, e));
        }

        let Some(path) = Self::config_path() else {
            debug!("Could not determine config directory");
            return Ok(Self::default());
        };

        if !path.exists() {
            debug!("No config file found at {:?}", path);
            return Ok(Self::default());
        }

        match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str::<CliConfig>(&content) {
                Ok(config) => {
                    debug!("Loaded configuration from {:?}", path);
                    Ok(config)
                }
                Err(e) => {
                    warn!("Failed to parse config file {:?}: {}", path, e);
                    Ok(Self::default())
                }
            },
            Err(e) => {
                warn!("Failed to read config file {:?}: {}", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Builds the engine config: this file over the defaults, then the
    /// environment on top.
    pub fn to_zakat_config(&self) -> Result<ZakatConfig, ZakatError> {
        let mut builder = ZakatConfig::builder();
        if let Some(price) = self.gold_price {
            builder = builder.gold_price(price);
        }
        if let Some(price) = self.rice_price {
            builder = builder.rice_price(price);
        }
        if let Some(price) = self.wheat_price {
            builder = builder.wheat_price(price);
        }
        builder.env_prices().build()
    }
}
