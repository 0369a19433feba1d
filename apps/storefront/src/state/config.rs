//! # Storefront Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (later overrides earlier)
//! 1. Defaults (this file)
//! 2. Config file (`config.toml`)
//!    - `~/.config/foodie/config.toml` (Linux)
//!    - `~/Library/Application Support/com.foodie.storefront/config.toml` (macOS)
//! 3. Environment variables (`FOODIE_*`)
//!
//! ## Example Config File
//! ```toml
//! data_dir = "/var/lib/foodie"
//! storage_key = "foodie-cart"
//! cart_expiry_hours = 24
//! delivery_fee_rupees = 40
//! tax_rate_bps = 800
//! delivery_minutes = 45
//! currency_symbol = "₹"
//! catalog_path = "/etc/foodie/catalog.json"
//! ```

use std::path::{Path, PathBuf};

use chrono::Duration;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use foodie_core::{
    CheckoutPricing, Money, TaxRate, CART_EXPIRY_HOURS, CART_STORAGE_KEY,
    DEFAULT_DELIVERY_FEE_RUPEES, DEFAULT_DELIVERY_TIME_MINUTES, DEFAULT_TAX_RATE_BPS,
};

use super::LAST_ORDER_KEY;
use crate::error::{AppError, AppResult};

const CONFIG_FILE_NAME: &str = "config.toml";

/// One year.
pub const MAX_CART_EXPIRY_HOURS: i64 = 8_760;
/// One day.
pub const MAX_DELIVERY_MINUTES: i64 = 1_440;
pub const MAX_DELIVERY_FEE_RUPEES: i64 = 10_000;

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorefrontConfig {
    /// Where the cart file lives. Default: the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Storage key (file name stem) of the cart snapshot.
    pub storage_key: String,

    /// Age after which a stored cart is discarded.
    pub cart_expiry_hours: i64,

    /// Flat delivery fee for non-empty orders, in rupees.
    pub delivery_fee_rupees: i64,

    /// Tax on the subtotal in basis points (800 = 8%).
    pub tax_rate_bps: u32,

    /// Promised delivery time for order estimates.
    pub delivery_minutes: i64,

    /// Symbol printed in front of amounts.
    pub currency_symbol: String,

    /// JSON catalog replacing the built-in one.
    pub catalog_path: Option<PathBuf>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        StorefrontConfig {
            data_dir: None,
            storage_key: CART_STORAGE_KEY.to_string(),
            cart_expiry_hours: CART_EXPIRY_HOURS,
            delivery_fee_rupees: DEFAULT_DELIVERY_FEE_RUPEES,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            delivery_minutes: DEFAULT_DELIVERY_TIME_MINUTES,
            currency_symbol: "₹".to_string(),
            catalog_path: None,
        }
    }
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// An explicit `config_path` must exist; the default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = match config_path {
            Some(path) => Self::from_file(&path)?,
            None => match Self::default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                    Self::default()
                }
                None => Self::default(),
            },
        };

        config.apply_env_overrides(|name| std::env::var(name).ok());
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> AppResult<Self> {
        info!(?path, "Loading storefront config from file");

        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Cannot read {}: {}", path.display(), e)))?;

        toml::from_str(&contents)
            .map_err(|e| AppError::config(format!("Invalid {}: {}", path.display(), e)))
    }

    /// Applies `FOODIE_*` overrides read through `lookup`.
    ///
    /// ## Environment Variables
    /// - `FOODIE_DATA_DIR`
    /// - `FOODIE_STORAGE_KEY`
    /// - `FOODIE_CART_EXPIRY_HOURS`
    /// - `FOODIE_DELIVERY_FEE`: rupees
    /// - `FOODIE_TAX_RATE`: percent, e.g. "8" or "5.5"
    /// - `FOODIE_DELIVERY_MINUTES`
    /// - `FOODIE_CURRENCY_SYMBOL`
    /// - `FOODIE_CATALOG`
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup("FOODIE_DATA_DIR") {
            debug!(data_dir = %dir, "Overriding data dir from environment");
            self.data_dir = Some(PathBuf::from(dir));
        }

        if let Some(key) = lookup("FOODIE_STORAGE_KEY") {
            self.storage_key = key;
        }

        if let Some(hours) = lookup("FOODIE_CART_EXPIRY_HOURS") {
            match hours.parse::<i64>() {
                Ok(h) => self.cart_expiry_hours = h,
                Err(_) => warn!(value = %hours, "Ignoring FOODIE_CART_EXPIRY_HOURS"),
            }
        }

        if let Some(fee) = lookup("FOODIE_DELIVERY_FEE") {
            match fee.parse::<i64>() {
                Ok(f) => self.delivery_fee_rupees = f,
                Err(_) => warn!(value = %fee, "Ignoring FOODIE_DELIVERY_FEE"),
            }
        }

        if let Some(rate) = lookup("FOODIE_TAX_RATE") {
            match rate.parse::<f64>() {
                Ok(pct) if pct >= 0.0 => self.tax_rate_bps = (pct * 100.0).round() as u32,
                _ => warn!(value = %rate, "Ignoring FOODIE_TAX_RATE"),
            }
        }

        if let Some(minutes) = lookup("FOODIE_DELIVERY_MINUTES") {
            match minutes.parse::<i64>() {
                Ok(m) => self.delivery_minutes = m,
                Err(_) => warn!(value = %minutes, "Ignoring FOODIE_DELIVERY_MINUTES"),
            }
        }

        if let Some(symbol) = lookup("FOODIE_CURRENCY_SYMBOL") {
            self.currency_symbol = symbol;
        }

        if let Some(path) = lookup("FOODIE_CATALOG") {
            self.catalog_path = Some(PathBuf::from(path));
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if self.storage_key.trim().is_empty() {
            return Err(AppError::config("storage_key must not be empty"));
        }

        if self.storage_key == LAST_ORDER_KEY {
            return Err(AppError::config(format!(
                "storage_key '{}' is reserved for orders",
                LAST_ORDER_KEY
            )));
        }

        if !(1..=MAX_CART_EXPIRY_HOURS).contains(&self.cart_expiry_hours) {
            return Err(AppError::config(format!(
                "cart_expiry_hours must be between 1 and {}, got {}",
                MAX_CART_EXPIRY_HOURS, self.cart_expiry_hours
            )));
        }

        if !(0..=MAX_DELIVERY_FEE_RUPEES).contains(&self.delivery_fee_rupees) {
            return Err(AppError::config(format!(
                "delivery_fee_rupees must be between 0 and {}, got {}",
                MAX_DELIVERY_FEE_RUPEES, self.delivery_fee_rupees
            )));
        }

        if self.tax_rate_bps > 10_000 {
            return Err(AppError::config(format!(
                "tax_rate_bps must be at most 10000, got {}",
                self.tax_rate_bps
            )));
        }

        if !(1..=MAX_DELIVERY_MINUTES).contains(&self.delivery_minutes) {
            return Err(AppError::config(format!(
                "delivery_minutes must be between 1 and {}, got {}",
                MAX_DELIVERY_MINUTES, self.delivery_minutes
            )));
        }

        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Directory for the cart file: configured, else the platform data dir.
    pub fn resolved_data_dir(&self) -> AppResult<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| AppError::config("Could not determine app data directory"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================
    // Clamped to the ranges `validate` enforces.

    pub fn cart_expiry(&self) -> Duration {
        Duration::hours(self.cart_expiry_hours.clamp(1, MAX_CART_EXPIRY_HOURS))
    }

    pub fn pricing(&self) -> CheckoutPricing {
        CheckoutPricing {
            delivery_fee: Money::from_major(
                self.delivery_fee_rupees.clamp(0, MAX_DELIVERY_FEE_RUPEES),
            ),
            tax_rate: TaxRate::from_bps(self.tax_rate_bps.min(10_000)),
            delivery_minutes: self.delivery_minutes.clamp(1, MAX_DELIVERY_MINUTES),
        }
    }

    /// Formats an amount with the configured symbol.
    ///
    /// ## Example
    /// ```rust
    /// use foodie_core::Money;
    /// use foodie_storefront::state::StorefrontConfig;
    ///
    /// let config = StorefrontConfig::default();
    /// assert_eq!(config.format_currency(Money::from_minor(32050)), "₹320.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        format!(
            "{}{}{}.{:02}",
            if amount.is_negative() { "-" } else { "" },
            self.currency_symbol,
            amount.abs().major(),
            amount.abs().minor_part()
        )
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "foodie", "storefront")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_match_storefront_constants() {
        let config = StorefrontConfig::default();

        assert_eq!(config.storage_key, "foodie-cart");
        assert_eq!(config.cart_expiry(), Duration::hours(24));
        assert_eq!(config.pricing(), CheckoutPricing::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = StorefrontConfig::default();
        config.apply_env_overrides(env(&[
            ("FOODIE_DATA_DIR", "/tmp/foodie"),
            ("FOODIE_CART_EXPIRY_HOURS", "2"),
            ("FOODIE_DELIVERY_FEE", "25"),
            ("FOODIE_TAX_RATE", "5.5"),
            ("FOODIE_CURRENCY_SYMBOL", "Rs. "),
        ]));

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/foodie")));
        assert_eq!(config.cart_expiry_hours, 2);
        assert_eq!(config.delivery_fee_rupees, 25);
        assert_eq!(config.tax_rate_bps, 550);
        assert_eq!(config.format_currency(Money::from_major(5)), "Rs. 5.00");
    }

    #[test]
    fn test_unparsable_env_values_are_ignored() {
        let mut config = StorefrontConfig::default();
        config.apply_env_overrides(env(&[
            ("FOODIE_CART_EXPIRY_HOURS", "a day"),
            ("FOODIE_TAX_RATE", "-3"),
        ]));

        assert_eq!(config.cart_expiry_hours, 24);
        assert_eq!(config.tax_rate_bps, 800);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = StorefrontConfig::default();
        config.cart_expiry_hours = 0;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.tax_rate_bps = 10_001;
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.storage_key = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = StorefrontConfig::default();
        config.storage_key = LAST_ORDER_KEY.to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_env_values() {
        for (name, value) in [
            ("FOODIE_CART_EXPIRY_HOURS", "10000000000000"),
            ("FOODIE_DELIVERY_MINUTES", "9223372036854775807"),
            ("FOODIE_DELIVERY_FEE", "92233720368547758"),
        ] {
            let mut config = StorefrontConfig::default();
            config.apply_env_overrides(env(&[(name, value)]));

            let err = config.validate().unwrap_err();
            assert_eq!(err.code, crate::error::ErrorCode::ConfigError, "{}", name);
        }

        let mut config = StorefrontConfig::default();
        config.cart_expiry_hours = MAX_CART_EXPIRY_HOURS;
        config.delivery_minutes = MAX_DELIVERY_MINUTES;
        config.delivery_fee_rupees = MAX_DELIVERY_FEE_RUPEES;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unvalidated_extremes_do_not_panic() {
        let mut config = StorefrontConfig::default();
        config.cart_expiry_hours = i64::MAX;
        config.delivery_minutes = i64::MAX;
        config.delivery_fee_rupees = i64::MAX;

        assert_eq!(config.cart_expiry(), Duration::hours(MAX_CART_EXPIRY_HOURS));
        let pricing = config.pricing();
        assert_eq!(pricing.delivery_minutes, MAX_DELIVERY_MINUTES);
        assert_eq!(pricing.delivery_fee, Money::from_major(MAX_DELIVERY_FEE_RUPEES));
    }

    #[test]
    fn test_load_from_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "delivery_fee_rupees = 30\ntax_rate_bps = 500\n").unwrap();

        let config = StorefrontConfig::from_file(&path).unwrap();

        assert_eq!(config.delivery_fee_rupees, 30);
        assert_eq!(config.tax_rate_bps, 500);
        assert_eq!(config.storage_key, "foodie-cart");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = StorefrontConfig::load(Some(dir.path().join("nope.toml"))).unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::ConfigError);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = StorefrontConfig::default();
        config.data_dir = Some(PathBuf::from("/var/lib/foodie"));

        let text = toml::to_string_pretty(&config).unwrap();
        let back: StorefrontConfig = toml::from_str(&text).unwrap();

        assert_eq!(back, config);
    }

    #[test]
    fn test_format_currency() {
        let config = StorefrontConfig::default();
        assert_eq!(config.format_currency(Money::from_minor(32050)), "₹320.50");
        assert_eq!(config.format_currency(Money::from_minor(5)), "₹0.05");
        assert_eq!(config.format_currency(Money::from_minor(-1234)), "-₹12.34");
    }
}
