//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VOLTMART_STORE_NAME, VOLTMART_TAX_RATE, VOLTMART_DATA_DIR,         │
//! │     VOLTMART_DEMO_ACCOUNT, VOLTMART_DELAY_MS                           │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/voltmart/voltmart.toml (Linux)                           │
//! │     ~/Library/Application Support/com.voltmart.storefront/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "VoltMart"
//! currency_code = "INR"
//! currency_symbol = "₹"
//!
//! [checkout]
//! tax_rate_bps = 1800
//! free_shipping_threshold = 500
//! shipping_fee = 50
//! simulated_delay_ms = 2000
//!
//! [auth]
//! demo_account_enabled = true
//! simulated_delay_ms = 500
//!
//! [storage]
//! data_dir = "/var/lib/voltmart"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use voltmart_core::checkout::PricingRules;
use voltmart_core::{Money, TaxRate};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_currency_code")]
    pub currency_code: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "VoltMart".to_string()
}

fn default_currency_code() -> String {
    "INR".to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            name: default_store_name(),
            currency_code: default_currency_code(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// Order pricing and checkout latency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSection {
    /// GST in basis points. Default: 1800 (18%)
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Subtotals strictly above this (whole rupees) ship free.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: i64,

    #[serde(default = "default_shipping_fee")]
    pub shipping_fee: i64,

    /// Fake payment processing time. 0 disables the wait.
    #[serde(default = "default_checkout_delay")]
    pub simulated_delay_ms: u64,
}

fn default_tax_rate_bps() -> u32 {
    voltmart_core::DEFAULT_TAX_RATE_BPS
}

fn default_free_shipping_threshold() -> i64 {
    voltmart_core::FREE_SHIPPING_THRESHOLD.units()
}

fn default_shipping_fee() -> i64 {
    voltmart_core::DEFAULT_SHIPPING_FEE.units()
}

fn default_checkout_delay() -> u64 {
    2000
}

impl Default for CheckoutSection {
    fn default() -> Self {
        CheckoutSection {
            tax_rate_bps: default_tax_rate_bps(),
            free_shipping_threshold: default_free_shipping_threshold(),
            shipping_fee: default_shipping_fee(),
            simulated_delay_ms: default_checkout_delay(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSection {
    /// Accept the built-in demo@example.com / demo123 credentials.
    #[serde(default = "default_true")]
    pub demo_account_enabled: bool,

    /// Fake login/registration round-trip. 0 disables the wait.
    #[serde(default = "default_auth_delay")]
    pub simulated_delay_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_auth_delay() -> u64 {
    500
}

impl Default for AuthSection {
    fn default() -> Self {
        AuthSection {
            demo_account_enabled: true,
            simulated_delay_ms: default_auth_delay(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageSection {
    /// Where the `<key>.json` slots live. `None` uses the platform data dir.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

// =============================================================================
// ShopConfig
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopConfig {
    #[serde(default)]
    pub store: StoreSection,

    #[serde(default)]
    pub checkout: CheckoutSection,

    #[serde(default)]
    pub auth: AuthSection,

    #[serde(default)]
    pub storage: StorageSection,
}

impl ShopConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (voltmart.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.store.name.trim().is_empty() {
            return Err(ConfigError::Invalid("store.name cannot be empty".into()));
        }

        if self.checkout.tax_rate_bps > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "checkout.tax_rate_bps must be at most 10000, got {}",
                self.checkout.tax_rate_bps
            )));
        }

        if self.checkout.free_shipping_threshold < 0 || self.checkout.shipping_fee < 0 {
            return Err(ConfigError::Invalid(
                "checkout amounts cannot be negative".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("VOLTMART_STORE_NAME") {
            self.store.name = name;
        }

        // Percent, e.g. "18" or "12.5"
        if let Ok(rate) = std::env::var("VOLTMART_TAX_RATE") {
            match rate.parse::<f64>() {
                Ok(pct) if pct >= 0.0 => {
                    debug!(rate = %rate, "Overriding tax rate from environment");
                    self.checkout.tax_rate_bps = TaxRate::from_percentage(pct).bps();
                }
                _ => warn!(rate = %rate, "Ignoring invalid VOLTMART_TAX_RATE"),
            }
        }

        if let Ok(dir) = std::env::var("VOLTMART_DATA_DIR") {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }

        if let Ok(flag) = std::env::var("VOLTMART_DEMO_ACCOUNT") {
            match flag.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.auth.demo_account_enabled = true,
                "0" | "false" | "no" | "off" => self.auth.demo_account_enabled = false,
                _ => warn!(value = %flag, "Ignoring invalid VOLTMART_DEMO_ACCOUNT"),
            }
        }

        // One knob for both simulated waits
        if let Ok(ms) = std::env::var("VOLTMART_DELAY_MS") {
            if let Ok(ms) = ms.parse::<u64>() {
                self.checkout.simulated_delay_ms = ms;
                self.auth.simulated_delay_ms = ms;
            }
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "voltmart", "storefront")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("voltmart.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Configured data dir, else the platform data dir.
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.storage
            .data_dir
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    pub fn pricing_rules(&self) -> PricingRules {
        PricingRules {
            tax_rate: TaxRate::from_bps(self.checkout.tax_rate_bps),
            free_shipping_threshold: Money::from_units(self.checkout.free_shipping_threshold),
            shipping_fee: Money::from_units(self.checkout.shipping_fee),
        }
    }

    pub fn checkout_delay(&self) -> Duration {
        Duration::from_millis(self.checkout.simulated_delay_ms)
    }

    pub fn auth_delay(&self) -> Duration {
        Duration::from_millis(self.auth.simulated_delay_ms)
    }

    /// Zero-latency config for tests and scripted runs.
    pub fn without_delays(mut self) -> Self {
        self.checkout.simulated_delay_ms = 0;
        self.auth.simulated_delay_ms = 0;
        self
    }
}
