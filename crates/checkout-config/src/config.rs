//! # Tenant Fee Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                            │
//! │     CHECKOUT_TAX_PERCENT=8.25                                           │
//! │     CHECKOUT_APPLY_CARD_FEES=false                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                    │
//! │     ~/.config/checkout-engine/checkout.toml (Linux)                     │
//! │     ~/Library/Application Support/com.checkout.engine/checkout.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                    │
//! │     USD, no tax, no card fees, card fees allowed                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [tenant]
//! id = "academy-north"
//! currency = "USD"
//!
//! [fees]
//! tax_percent = 8.0
//! card_fees_percent = 2.9
//! bank_fees_percent = 0.8
//!
//! [checkout]
//! apply_card_fees = true
//! ```
//!
//! Percentages are plain numbers (`2.9` = 2.9%). A percentage that is not a
//! usable number becomes 0 in the fee schedule rather than an error.

use std::path::PathBuf;

use checkout_core::compositor::FeeSchedule;
use checkout_core::types::Rate;
use checkout_core::validation::{validate_currency, validate_rate};
use checkout_core::DEFAULT_CURRENCY;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

// =============================================================================
// Tenant Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantSettings {
    #[serde(default = "default_tenant_id")]
    pub id: String,

    /// ISO 4217 code.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_tenant_id() -> String {
    "default".to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

impl Default for TenantSettings {
    fn default() -> Self {
        TenantSettings {
            id: default_tenant_id(),
            currency: default_currency(),
        }
    }
}

// =============================================================================
// Fee Settings
// =============================================================================

/// Percentages as the tenant admin entered them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeeSettings {
    #[serde(default)]
    pub tax_percent: f64,

    #[serde(default)]
    pub card_fees_percent: f64,

    #[serde(default)]
    pub bank_fees_percent: f64,
}

// =============================================================================
// Checkout Settings
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Card fees may be passed on to buyers at all.
    #[serde(default = "default_true")]
    pub apply_card_fees: bool,
}

fn default_true() -> bool {
    true
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            apply_card_fees: true,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete tenant fee configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TenantFeeConfig {
    #[serde(default)]
    pub tenant: TenantSettings,

    #[serde(default)]
    pub fees: FeeSettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,
}

impl TenantFeeConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (checkout.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading checkout config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());

        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load checkout config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ConfigError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents)?;

        info!(?path, "Checkout config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.tenant.id.trim().is_empty() {
            return Err(ConfigError::InvalidConfig("tenant id is required".into()));
        }

        validate_currency(&self.tenant.currency)?;

        let schedule = self.fee_schedule();
        validate_rate("tax_percent", schedule.tax)?;
        validate_rate("card_fees_percent", schedule.card)?;
        validate_rate("bank_fees_percent", schedule.bank)?;

        Ok(())
    }

    /// Applies `CHECKOUT_*` overrides from `lookup`.
    ///
    /// A percentage variable that does not parse counts as 0.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(id) = lookup("CHECKOUT_TENANT_ID") {
            debug!(tenant_id = %id, "Overriding tenant ID from environment");
            self.tenant.id = id;
        }

        if let Some(currency) = lookup("CHECKOUT_CURRENCY") {
            self.tenant.currency = currency.trim().to_uppercase();
        }

        for (key, slot) in [
            ("CHECKOUT_TAX_PERCENT", &mut self.fees.tax_percent),
            ("CHECKOUT_CARD_FEES_PERCENT", &mut self.fees.card_fees_percent),
            ("CHECKOUT_BANK_FEES_PERCENT", &mut self.fees.bank_fees_percent),
        ] {
            if let Some(raw) = lookup(key) {
                *slot = raw.trim().parse::<f64>().unwrap_or_else(|_| {
                    warn!(key, value = %raw, "Percentage is not a number, using 0");
                    0.0
                });
                debug!(key, percent = *slot, "Overriding fee from environment");
            }
        }

        if let Some(raw) = lookup("CHECKOUT_APPLY_CARD_FEES") {
            match raw.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => self.checkout.apply_card_fees = true,
                "false" | "0" | "no" | "off" => self.checkout.apply_card_fees = false,
                _ => warn!(value = %raw, "Unknown CHECKOUT_APPLY_CARD_FEES value"),
            }
        }
    }

    /// The schedule handed to the pricing pipeline.
    pub fn fee_schedule(&self) -> FeeSchedule {
        FeeSchedule {
            tax: Rate::from_percentage(self.fees.tax_percent),
            card: Rate::from_percentage(self.fees.card_fees_percent),
            bank: Rate::from_percentage(self.fees.bank_fees_percent),
            apply_card_fees: self.checkout.apply_card_fees,
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "checkout", "engine")
            .map(|dirs| dirs.config_dir().join("checkout.toml"))
    }

    /// Returns the tenant ID.
    pub fn tenant_id(&self) -> &str {
        &self.tenant.id
    }

    /// Returns the tenant currency.
    pub fn currency(&self) -> &str {
        &self.tenant.currency
    }
}
