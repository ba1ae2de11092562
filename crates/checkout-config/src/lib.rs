//! # checkout-config: Tenant Fee Configuration
//!
//! Loads the per-tenant tax, card-fee and bank-fee percentages and turns
//! them into the [`FeeSchedule`](checkout_core::compositor::FeeSchedule)
//! the pricing pipeline consumes.
//!
//! ```text
//! defaults ──► checkout.toml ──► CHECKOUT_* env ──► validate ──► FeeSchedule
//! ```

pub mod config;
pub mod error;

pub use config::{CheckoutSettings, FeeSettings, TenantFeeConfig, TenantSettings};
pub use error::{ConfigError, ConfigResult};
