//! # checkout-core: Checkout Pricing Engine
//!
//! Computes the cart summary and payment line items for event, course,
//! membership and donation checkout flows. Pure functions, zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Checkout Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                 Web front end (checkout screens)                │    │
//! │  │   price options ──► buyer form ──► offer code ──► summary       │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ CheckoutRequest                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │               ★ checkout-core (THIS CRATE) ★                    │    │
//! │  │                                                                 │    │
//! │  │  pricing ─► recurring ─► offer ─► compositor ─► summary         │    │
//! │  │                                           └───► line_item       │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO GATEWAY • NO PERSISTENCE • PURE FUNCTIONS         │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │ CheckoutSubmission                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │                 Checkout / payment service                      │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Catalog, buyer and offer inputs; `Rate`
//! - [`pricing`] - Pricing Normalizer, price-option ordering
//! - [`recurring`] - Recurring Decomposer
//! - [`offer`] - Offer Validator / Applier
//! - [`compositor`] - Fee / Tax Compositor and quantity scaling
//! - [`summary`] - Cart summary
//! - [`line_item`] - Payment API line items
//! - [`checkout`] - The whole pipeline plus submission payload
//! - [`validation`] - Input checks run before calculating
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use checkout_core::checkout::{calculate, CheckoutRequest};
//! use checkout_core::compositor::FeeSchedule;
//! use checkout_core::line_item::LineItemContext;
//! use checkout_core::{BuyerForm, Item, MembershipType, Money, Rate};
//!
//! let request = CheckoutRequest {
//!     item: Item {
//!         id: "event-1".into(),
//!         name: "Spring Gala".into(),
//!         price: Money::from_cents(10_000),
//!         is_other_price: false,
//!         qty: 1,
//!         is_taxable: true,
//!         is_charge_credit_card_fees: true,
//!         currency: "USD".into(),
//!         membership_type: MembershipType::OneTime,
//!         registration_fees: Money::zero(),
//!     },
//!     buyer: BuyerForm::default(),
//!     fees: FeeSchedule {
//!         tax: Rate::from_bps(800),
//!         card: Rate::from_bps(300),
//!         bank: Rate::zero(),
//!         apply_card_fees: true,
//!     },
//!     offer: None,
//!     recurring_membership: None,
//!     recurring_donation: None,
//!     context: LineItemContext::default(),
//! };
//!
//! let checkout = calculate(&request);
//! assert_eq!(checkout.summary.card_fees.cents(), 300);
//! assert_eq!(checkout.summary.total_tax.cents(), 824);
//! assert_eq!(checkout.summary.total_price.cents(), 11_124);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod compositor;
pub mod error;
pub mod line_item;
pub mod money;
pub mod offer;
pub mod pricing;
pub mod recurring;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CheckoutError, CheckoutResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single item in one checkout.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Currency used when a tenant has not configured one.
pub const DEFAULT_CURRENCY: &str = "USD";
