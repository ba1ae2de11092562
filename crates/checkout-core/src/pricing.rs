//! # Pricing Normalizer
//!
//! First stage of the pipeline: resolve the effective unit price.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Item.price = $10 (floor)      BuyerForm.other_price = "25"             │
//! │        │                                │                               │
//! │        └──────────┬─────────────────────┘                               │
//! │                   ▼                                                     │
//! │   is_other_price && parses as a non-negative amount?                    │
//! │        │ yes                          │ no                              │
//! │        ▼                              ▼                                 │
//! │   unit_price = $25              unit_price = $10 (catalog price)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A missing or unparseable `other_price` is not an error: the catalog price
//! is the floor and stands.
//!
//! This module also owns [`PricedItem`], the value every later stage takes
//! and returns.

use crate::money::Money;
use crate::offer::{AppliedDiscount, DiscountTarget};
use crate::recurring::PricingMode;
use crate::types::{BuyerForm, Item, PriceOption};

// =============================================================================
// Priced Item
// =============================================================================

/// An item moving through the pricing pipeline.
///
/// Each stage consumes a `PricedItem` and returns a new one with its own
/// fields filled in; earlier fields are carried forward untouched.
///
/// | Field        | Set by                |
/// |--------------|-----------------------|
/// | `unit_price` | [`normalize`]         |
/// | `mode`       | `recurring::decompose`|
/// | `discount`   | `offer::process_offer`|
#[derive(Debug, Clone, PartialEq)]
pub struct PricedItem {
    /// Catalog record as received.
    pub item: Item,

    /// Effective base price before any discount.
    pub unit_price: Money,

    /// One-time, recurring membership or recurring donation.
    pub mode: PricingMode,

    /// Resolved offer, if one was applied.
    pub discount: Option<AppliedDiscount>,
}

impl PricedItem {
    /// Registration fee of a recurring membership; zero otherwise.
    pub fn registration_fee(&self) -> Money {
        match &self.mode {
            PricingMode::Recurring {
                registration_fee, ..
            } => *registration_fee,
            _ => Money::zero(),
        }
    }

    /// True for anything billed on a schedule.
    pub fn is_recurring(&self) -> bool {
        !matches!(self.mode, PricingMode::OneTime)
    }

    /// Which component an offer reduces.
    pub fn discount_target(&self) -> DiscountTarget {
        match self.mode {
            PricingMode::Recurring { .. } => DiscountTarget::RegistrationFee,
            _ => DiscountTarget::ItemPrice,
        }
    }

    /// Resolved discount amount, zero without an offer.
    pub fn discount_amount(&self) -> Money {
        self.discount
            .as_ref()
            .map_or(Money::zero(), |discount| discount.amount)
    }

    fn discount_on(&self, target: DiscountTarget) -> Money {
        match &self.discount {
            Some(discount) if discount.target == target => discount.amount,
            _ => Money::zero(),
        }
    }

    /// Unit (or subscription) price after the discount.
    pub fn net_price(&self) -> Money {
        self.unit_price - self.discount_on(DiscountTarget::ItemPrice)
    }

    /// Registration fee after the discount.
    pub fn net_registration_fee(&self) -> Money {
        self.registration_fee() - self.discount_on(DiscountTarget::RegistrationFee)
    }

    /// Registration fee plus unit price, before any discount.
    pub fn working_total(&self) -> Money {
        self.registration_fee() + self.unit_price
    }
}

// =============================================================================
// Normalization
// =============================================================================

/// Resolves the effective unit price for an item.
///
/// The result is always a one-time [`PricedItem`]; the recurring decomposer
/// decides the final mode.
pub fn normalize(item: &Item, buyer: &BuyerForm) -> PricedItem {
    PricedItem {
        item: item.clone(),
        unit_price: effective_price(item, buyer),
        mode: PricingMode::OneTime,
        discount: None,
    }
}

/// The price the buyer pays per unit before offers, fees and tax.
pub fn effective_price(item: &Item, buyer: &BuyerForm) -> Money {
    if !item.is_other_price {
        return item.price;
    }

    buyer
        .other_price
        .as_deref()
        .and_then(Money::parse_decimal)
        .filter(|amount| !amount.is_negative())
        .unwrap_or(item.price)
}

// =============================================================================
// Price Options
// =============================================================================

/// Orders the price options of a checkout screen.
///
/// Fixed prices first, cheapest first; "other price" options after them.
pub fn filter_by_price(options: &[PriceOption]) -> Vec<PriceOption> {
    let (mut fixed, other): (Vec<PriceOption>, Vec<PriceOption>) = options
        .iter()
        .cloned()
        .partition(|option| !option.is_other_price);

    fixed.sort_by_key(|option| option.price);
    fixed.extend(other);
    fixed
}

// =============================================================================
// Unit Tests
// =============================================================================
