//! # Offer Validator / Applier
//!
//! Turns a resolved offer code into a money amount and decides which price
//! component it reduces.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Offer Application                                   │
//! │                                                                         │
//! │  Offer { discount_type, discount }                                      │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  price to discount = registration fee (recurring membership)            │
//! │                    = unit price       (everything else)                 │
//! │        │                                                                │
//! │        ├── Percentage → price.percent_of(rate)   (rounded NOW)          │
//! │        └── Flat       → amount as given                                 │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  discount_is_valid? ── no ──► caller shows an error, offer not applied  │
//! │        │ yes                                                            │
//! │        ▼                                                                │
//! │  process_offer → AppliedDiscount { offer_id, amount, target }           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation is the caller's job: the compositor assumes the discount it
//! receives is valid.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CheckoutError, CheckoutResult};
use crate::money::Money;
use crate::pricing::PricedItem;
use crate::recurring::PricingMode;
use crate::types::{Offer, OfferDiscount};

/// The price component an offer reduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountTarget {
    ItemPrice,
    RegistrationFee,
}

/// An offer resolved against a specific item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedDiscount {
    /// The offer's guId, tagged onto the line item.
    pub offer_id: String,
    pub amount: Money,
    pub target: DiscountTarget,
}

/// The amount the discount is computed against.
fn price_to_discount(priced: &PricedItem) -> Money {
    match priced.discount_target() {
        DiscountTarget::RegistrationFee => priced.registration_fee(),
        DiscountTarget::ItemPrice => priced.unit_price,
    }
}

/// Resolves an offer to a money amount for this item.
pub fn resolve_discount(priced: &PricedItem, offer: &Offer) -> Money {
    match offer.magnitude() {
        OfferDiscount::Percentage(rate) => price_to_discount(priced).percent_of(rate),
        OfferDiscount::Flat(amount) => amount,
    }
}

/// Checks a discount amount is legal for the item's pricing mode.
///
/// ## Rules
/// - One-time items and recurring donations: at most the unit price
/// - Recurring memberships: only with a positive registration fee, and at
///   most that fee
/// - Negative amounts are never valid
pub fn discount_is_valid(priced: &PricedItem, discount: Money) -> bool {
    if discount.is_negative() {
        return false;
    }

    match &priced.mode {
        PricingMode::Recurring {
            registration_fee, ..
        } => registration_fee.is_positive() && discount <= *registration_fee,
        _ => discount <= priced.unit_price,
    }
}

/// Resolves and validates an offer, with a reason when it is rejected.
pub fn validate_offer(priced: &PricedItem, offer: &Offer) -> CheckoutResult<Money> {
    let discount = resolve_discount(priced, offer);
    if discount_is_valid(priced, discount) {
        return Ok(discount);
    }

    match &priced.mode {
        PricingMode::Recurring {
            registration_fee, ..
        } if !registration_fee.is_positive() => Err(CheckoutError::OfferNotApplicable {
            offer_id: offer.gu_id.clone(),
            reason: "membership has no registration fee".to_string(),
        }),
        _ => Err(CheckoutError::OfferExceedsLimit {
            offer_id: offer.gu_id.clone(),
            discount,
            limit: price_to_discount(priced),
        }),
    }
}

/// Records the offer's discount on the item.
pub fn process_offer(priced: PricedItem, offer: &Offer) -> PricedItem {
    let discount = AppliedDiscount {
        offer_id: offer.gu_id.clone(),
        amount: resolve_discount(&priced, offer),
        target: priced.discount_target(),
    };

    PricedItem {
        discount: Some(discount),
        ..priced
    }
}
