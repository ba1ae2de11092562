//! # Fee / Tax Compositor
//!
//! Applies the discount, card fees and tax to a priced item, then scales by
//! quantity. The order of the steps is part of the contract: every step
//! works on the running total the previous one produced.
//!
//! ## Order of Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. total  = registration fee + unit price   (unit price for one-time)  │
//! │  2. total -= discount                                                   │
//! │       (discount also reduces its own component: registration fee for    │
//! │        recurring memberships, unit price otherwise)                     │
//! │  3. card fees (tenant allows it AND item passes fees on)                │
//! │       on price component        → card_fees_on_price                    │
//! │       on registration component → card_fees_on_registration             │
//! │       on total                  → card_fees;  total += card_fees        │
//! │  4. tax (item is taxable)                                               │
//! │       on price + its card fee                 → tax_on_price            │
//! │       on registration + its card fee          → tax_on_registration     │
//! │       on total                  → total_tax;  total += total_tax        │
//! │  5. total × qty  (one-time items only)                                  │
//! │  6. round to cents (every step above is already cent-exact)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Worked Example
//! ```text
//! $100.00, card 3%, tax 8%
//!   card fee  = $100.00 × 3%  = $3.00     total $103.00
//!   tax       = $103.00 × 8%  = $8.24     total $111.24
//! ```
//!
//! The per-component values are kept apart because the payment line item
//! reports the subscription and the registration fee separately.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::money::Money;
use crate::pricing::PricedItem;
use crate::types::Rate;

// =============================================================================
// Fee Schedule
// =============================================================================

/// Tenant fee configuration plus the card-fee capability flag.
///
/// On the wire the rates are plain percentages:
/// `{"taxPercent": 8, "cardFeesPercent": 2.9, "bankFeesPercent": 0.8,
/// "applyCardFees": true}`. Missing, `null` and negative values are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FeeSchedule {
    #[serde(rename = "taxPercent")]
    pub tax: Rate,
    #[serde(rename = "cardFeesPercent")]
    pub card: Rate,
    #[serde(rename = "bankFeesPercent")]
    pub bank: Rate,
    /// The checkout is allowed to pass card fees (and so the bank-fee
    /// alternative) on to the buyer.
    pub apply_card_fees: bool,
}

// =============================================================================
// Composition Result
// =============================================================================

/// Every fee and tax amount derived for one unit of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeeBreakdown {
    pub card_fees_on_price: Money,
    pub card_fees_on_registration: Money,
    /// Card fee on the running total.
    pub card_fees: Money,
    /// Informational ACH alternative, never added to the total.
    pub bank_fees: Money,
    pub tax_on_price: Money,
    pub tax_on_registration: Money,
    /// Tax on the running total.
    pub total_tax: Money,
    pub show_card_fees: bool,
    pub show_taxable: bool,
    pub show_bank_fees: bool,
}

/// A priced item with fees and tax applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedItem {
    pub priced: PricedItem,
    pub fees: FeeSchedule,
    pub breakdown: FeeBreakdown,
    /// Total for a single unit.
    pub unit_total: Money,
    /// Total after quantity scaling.
    pub total: Money,
}

impl ComposedItem {
    /// Quantity the total was scaled by.
    pub fn quantity(&self) -> u32 {
        if self.priced.is_recurring() {
            1
        } else {
            self.priced.item.qty.max(1)
        }
    }

    /// Price component plus its own card fee and tax.
    pub fn price_total(&self) -> Money {
        self.priced.net_price() + self.breakdown.card_fees_on_price + self.breakdown.tax_on_price
    }

    /// Registration component plus its own card fee and tax.
    pub fn registration_total(&self) -> Money {
        self.priced.net_registration_fee()
            + self.breakdown.card_fees_on_registration
            + self.breakdown.tax_on_registration
    }
}

// =============================================================================
// Composition
// =============================================================================

/// Applies discount, card fees and tax (steps 1–4 and 6).
pub fn compose(priced: PricedItem, fees: &FeeSchedule) -> ComposedItem {
    let mut breakdown = FeeBreakdown::default();

    // 1 + 2
    let mut total = priced.working_total() - priced.discount_amount();
    let net_price = priced.net_price();
    let net_registration = priced.net_registration_fee();

    if fees.apply_card_fees && priced.item.is_charge_credit_card_fees && !fees.bank.is_zero() {
        breakdown.bank_fees = total.percent_of(fees.bank);
        breakdown.show_bank_fees = true;
    }

    // 3
    if fees.apply_card_fees && priced.item.is_charge_credit_card_fees {
        breakdown.card_fees_on_price = net_price.percent_of(fees.card);
        breakdown.card_fees_on_registration = net_registration.percent_of(fees.card);
        breakdown.card_fees = total.percent_of(fees.card);
        total += breakdown.card_fees;
        breakdown.show_card_fees = true;
    }

    // 4
    if priced.item.is_taxable {
        breakdown.tax_on_price = (net_price + breakdown.card_fees_on_price).percent_of(fees.tax);
        breakdown.tax_on_registration =
            (net_registration + breakdown.card_fees_on_registration).percent_of(fees.tax);
        breakdown.total_tax = total.percent_of(fees.tax);
        total += breakdown.total_tax;
        breakdown.show_taxable = true;
    }

    ComposedItem {
        priced,
        fees: *fees,
        breakdown,
        unit_total: total,
        total,
    }
}

/// Multiplies the total by quantity (step 5).
///
/// Only the aggregate total is scaled; the per-component values stay
/// per unit. Recurring items are never scaled.
pub fn scale_quantity(composed: ComposedItem) -> ComposedItem {
    let qty = composed.priced.item.qty;

    if composed.priced.is_recurring() {
        if qty > 1 {
            warn!(
                item_id = %composed.priced.item.id,
                qty,
                "Quantity ignored for recurring item"
            );
        }
        return composed;
    }

    if qty <= 1 {
        return composed;
    }

    ComposedItem {
        total: composed.unit_total.multiply_quantity(qty),
        ..composed
    }
}

/// Runs [`compose`] then [`scale_quantity`].
pub fn calculate(priced: PricedItem, fees: &FeeSchedule) -> ComposedItem {
    scale_quantity(compose(priced, fees))
}

// =============================================================================
// Unit Tests
// =============================================================================
