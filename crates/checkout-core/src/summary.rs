//! # Cart Summary
//!
//! The line-by-line breakdown the checkout screen renders:
//!
//! ```text
//!   Subtotal          $100.00
//!   Discount          -$0.00
//!   Card fees (3%)      $3.00
//!   Tax (8%)            $8.24
//!   ─────────────────────────
//!   Total             $111.24
//! ```
//!
//! Built fresh from a [`ComposedItem`] on every calculation; never stored.
//! `card_fees` and `total_tax` are per unit, `total_price` includes quantity.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::compositor::ComposedItem;
use crate::money::Money;
use crate::recurring::{recurring_info, RecurringInfo};
use crate::types::Rate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    /// Unit price plus registration fee, before the discount.
    pub subtotal: Money,
    pub item_discount: Money,
    pub card_fees: Money,
    pub card_percent: Rate,
    pub bank_fees: Money,
    pub bank_percent: Rate,
    pub total_tax: Money,
    pub tax_percent: Rate,
    /// Total for one unit.
    pub unit_total: Money,
    pub quantity: u32,
    pub total_price: Money,
    pub show_taxable: bool,
    pub show_card_fees: bool,
    pub show_bank_fees: bool,
    pub recurring_info: Option<RecurringInfo>,
    pub offer_id: Option<String>,
    pub currency: String,
}

impl CartSummary {
    pub fn from_composed(composed: &ComposedItem) -> Self {
        let priced = &composed.priced;
        let breakdown = &composed.breakdown;

        CartSummary {
            subtotal: priced.working_total(),
            item_discount: priced.discount_amount(),
            card_fees: breakdown.card_fees,
            card_percent: composed.fees.card,
            bank_fees: breakdown.bank_fees,
            bank_percent: composed.fees.bank,
            total_tax: breakdown.total_tax,
            tax_percent: composed.fees.tax,
            unit_total: composed.unit_total,
            quantity: composed.quantity(),
            total_price: composed.total,
            show_taxable: breakdown.show_taxable,
            show_card_fees: breakdown.show_card_fees,
            show_bank_fees: breakdown.show_bank_fees,
            recurring_info: recurring_info(priced),
            offer_id: priced.discount.as_ref().map(|d| d.offer_id.clone()),
            currency: priced.item.currency.clone(),
        }
    }
}
