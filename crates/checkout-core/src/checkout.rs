//! # Checkout Pipeline
//!
//! Runs every stage for one purchase attempt and shapes the submission
//! payload for the checkout service.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         calculate()                                     │
//! │                                                                         │
//! │  Item + BuyerForm ──► normalize ──► decompose ──► offer ──► compose     │
//! │                                                     │          │        │
//! │                               discount_is_valid? ───┘          ▼        │
//! │                                                         scale_quantity  │
//! │                                                                │        │
//! │                                    ┌───────────────────────────┤        │
//! │                                    ▼                           ▼        │
//! │                              CartSummary                 Vec<LineItem>  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Recomputation (a different price option, a new offer code) reruns the
//! whole pipeline; nothing is cached between calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::compositor::{self, FeeSchedule};
use crate::error::CheckoutResult;
use crate::line_item::{build_line_item, LineItem, LineItemContext};
use crate::money::Money;
use crate::offer::{discount_is_valid, process_offer, resolve_discount};
use crate::pricing::normalize;
use crate::recurring::decompose;
use crate::summary::CartSummary;
use crate::types::{BillingSchedule, BuyerForm, Item, Offer, RecurringMembershipConfig};

/// Everything one checkout screen knows about a purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub item: Item,
    #[serde(default)]
    pub buyer: BuyerForm,
    #[serde(default)]
    pub fees: FeeSchedule,
    #[serde(default)]
    pub offer: Option<Offer>,
    #[serde(default)]
    pub recurring_membership: Option<RecurringMembershipConfig>,
    #[serde(default)]
    pub recurring_donation: Option<BillingSchedule>,
    #[serde(default)]
    pub context: LineItemContext,
}

/// Result of one calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Checkout {
    pub summary: CartSummary,
    pub line_items: Vec<LineItem>,
}

/// Runs the pricing pipeline for a checkout request.
///
/// An offer whose discount fails [`discount_is_valid`] is left out of the
/// calculation; screens are expected to reject it earlier with
/// `offer::validate_offer`.
pub fn calculate(request: &CheckoutRequest) -> Checkout {
    let priced = normalize(&request.item, &request.buyer);
    debug!(item_id = %request.item.id, unit_price = %priced.unit_price, "Price normalized");

    let priced = decompose(
        priced,
        request.recurring_membership.as_ref(),
        request.recurring_donation.as_ref(),
    );
    debug!(mode = ?priced.mode, "Pricing mode selected");

    let priced = match &request.offer {
        Some(offer) => {
            let discount = resolve_discount(&priced, offer);
            if discount_is_valid(&priced, discount) {
                debug!(offer_id = %offer.gu_id, %discount, "Offer applied");
                process_offer(priced, offer)
            } else {
                warn!(offer_id = %offer.gu_id, %discount, "Offer discount not valid for item, ignoring");
                priced
            }
        }
        None => priced,
    };

    let composed = compositor::calculate(priced, &request.fees);
    debug!(
        unit_total = %composed.unit_total,
        total = %composed.total,
        card_fees = %composed.breakdown.card_fees,
        tax = %composed.breakdown.total_tax,
        "Cart composed"
    );

    Checkout {
        summary: CartSummary::from_composed(&composed),
        line_items: vec![build_line_item(&composed, &request.context)],
    }
}

// =============================================================================
// Submission Payload
// =============================================================================

/// The body posted to the checkout service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSubmission {
    pub membership_list: Vec<LineItem>,
    pub total_price: Money,
    pub currency: String,
    pub offer_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub note: Option<String>,
    pub custom_fields: BTreeMap<String, String>,
}

impl CheckoutSubmission {
    /// Encodes the payload as JSON.
    pub fn to_json(&self) -> CheckoutResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Combines a calculation with the buyer's contact fields.
pub fn build_submission(request: &CheckoutRequest, checkout: &Checkout) -> CheckoutSubmission {
    let buyer = &request.buyer;

    CheckoutSubmission {
        membership_list: checkout.line_items.clone(),
        total_price: checkout.summary.total_price,
        currency: checkout.summary.currency.clone(),
        offer_id: checkout.summary.offer_id.clone(),
        first_name: buyer.first_name.trim().to_string(),
        last_name: buyer.last_name.trim().to_string(),
        email: buyer.email.trim().to_string(),
        phone: buyer.phone.clone(),
        note: buyer.note.clone(),
        custom_fields: buyer.custom_fields.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DiscountType, MembershipType, Rate};

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            item: Item {
                id: "event-1".to_string(),
                name: "Spring Gala".to_string(),
                price: Money::from_cents(10_000),
                is_other_price: false,
                qty: 1,
                is_taxable: true,
                is_charge_credit_card_fees: true,
                currency: "USD".to_string(),
                membership_type: MembershipType::OneTime,
                registration_fees: Money::zero(),
            },
            buyer: BuyerForm {
                first_name: " Ada ".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.org".to_string(),
                ..BuyerForm::default()
            },
            fees: FeeSchedule {
                tax: Rate::from_bps(800),
                card: Rate::from_bps(300),
                bank: Rate::zero(),
                apply_card_fees: true,
            },
            offer: None,
            recurring_membership: None,
            recurring_donation: None,
            context: LineItemContext::default(),
        }
    }

    #[test]
    fn test_calculate_end_to_end() {
        let checkout = calculate(&request());
        assert_eq!(checkout.summary.total_price, Money::from_cents(11_124));
        assert_eq!(checkout.line_items.len(), 1);
        assert_eq!(checkout.line_items[0].item_total, Money::from_cents(11_124));
    }

    #[test]
    fn test_invalid_offer_is_ignored() {
        let mut request = request();
        request.offer = Some(Offer {
            gu_id: "too-big".to_string(),
            discount: 20_000.0,
            discount_type: DiscountType::Flat,
        });

        let checkout = calculate(&request);
        assert!(checkout.summary.item_discount.is_zero());
        assert!(checkout.summary.offer_id.is_none());
        assert_eq!(checkout.summary.total_price, Money::from_cents(11_124));
    }

    #[test]
    fn test_recalculation_is_reproducible() {
        let request = request();
        assert_eq!(calculate(&request), calculate(&request));
    }

    #[test]
    fn test_build_submission() {
        let request = request();
        let checkout = calculate(&request);
        let submission = build_submission(&request, &checkout);

        assert_eq!(submission.first_name, "Ada");
        assert_eq!(submission.total_price, Money::from_cents(11_124));
        assert_eq!(submission.membership_list.len(), 1);

        let json = submission.to_json().unwrap();
        assert!(json.contains("\"membershipList\""));
        assert!(json.contains("\"totalPrice\":11124"));
    }

    #[test]
    fn test_request_deserializes_with_defaults() {
        let request: CheckoutRequest = serde_json::from_str(
            r#"{"item":{"id":"d1","name":"Fund","price":1000,"currency":"USD"}}"#,
        )
        .unwrap();
        assert!(request.offer.is_none());
        assert_eq!(request.fees, FeeSchedule::default());
        assert_eq!(calculate(&request).summary.total_price, Money::from_cents(1000));
    }
}
