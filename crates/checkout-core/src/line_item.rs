//! # Line-Item Builder
//!
//! Shapes a composed item into the record the payment API expects.
//!
//! ## Shapes by Pricing Mode
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OneTime            itemPrice = net price                               │
//! │                     itemTotal = net price + card fee + tax              │
//! │                     subscription: (absent)                              │
//! │                                                                         │
//! │  Recurring          itemPrice = net registration fee                    │
//! │                     itemTotal = registration + its card fee + its tax   │
//! │                     subscription: amount, total, card fees, tax,        │
//! │                                   cycles after the first, trial         │
//! │                                                                         │
//! │  RecurringDonation  itemPrice / itemTotal as OneTime                    │
//! │                     subscription: amount, total, cycles                 │
//! │                                   (no card fee / tax split)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are per unit; `quantity` travels alongside.

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::compositor::ComposedItem;
use crate::money::Money;
use crate::recurring::PricingMode;
use crate::types::{PaymentType, ProductType};

// =============================================================================
// Context
// =============================================================================

/// A catalog entity a line item can be attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductRef {
    pub id: String,
    pub name: String,
}

/// Where the purchase came from, as known to the checkout screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemContext {
    /// Unknown catalog values read as absent (and so `PaidEvent`).
    #[serde(default, deserialize_with = "lenient_payment_type")]
    pub payment_type: Option<PaymentType>,
    #[serde(default)]
    pub event: Option<ProductRef>,
    #[serde(default)]
    pub subscription_plan: Option<ProductRef>,
    #[serde(default)]
    pub donation_category: Option<ProductRef>,
}

fn lenient_payment_type<'de, D>(deserializer: D) -> Result<Option<PaymentType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.parse().ok()))
}

impl LineItemContext {
    /// Event first, then subscription plan, then donation category.
    pub fn resolve_product(&self) -> Option<&ProductRef> {
        self.event
            .as_ref()
            .or(self.subscription_plan.as_ref())
            .or(self.donation_category.as_ref())
    }

    pub fn product_type(&self) -> ProductType {
        ProductType::from_payment_type(self.payment_type)
    }
}

// =============================================================================
// Line Item
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub subscription_amount: Money,
    pub subscription_total_amount: Money,
    /// Cycles after the first charge; absent for open-ended schedules.
    pub no_of_billing_cycles: Option<u32>,
    pub trial_period: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_card_fees: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription_tax: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub product_type: ProductType,
    pub currency: String,
    pub quantity: u32,
    pub item_price: Money,
    pub item_total: Money,
    pub card_fees: Money,
    pub tax: Money,
    pub discount: Money,
    pub offer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
}

/// Builds the payment API record for a composed item.
pub fn build_line_item(composed: &ComposedItem, context: &LineItemContext) -> LineItem {
    let priced = &composed.priced;
    let breakdown = &composed.breakdown;
    let product = context.resolve_product();

    let (item_price, card_fees, tax, item_total, subscription) = match &priced.mode {
        PricingMode::Recurring {
            schedule,
            trial_period_days,
            ..
        } => (
            priced.net_registration_fee(),
            breakdown.card_fees_on_registration,
            breakdown.tax_on_registration,
            composed.registration_total(),
            Some(Subscription {
                subscription_amount: priced.net_price(),
                subscription_total_amount: composed.price_total(),
                no_of_billing_cycles: schedule.remaining_cycles(),
                trial_period: *trial_period_days,
                subscription_card_fees: Some(breakdown.card_fees_on_price),
                subscription_tax: Some(breakdown.tax_on_price),
            }),
        ),
        PricingMode::RecurringDonation { schedule } => (
            priced.net_price(),
            breakdown.card_fees_on_price,
            breakdown.tax_on_price,
            composed.price_total(),
            Some(Subscription {
                subscription_amount: priced.net_price(),
                subscription_total_amount: composed.price_total(),
                no_of_billing_cycles: schedule.remaining_cycles(),
                trial_period: 0,
                subscription_card_fees: None,
                subscription_tax: None,
            }),
        ),
        PricingMode::OneTime => (
            priced.net_price(),
            breakdown.card_fees_on_price,
            breakdown.tax_on_price,
            composed.price_total(),
            None,
        ),
    };

    LineItem {
        product_id: product.map(|p| p.id.clone()),
        product_name: product.map(|p| p.name.clone()),
        product_type: context.product_type(),
        currency: priced.item.currency.clone(),
        quantity: composed.quantity(),
        item_price,
        item_total,
        card_fees,
        tax,
        discount: priced.discount_amount(),
        offer_id: priced.discount.as_ref().map(|d| d.offer_id.clone()),
        subscription,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::{calculate, FeeSchedule};
    use crate::offer::process_offer;
    use crate::pricing::normalize;
    use crate::recurring::decompose;
    use crate::types::{
        BillingSchedule, BuyerForm, DiscountType, Item, MembershipType, Offer, Rate,
        RecurringMembershipConfig,
    };

    fn item(price: i64) -> Item {
        Item {
            id: "plan-1".to_string(),
            name: "Studio Pass".to_string(),
            price: Money::from_cents(price),
            is_other_price: false,
            qty: 1,
            is_taxable: true,
            is_charge_credit_card_fees: true,
            currency: "USD".to_string(),
            membership_type: MembershipType::OneTime,
            registration_fees: Money::zero(),
        }
    }

    fn fees() -> FeeSchedule {
        FeeSchedule {
            tax: Rate::from_bps(1000),
            card: Rate::from_bps(300),
            bank: Rate::zero(),
            apply_card_fees: true,
        }
    }

    fn schedule(cycles: u32) -> BillingSchedule {
        BillingSchedule {
            billing_freq_text: "Monthly".to_string(),
            billing_day_of_month: Some(1),
            number_of_billing_cycles: cycles,
        }
    }

    fn product(id: &str) -> Option<ProductRef> {
        Some(ProductRef {
            id: id.to_string(),
            name: format!("{} name", id),
        })
    }

    #[test]
    fn test_one_time_line_item() {
        let priced = decompose(normalize(&item(10_000), &BuyerForm::default()), None, None);
        let composed = calculate(priced, &fees());
        let context = LineItemContext {
            payment_type: Some(PaymentType::Paid),
            event: product("event-1"),
            ..LineItemContext::default()
        };

        let line = build_line_item(&composed, &context);
        assert_eq!(line.item_price, Money::from_cents(10_000));
        assert_eq!(line.card_fees, Money::from_cents(300));
        assert_eq!(line.tax, Money::from_cents(1030));
        assert_eq!(line.item_total, Money::from_cents(11_330));
        assert_eq!(line.product_type, ProductType::PaidEvent);
        assert_eq!(line.product_id.as_deref(), Some("event-1"));
        assert!(line.subscription.is_none());
    }

    #[test]
    fn test_recurring_line_item_splits_components() {
        let mut item = item(5000);
        item.membership_type = MembershipType::Recurring;
        item.registration_fees = Money::from_cents(2500);
        let config = RecurringMembershipConfig {
            schedule: schedule(12),
            trial_period_days: 7,
        };
        let offer = Offer {
            gu_id: "offer-1".to_string(),
            discount: 500.0,
            discount_type: DiscountType::Flat,
        };

        let priced = decompose(normalize(&item, &BuyerForm::default()), Some(&config), None);
        let composed = calculate(process_offer(priced, &offer), &fees());
        let line = build_line_item(&composed, &LineItemContext::default());

        // registration $25 - $5 = $20, card $0.60, tax ($20.60 × 10%) $2.06
        assert_eq!(line.item_price, Money::from_cents(2000));
        assert_eq!(line.card_fees, Money::from_cents(60));
        assert_eq!(line.tax, Money::from_cents(206));
        assert_eq!(line.item_total, Money::from_cents(2266));
        assert_eq!(line.discount, Money::from_cents(500));
        assert_eq!(line.offer_id.as_deref(), Some("offer-1"));

        let sub = line.subscription.unwrap();
        assert_eq!(sub.subscription_amount, Money::from_cents(5000));
        assert_eq!(sub.subscription_card_fees, Some(Money::from_cents(150)));
        assert_eq!(sub.subscription_tax, Some(Money::from_cents(515)));
        assert_eq!(sub.subscription_total_amount, Money::from_cents(5665));
        assert_eq!(sub.no_of_billing_cycles, Some(11));
        assert_eq!(sub.trial_period, 7);
    }

    #[test]
    fn test_recurring_donation_line_item() {
        let mut item = item(2000);
        item.is_taxable = false;
        item.is_charge_credit_card_fees = false;

        let priced = decompose(
            normalize(&item, &BuyerForm::default()),
            None,
            Some(&schedule(0)),
        );
        let composed = calculate(priced, &fees());
        let context = LineItemContext {
            payment_type: Some(PaymentType::Donation),
            donation_category: product("general-fund"),
            ..LineItemContext::default()
        };

        let line = build_line_item(&composed, &context);
        assert_eq!(line.product_type, ProductType::DonationEvent);
        assert_eq!(line.product_id.as_deref(), Some("general-fund"));
        assert_eq!(line.item_total, Money::from_cents(2000));

        let sub = line.subscription.unwrap();
        assert_eq!(sub.subscription_amount, Money::from_cents(2000));
        assert_eq!(sub.no_of_billing_cycles, None);
        assert!(sub.subscription_card_fees.is_none());
        assert!(sub.subscription_tax.is_none());
    }

    #[test]
    fn test_product_resolution_priority() {
        let all = LineItemContext {
            payment_type: None,
            event: product("event"),
            subscription_plan: product("plan"),
            donation_category: product("category"),
        };
        assert_eq!(all.resolve_product().unwrap().id, "event");

        let no_event = LineItemContext {
            event: None,
            ..all.clone()
        };
        assert_eq!(no_event.resolve_product().unwrap().id, "plan");

        let category_only = LineItemContext {
            donation_category: product("category"),
            ..LineItemContext::default()
        };
        assert_eq!(category_only.resolve_product().unwrap().id, "category");

        assert!(LineItemContext::default().resolve_product().is_none());
        assert_eq!(LineItemContext::default().product_type(), ProductType::PaidEvent);
    }

    #[test]
    fn test_context_reads_unknown_payment_type_as_paid() {
        let context: LineItemContext =
            serde_json::from_str(r#"{"paymentType":"Donation"}"#).unwrap();
        assert_eq!(context.product_type(), ProductType::DonationEvent);

        let context: LineItemContext =
            serde_json::from_str(r#"{"paymentType":"sponsorship"}"#).unwrap();
        assert!(context.payment_type.is_none());
        assert_eq!(context.product_type(), ProductType::PaidEvent);
    }

    #[test]
    fn test_line_item_json_shape() {
        let priced = decompose(normalize(&item(1000), &BuyerForm::default()), None, None);
        let line = build_line_item(&calculate(priced, &fees()), &LineItemContext::default());
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["productType"], "paidevent");
        assert!(json.get("subscription").is_none());
        assert!(json.get("itemTotal").is_some());
    }
}
