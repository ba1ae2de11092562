//! End-to-end checkout scenarios through the public API.

use checkout_core::checkout::{build_submission, calculate, CheckoutRequest};
use checkout_core::compositor::FeeSchedule;
use checkout_core::line_item::{LineItemContext, ProductRef};
use checkout_core::offer::{discount_is_valid, resolve_discount, validate_offer};
use checkout_core::pricing::normalize;
use checkout_core::recurring::decompose;
use checkout_core::{
    BillingSchedule, BuyerForm, CheckoutError, DiscountType, Item, MembershipType, Money, Offer,
    PaymentType, ProductType, Rate, RecurringMembershipConfig,
};

fn item(price: i64) -> Item {
    Item {
        id: "item-1".to_string(),
        name: "Item".to_string(),
        price: Money::from_cents(price),
        is_other_price: false,
        qty: 1,
        is_taxable: false,
        is_charge_credit_card_fees: false,
        currency: "USD".to_string(),
        membership_type: MembershipType::OneTime,
        registration_fees: Money::zero(),
    }
}

fn request(item: Item, fees: FeeSchedule) -> CheckoutRequest {
    CheckoutRequest {
        item,
        buyer: BuyerForm::default(),
        fees,
        offer: None,
        recurring_membership: None,
        recurring_donation: None,
        context: LineItemContext::default(),
    }
}

fn fees(card_bps: u32, tax_bps: u32) -> FeeSchedule {
    FeeSchedule {
        tax: Rate::from_bps(tax_bps),
        card: Rate::from_bps(card_bps),
        bank: Rate::zero(),
        apply_card_fees: true,
    }
}

fn monthly(cycles: u32) -> RecurringMembershipConfig {
    RecurringMembershipConfig {
        schedule: BillingSchedule {
            billing_freq_text: "Monthly".to_string(),
            billing_day_of_month: Some(1),
            number_of_billing_cycles: cycles,
        },
        trial_period_days: 0,
    }
}

fn percent_offer(percent: f64) -> Offer {
    Offer {
        gu_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
        discount: percent,
        discount_type: DiscountType::Percentage,
    }
}

#[test]
fn plain_item_total_equals_price() {
    for price in [0, 1, 999, 4_550, 123_456] {
        let checkout = calculate(&request(item(price), fees(300, 800)));
        assert_eq!(checkout.summary.total_price, Money::from_cents(price));
    }
}

#[test]
fn taxable_item_with_card_fees() {
    let mut item = item(10_000);
    item.is_taxable = true;
    item.is_charge_credit_card_fees = true;

    let summary = calculate(&request(item, fees(300, 800))).summary;
    assert_eq!(summary.card_fees, Money::from_cents(300));
    assert_eq!(summary.total_tax, Money::from_cents(824));
    assert_eq!(summary.total_price, Money::from_cents(11_124));
}

#[test]
fn card_fee_and_tax_compose_in_order() {
    let card = Rate::from_bps(350);
    let tax = Rate::from_bps(625);

    for price in [1, 99, 1_999, 4_567, 25_000] {
        let mut item = item(price);
        item.is_taxable = true;
        item.is_charge_credit_card_fees = true;

        let p = Money::from_cents(price);
        let with_card = p + p.percent_of(card);
        let expected = with_card + with_card.percent_of(tax);

        let summary = calculate(&request(item, fees(card.bps(), tax.bps()))).summary;
        assert_eq!(summary.total_price, expected, "price {}", price);
    }
}

#[test]
fn quantity_scales_unit_total() {
    let mut base = item(3_333);
    base.is_taxable = true;
    base.is_charge_credit_card_fees = true;
    let single = calculate(&request(base.clone(), fees(290, 725))).summary.total_price;

    for qty in 1..=5 {
        let mut item = base.clone();
        item.qty = qty;
        let summary = calculate(&request(item, fees(290, 725))).summary;
        assert_eq!(summary.total_price, single.multiply_quantity(qty));
    }
}

#[test]
fn percentage_offer_on_one_time_item() {
    let item = item(8_000);
    let priced = decompose(normalize(&item, &BuyerForm::default()), None, None);

    let discount = resolve_discount(&priced, &percent_offer(25.0));
    assert_eq!(discount, Money::from_cents(2_000));
    assert!(discount_is_valid(&priced, discount));

    let over = resolve_discount(&priced, &percent_offer(150.0));
    assert!(!discount_is_valid(&priced, over));

    let mut req = request(item, fees(0, 0));
    req.offer = Some(percent_offer(25.0));
    assert_eq!(calculate(&req).summary.total_price, Money::from_cents(6_000));
}

#[test]
fn recurring_total_is_registration_plus_subscription() {
    let mut item = item(5_000);
    item.membership_type = MembershipType::Recurring;
    item.registration_fees = Money::from_cents(2_500);

    let mut req = request(item, fees(0, 0));
    req.recurring_membership = Some(monthly(12));

    let checkout = calculate(&req);
    assert_eq!(checkout.summary.total_price, Money::from_cents(7_500));
    assert!(checkout.summary.recurring_info.is_some());
}

#[test]
fn recurring_with_percentage_offer_on_registration_fee() {
    let mut item = item(5_000);
    item.membership_type = MembershipType::Recurring;
    item.registration_fees = Money::from_cents(2_500);

    let mut req = request(item, fees(0, 0));
    req.recurring_membership = Some(monthly(12));
    req.offer = Some(percent_offer(10.0));

    let checkout = calculate(&req);
    assert_eq!(checkout.summary.item_discount, Money::from_cents(250));
    assert_eq!(checkout.summary.total_price, Money::from_cents(7_250));

    let line = &checkout.line_items[0];
    assert_eq!(line.item_price, Money::from_cents(2_250));
    let sub = line.subscription.as_ref().unwrap();
    assert_eq!(sub.subscription_amount, Money::from_cents(5_000));
    assert_eq!(sub.no_of_billing_cycles, Some(11));
}

#[test]
fn flat_offer_larger_than_registration_fee_is_rejected() {
    let mut item = item(5_000);
    item.membership_type = MembershipType::Recurring;
    item.registration_fees = Money::from_cents(2_500);

    let priced = decompose(normalize(&item, &BuyerForm::default()), Some(&monthly(0)), None);
    let offer = Offer {
        gu_id: "flat".to_string(),
        discount: 3_000.0,
        discount_type: DiscountType::Flat,
    };

    assert!(!discount_is_valid(&priced, resolve_discount(&priced, &offer)));
    assert!(matches!(
        validate_offer(&priced, &offer),
        Err(CheckoutError::OfferExceedsLimit { .. })
    ));
}

#[test]
fn recurring_quantity_is_not_scaled() {
    let mut item = item(5_000);
    item.membership_type = MembershipType::Recurring;
    item.registration_fees = Money::from_cents(2_500);
    item.qty = 3;

    let mut req = request(item, fees(0, 0));
    req.recurring_membership = Some(monthly(12));

    let summary = calculate(&req).summary;
    assert_eq!(summary.total_price, Money::from_cents(7_500));
    assert_eq!(summary.quantity, 1);
}

#[test]
fn pay_what_you_want_donation() {
    let mut item = item(1_000);
    item.is_other_price = true;

    let mut req = request(item, fees(300, 0));
    req.buyer.other_price = Some("75".to_string());
    req.context = LineItemContext {
        payment_type: Some(PaymentType::Donation),
        event: None,
        subscription_plan: None,
        donation_category: Some(ProductRef {
            id: "scholarships".to_string(),
            name: "Scholarship Fund".to_string(),
        }),
    };

    let checkout = calculate(&req);
    assert_eq!(checkout.summary.total_price, Money::from_cents(7_500));

    let line = &checkout.line_items[0];
    assert_eq!(line.product_type, ProductType::DonationEvent);
    assert_eq!(line.product_name.as_deref(), Some("Scholarship Fund"));

    req.buyer.other_price = Some("not a number".to_string());
    assert_eq!(calculate(&req).summary.total_price, Money::from_cents(1_000));
}

#[test]
fn submission_payload_round_trips_through_json() {
    let mut req = request(item(2_000), fees(0, 0));
    req.buyer.first_name = "Grace".to_string();
    req.buyer.last_name = "Hopper".to_string();
    req.buyer.email = "grace@example.org".to_string();
    req.buyer
        .custom_fields
        .insert("tshirt".to_string(), "L".to_string());

    let checkout = calculate(&req);
    let json = build_submission(&req, &checkout).to_json().unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["email"], "grace@example.org");
    assert_eq!(value["customFields"]["tshirt"], "L");
    assert_eq!(value["membershipList"][0]["itemTotal"], 2_000);
}

#[test]
fn wire_request_with_card_fee_and_tax() {
    let req: CheckoutRequest = serde_json::from_str(
        r#"{
            "item": {
                "id": "gala", "name": "Spring Gala", "price": 10000, "currency": "USD",
                "isTaxable": true, "isChargeCreditCardFees": true, "membershipType": "lifetime"
            },
            "fees": { "taxPercent": 8, "cardFeesPercent": 3, "bankFeesPercent": 0, "applyCardFees": true }
        }"#,
    )
    .unwrap();

    let summary = calculate(&req).summary;
    assert_eq!(summary.card_fees, Money::from_cents(300));
    assert_eq!(summary.total_tax, Money::from_cents(824));
    assert_eq!(summary.total_price, Money::from_cents(11_124));

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["taxPercent"], 8.0);
    assert_eq!(json["cardPercent"], 3.0);
}

#[test]
fn wire_request_with_percentage_offer_on_registration_fee() {
    let req: CheckoutRequest = serde_json::from_str(
        r#"{
            "item": {
                "id": "gold", "name": "Gold", "price": 5000, "currency": "USD",
                "membershipType": "recurring", "registrationFees": 2500
            },
            "offer": { "guId": "spring", "discount": 10, "discountType": "percentage" },
            "recurringMembership": { "billingFreqText": "Monthly", "numberOfBillingCycles": 12 }
        }"#,
    )
    .unwrap();

    let summary = calculate(&req).summary;
    assert_eq!(summary.item_discount, Money::from_cents(250));
    assert_eq!(summary.total_price, Money::from_cents(7_250));
}

#[test]
fn wire_offer_accepts_fractional_percentage() {
    let mut req = request(item(10_000), fees(0, 0));
    req.offer = Some(
        serde_json::from_str(r#"{"guId":"x","discount":12.5,"discountType":"percentage"}"#)
            .unwrap(),
    );

    let summary = calculate(&req).summary;
    assert_eq!(summary.item_discount, Money::from_cents(1_250));
    assert_eq!(summary.total_price, Money::from_cents(8_750));
}
