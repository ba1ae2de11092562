//! # Domain Types
//!
//! Inputs the checkout screens hand to the pricing engine.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Checkout Inputs                                 │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │      Item       │   │   BuyerForm     │   │     Offer       │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  price          │   │  other_price    │   │  gu_id          │        │
//! │  │  is_other_price │   │  first_name     │   │  discount_type  │        │
//! │  │  qty, flags     │   │  email, ...     │   │  discount       │        │
//! │  │  membership_type│   └─────────────────┘   └─────────────────┘        │
//! │  │  registration_  │                                                    │
//! │  │    fees         │   ┌──────────────────────────┐  ┌──────────────┐   │
//! │  └─────────────────┘   │ RecurringMembershipConfig│  │     Rate     │   │
//! │                        │  BillingSchedule         │  │  bps (u32)   │   │
//! │                        │  trial_period_days       │  │  290 = 2.9%  │   │
//! │                        └──────────────────────────┘  └──────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All monetary fields are [`Money`] (cents). All percentages are [`Rate`],
//! which travel over JSON as plain numbers (`2.9` = 2.9%).

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 290 bps = 2.90% card processing, 800 bps = 8% tax
///
/// Used for tax, card fees, bank fees and percentage offers alike.
///
/// ## Wire Format
/// Serialized as a plain percentage number, the way tenants configure it.
/// `null` deserializes as 0; so do negative numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a plain percentage number (`2.9` = 2.9%).
    ///
    /// Tenant settings arrive as plain numbers. NaN, infinite and negative
    /// values become a zero rate.
    pub fn from_percentage(pct: f64) -> Self {
        if !pct.is_finite() || pct <= 0.0 {
            return Rate::zero();
        }
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

impl Serialize for Rate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.percentage())
    }
}

impl<'de> Deserialize<'de> for Rate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pct = Option::<f64>::deserialize(deserializer)?;
        Ok(pct.map_or(Rate::zero(), Rate::from_percentage))
    }
}

// =============================================================================
// Membership Type
// =============================================================================

/// Whether an item bills once or on a schedule.
///
/// The catalog only distinguishes `"recurring"` from everything else, so
/// parsing is infallible: any other value is a one-time purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MembershipType {
    /// Registration fee now, subscription price every billing period.
    Recurring,
    /// Paid once.
    #[default]
    OneTime,
}

impl MembershipType {
    /// Reads a catalog value. Only `"recurring"` is recurring.
    pub fn from_catalog(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("recurring") {
            MembershipType::Recurring
        } else {
            MembershipType::OneTime
        }
    }
}

impl FromStr for MembershipType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(MembershipType::from_catalog(s))
    }
}

impl<'de> Deserialize<'de> for MembershipType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map_or(MembershipType::OneTime, MembershipType::from_catalog))
    }
}

// =============================================================================
// Discount Type
// =============================================================================

/// How an offer's `discount` magnitude is interpreted.
///
/// Offer resolution only singles out `"percentage"`; every other value is
/// a flat amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DiscountType {
    /// Magnitude is a plain percentage (`10` = 10%).
    Percentage,
    /// Magnitude is an amount in cents.
    Flat,
}

impl FromStr for DiscountType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("percentage") {
            Ok(DiscountType::Percentage)
        } else {
            Ok(DiscountType::Flat)
        }
    }
}

impl<'de> Deserialize<'de> for DiscountType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.parse() {
            Ok(discount_type) => Ok(discount_type),
            Err(never) => match never {},
        }
    }
}

// =============================================================================
// Payment / Product Type
// =============================================================================

/// The event's payment type as configured in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Paid,
    Free,
    Donation,
}

impl FromStr for PaymentType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "paid" => Ok(PaymentType::Paid),
            "free" => Ok(PaymentType::Free),
            "donation" => Ok(PaymentType::Donation),
            _ => Err(ValidationError::NotAllowed {
                field: "paymentType".to_string(),
                allowed: vec![
                    "paid".to_string(),
                    "free".to_string(),
                    "donation".to_string(),
                ],
            }),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Product type expected by the payment API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ProductType {
    #[default]
    PaidEvent,
    FreeEvent,
    DonationEvent,
}

impl ProductType {
    /// Fixed mapping from the catalog payment type. Unknown → `PaidEvent`.
    pub fn from_payment_type(payment_type: Option<PaymentType>) -> Self {
        match payment_type {
            Some(PaymentType::Paid) => ProductType::PaidEvent,
            Some(PaymentType::Free) => ProductType::FreeEvent,
            Some(PaymentType::Donation) => ProductType::DonationEvent,
            None => ProductType::PaidEvent,
        }
    }

    /// Wire name used by the payment API.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::PaidEvent => "paidevent",
            ProductType::FreeEvent => "freeevent",
            ProductType::DonationEvent => "donationevent",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Item
// =============================================================================

fn default_qty() -> u32 {
    1
}

/// The purchasable unit: course/event membership, subscription plan or
/// donation category, as delivered by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Catalog identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Catalog price (floor price when `is_other_price` is set).
    pub price: Money,

    /// Buyer chooses the price ("pay what you want").
    #[serde(default)]
    pub is_other_price: bool,

    /// Quantity, at least 1.
    #[serde(default = "default_qty")]
    pub qty: u32,

    #[serde(default)]
    pub is_taxable: bool,

    /// Card processing fees are passed on to the buyer.
    #[serde(default)]
    pub is_charge_credit_card_fees: bool,

    /// ISO 4217 code of the tenant currency.
    pub currency: String,

    #[serde(default)]
    pub membership_type: MembershipType,

    /// One-time part of a recurring membership.
    #[serde(default)]
    pub registration_fees: Money,
}

// =============================================================================
// Buyer Form
// =============================================================================

/// What the buyer typed into the checkout form. Never mutated by pricing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BuyerForm {
    /// Free-form amount for "other price" items.
    #[serde(default)]
    pub other_price: Option<String>,

    #[serde(default)]
    pub first_name: String,

    #[serde(default)]
    pub last_name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: Option<String>,

    #[serde(default)]
    pub note: Option<String>,

    /// Tenant-defined registration questions.
    #[serde(default)]
    pub custom_fields: BTreeMap<String, String>,
}

// =============================================================================
// Offer
// =============================================================================

/// A resolved promotional code. Immutable once resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    /// Offer identifier, tagged onto the line item.
    pub gu_id: String,

    /// Magnitude: a plain percentage (`12.5` = 12.5%) for percentage
    /// offers, cents for flat ones.
    pub discount: f64,

    pub discount_type: DiscountType,
}

/// An offer magnitude interpreted through its discount type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferDiscount {
    Percentage(Rate),
    Flat(Money),
}

impl Offer {
    /// Interprets `discount` according to `discount_type`.
    ///
    /// A magnitude that is not a finite number counts as 0. Fractional
    /// cents on a flat offer round to the nearest cent.
    pub fn magnitude(&self) -> OfferDiscount {
        match self.discount_type {
            DiscountType::Percentage => {
                OfferDiscount::Percentage(Rate::from_percentage(self.discount))
            }
            DiscountType::Flat if self.discount.is_finite() => {
                OfferDiscount::Flat(Money::from_cents(self.discount.round() as i64))
            }
            DiscountType::Flat => OfferDiscount::Flat(Money::zero()),
        }
    }
}

// =============================================================================
// Recurring Configuration
// =============================================================================

/// Billing schedule descriptors. Display only; no bearing on arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillingSchedule {
    /// e.g. "Monthly".
    #[serde(default)]
    pub billing_freq_text: String,

    /// Day of month the subscription renews on. `None`/0 bills today.
    #[serde(default)]
    pub billing_day_of_month: Option<u8>,

    /// Total number of billing cycles. 0 runs until cancelled.
    #[serde(default)]
    pub number_of_billing_cycles: u32,
}

impl BillingSchedule {
    /// `"On {day} day of Month"`, or `"Today"` when no day is set.
    pub fn next_billing_period(&self) -> String {
        match self.billing_day_of_month {
            Some(day) if day > 0 => format!("On {} day of Month", day),
            _ => "Today".to_string(),
        }
    }

    /// `"{N} billing cycles"`, or `"Manual Request"` when unbounded.
    pub fn billing_ends_after(&self) -> String {
        if self.number_of_billing_cycles > 0 {
            format!("{} billing cycles", self.number_of_billing_cycles)
        } else {
            "Manual Request".to_string()
        }
    }

    /// Cycles after the first charge, as the payment API counts them.
    ///
    /// `None` for schedules that run until cancelled.
    pub fn remaining_cycles(&self) -> Option<u32> {
        if self.number_of_billing_cycles > 0 {
            Some(self.number_of_billing_cycles - 1)
        } else {
            None
        }
    }
}

/// Recurring membership catalog data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecurringMembershipConfig {
    #[serde(flatten)]
    pub schedule: BillingSchedule,

    #[serde(default)]
    pub trial_period_days: u32,
}

// =============================================================================
// Price Options
// =============================================================================

/// One selectable price on a checkout screen (radio button).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PriceOption {
    pub id: String,
    pub label: String,
    pub price: Money,
    #[serde(default)]
    pub is_other_price: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
