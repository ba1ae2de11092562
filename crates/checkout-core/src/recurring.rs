//! # Recurring Decomposer
//!
//! Decides, once per item, whether it bills one time or on a schedule, and
//! splits recurring memberships into their two price components.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pricing Modes                                    │
//! │                                                                         │
//! │  membership_type == Recurring AND membership config supplied            │
//! │      └──► Recurring { registration_fee, subscription_price }            │
//! │             working total = registration_fee + subscription_price       │
//! │                                                                         │
//! │  recurring donation schedule supplied                                   │
//! │      └──► RecurringDonation { schedule }                                │
//! │                                                                         │
//! │  anything else                                                          │
//! │      └──► OneTime                                                       │
//! │                                                                         │
//! │  The mode is never re-evaluated later in the pipeline.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::pricing::PricedItem;
use crate::types::{BillingSchedule, MembershipType, RecurringMembershipConfig};

/// How an item is billed.
#[derive(Debug, Clone, PartialEq)]
pub enum PricingMode {
    /// Paid once.
    OneTime,

    /// One-time registration fee plus a periodically billed subscription.
    Recurring {
        registration_fee: Money,
        subscription_price: Money,
        schedule: BillingSchedule,
        trial_period_days: u32,
    },

    /// A donation repeated on a schedule. No registration fee.
    RecurringDonation { schedule: BillingSchedule },
}

impl PricingMode {
    /// Billing schedule for recurring modes.
    pub fn schedule(&self) -> Option<&BillingSchedule> {
        match self {
            PricingMode::OneTime => None,
            PricingMode::Recurring { schedule, .. } => Some(schedule),
            PricingMode::RecurringDonation { schedule } => Some(schedule),
        }
    }
}

/// Human-readable billing description shown next to the cart summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RecurringInfo {
    pub billing_freq_text: String,
    pub next_billing_period: String,
    pub billing_ends_after: String,
    pub registration_fee: Money,
    pub subscription_price: Money,
}

/// Selects the pricing mode of a normalized item.
pub fn decompose(
    priced: PricedItem,
    membership: Option<&RecurringMembershipConfig>,
    donation: Option<&BillingSchedule>,
) -> PricedItem {
    let mode = match (priced.item.membership_type, membership, donation) {
        (MembershipType::Recurring, Some(config), _) => PricingMode::Recurring {
            registration_fee: priced.item.registration_fees,
            subscription_price: priced.unit_price,
            schedule: config.schedule.clone(),
            trial_period_days: config.trial_period_days,
        },
        (_, _, Some(schedule)) => PricingMode::RecurringDonation {
            schedule: schedule.clone(),
        },
        _ => PricingMode::OneTime,
    };

    PricedItem { mode, ..priced }
}

/// Billing description for recurring items, `None` for one-time ones.
pub fn recurring_info(priced: &PricedItem) -> Option<RecurringInfo> {
    let schedule = priced.mode.schedule()?;

    Some(RecurringInfo {
        billing_freq_text: schedule.billing_freq_text.clone(),
        next_billing_period: schedule.next_billing_period(),
        billing_ends_after: schedule.billing_ends_after(),
        registration_fee: priced.registration_fee(),
        subscription_price: priced.unit_price,
    })
}
