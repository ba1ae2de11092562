//! # Validation Module
//!
//! Checks a checkout screen runs before handing inputs to the pricing
//! pipeline.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Checkout form                                                 │
//! │  ├── Required fields, email format                                      │
//! │  └── THIS MODULE: validate_buyer                                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Catalog / tenant data                                         │
//! │  ├── THIS MODULE: validate_item, validate_rate, validate_offer_id       │
//! │  └── Negative prices, impossible rates                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Pricing pipeline                                              │
//! │  └── Assumes well-formed input, never fails                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use checkout_core::validation::{validate_quantity, validate_offer_id};
//!
//! assert!(validate_quantity(5).is_ok());
//! assert!(validate_offer_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{BuyerForm, Item, Rate};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// 100% in basis points.
const MAX_RATE_BPS: u32 = 10_000;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be at least 1
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 || qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: i64::from(MAX_ITEM_QUANTITY),
        });
    }

    Ok(())
}

/// Validates a catalog amount. Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use checkout_core::money::Money;
/// use checkout_core::validation::validate_price;
///
/// assert!(validate_price("price", Money::from_cents(1099)).is_ok());
/// assert!(validate_price("price", Money::zero()).is_ok());
/// assert!(validate_price("price", Money::from_cents(-100)).is_err());
/// ```
pub fn validate_price(field: &str, amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a percentage (tax, card fee, bank fee, offer).
///
/// ## Rules
/// - Between 0 and 10000 bps (0% to 100%)
pub fn validate_rate(field: &str, rate: Rate) -> ValidationResult<()> {
    if rate.bps() > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::from(MAX_RATE_BPS),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates a catalog item before it enters the pipeline.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    if item.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    validate_price("price", item.price)?;
    validate_price("registrationFees", item.registration_fees)?;
    validate_quantity(item.qty)?;
    validate_currency(&item.currency)?;

    Ok(())
}

/// Validates an ISO 4217 currency code (three ASCII letters).
pub fn validate_currency(code: &str) -> ValidationResult<()> {
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: "must be a 3-letter ISO 4217 code".to_string(),
        });
    }

    Ok(())
}

/// Validates the buyer's contact fields.
///
/// ## Rules
/// - First name, last name and email are required
/// - Names at most 100 characters
/// - Email must look like `local@domain`
pub fn validate_buyer(buyer: &BuyerForm) -> ValidationResult<()> {
    for (field, value) in [("firstName", &buyer.first_name), ("lastName", &buyer.last_name)] {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
        if value.chars().count() > 100 {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: 100,
            });
        }
    }

    let email = buyer.email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => Ok(()),
        _ => Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must be a valid email address".to_string(),
        }),
    }
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates an offer guId.
///
/// ## Example
/// ```rust
/// use checkout_core::validation::validate_offer_id;
///
/// assert!(validate_offer_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_offer_id("SPRING").is_err());
/// ```
pub fn validate_offer_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "guId".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "guId".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
