//! # Error Types
//!
//! Domain-specific error types for checkout-core.
//!
//! ## Where Errors Live
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  checkout-core (this file)                                              │
//! │  ├── CheckoutError    - Offer rejected, payload serialization           │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  checkout-config (separate crate)                                       │
//! │  └── ConfigError      - Tenant config file / env failures               │
//! │                                                                         │
//! │  The pricing pipeline itself NEVER returns an error. These types are    │
//! │  for the checks a checkout screen runs BEFORE calculating.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Checkout Error
// =============================================================================

/// Errors a checkout screen turns into a user-facing message.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The offer's discount is larger than the component it applies to.
    ///
    /// ## User Workflow
    /// ```text
    /// Enter offer code "SAVE50"
    ///      │
    ///      ▼
    /// resolve: $50.00 flat, registration fee $25.00
    ///      │
    ///      ▼
    /// OfferExceedsLimit { discount: $50.00, limit: $25.00 }
    ///      │
    ///      ▼
    /// UI shows: "This offer cannot be applied to this item"
    /// ```
    #[error("Offer {offer_id} discount {discount} exceeds {limit}")]
    OfferExceedsLimit {
        offer_id: String,
        discount: Money,
        limit: Money,
    },

    /// The offer cannot apply to this item at all.
    #[error("Offer {offer_id} is not applicable: {reason}")]
    OfferNotApplicable { offer_id: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Submission payload could not be encoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid UUID, invalid email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CheckoutError.
pub type CheckoutResult<T> = Result<T, CheckoutError>;

// =============================================================================
// Unit Tests
// =============================================================================
