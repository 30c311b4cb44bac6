//! # Error Types
//!
//! Domain-specific error types for listwise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  listwise-core errors (this file)                                      │
//! │  ├── CoreError        - Pricing and money failures                     │
//! │  └── ValidationError  - Input validation failures (config values)      │
//! │                                                                         │
//! │  config.rs                                                             │
//! │  └── ConfigError      - Environment / document loading failures        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → UI message                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Business Failures
//! The pricing math is total except for:
//! 1. Evaluating a price that is zero or negative
//! 2. Mixing currencies in money arithmetic
//! 3. Processor fees in a currency the fee schedules are not quoted for
//!
//! Everything else (negative costs, empty strings, unknown platforms) is
//! coerced or defaulted rather than rejected.

use thiserror::Error;

use crate::currency::Currency;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Margin is undefined for a price of zero or less.
    ///
    /// ## When This Occurs
    /// - `evaluate` / `max_cogs_for_floor` with `price_cents <= 0`
    /// - A variant in `evaluate_variants` without a usable price
    #[error("Price must be positive, got {price_cents} cents")]
    NonPositivePrice { price_cents: i64 },

    /// Money arithmetic across two currencies.
    ///
    /// ## User Workflow
    /// ```text
    /// Money(1000, USD).try_add(Money(500, EUR))
    ///      │
    ///      ▼
    /// CurrencyMismatch { expected: USD, found: EUR }
    ///      │
    ///      ▼
    /// UI shows: "Cannot combine USD with EUR"
    /// ```
    #[error("Cannot combine {expected} with {found}")]
    CurrencyMismatch { expected: Currency, found: Currency },

    /// Processor fee schedules are quoted in cents; there is no schedule
    /// for currencies with a different minor unit.
    #[error("No processor fee schedule for {currency}")]
    NoProcessorSchedule { currency: Currency },

    /// Currency code not in the supported set.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised by the config layer when an override is out of range.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric basis points).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::NonPositivePrice { price_cents: -5 };
        assert_eq!(err.to_string(), "Price must be positive, got -5 cents");

        let err = CoreError::CurrencyMismatch {
            expected: Currency::Usd,
            found: Currency::Eur,
        };
        assert_eq!(err.to_string(), "Cannot combine USD with EUR");

        let err = CoreError::NoProcessorSchedule {
            currency: Currency::Jpy,
        };
        assert_eq!(err.to_string(), "No processor fee schedule for JPY");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::OutOfRange {
            field: "floor_bps".to_string(),
            min: 0,
            max: 10000,
        };
        assert_eq!(err.to_string(), "floor_bps must be between 0 and 10000");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "multiplier".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
