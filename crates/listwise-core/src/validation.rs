//! # Validation Module
//!
//! Checks for values that arrive as text or loose numbers from outside the
//! crate, mostly configuration.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Config (env / JSON)                                                   │
//! │  └── THIS MODULE: bps ranges, multiplier lists                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Pricing math                                                          │
//! │  └── Only price > 0 is checked (NonPositivePrice)                     │
//! │      Everything else is taken as given                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use listwise_core::validation::{parse_bps, validate_multipliers};
//!
//! assert_eq!(parse_bps("floor_bps", "3000").unwrap(), 3000);
//! assert!(parse_bps("floor_bps", "12000").is_err());
//! assert!(validate_multipliers(&[10000, 11500]).is_ok());
//! ```

use crate::error::ValidationError;
use crate::BPS_SCALE;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for a ladder multiplier (10×).
pub const MAX_MULTIPLIER_BPS: u32 = 100_000;

// =============================================================================
// Basis Point Validators
// =============================================================================

/// Validates a percentage in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_bps(field: &str, bps: u32) -> ValidationResult<u32> {
    if bps as i64 > BPS_SCALE {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: BPS_SCALE,
        });
    }

    Ok(bps)
}

/// Parses and validates basis points from text.
pub fn parse_bps(field: &str, raw: &str) -> ValidationResult<u32> {
    let bps = raw
        .trim()
        .parse::<u32>()
        .map_err(|e| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: e.to_string(),
        })?;

    validate_bps(field, bps)
}

// =============================================================================
// Ladder Validators
// =============================================================================

/// Validates ladder multipliers.
///
/// ## Rules
/// - At least one multiplier
/// - Each one positive and at most 10× (100000 bps)
pub fn validate_multipliers(multipliers: &[u32]) -> ValidationResult<()> {
    if multipliers.is_empty() {
        return Err(ValidationError::MustBePositive {
            field: "ladder multiplier count".to_string(),
        });
    }

    for &m in multipliers {
        if m == 0 {
            return Err(ValidationError::MustBePositive {
                field: "ladder multiplier".to_string(),
            });
        }
        if m > MAX_MULTIPLIER_BPS {
            return Err(ValidationError::OutOfRange {
                field: "ladder multiplier".to_string(),
                min: 1,
                max: MAX_MULTIPLIER_BPS as i64,
            });
        }
    }

    Ok(())
}

/// Parses a comma separated multiplier list such as `"10000, 11500"`.
/// Blank entries are skipped.
pub fn parse_multipliers(raw: &str) -> ValidationResult<Vec<u32>> {
    let multipliers = raw
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<u32>()
                .map_err(|e| ValidationError::InvalidFormat {
                    field: "ladder multiplier".to_string(),
                    reason: format!("'{}': {}", part, e),
                })
        })
        .collect::<ValidationResult<Vec<u32>>>()?;

    validate_multipliers(&multipliers)?;
    Ok(multipliers)
}

// =============================================================================
// Unit Tests
// =============================================================================
