//! # Money Module
//!
//! Provides the `Money` type: an amount in minor units tagged with its
//! currency.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units + Currency Tag                       │
//! │    Money(1490, USD)  = $14.90                                          │
//! │    Money(1490, JPY)  = ¥1,490   (yen has no minor unit)                │
//! │                                                                         │
//! │  Mixing currencies is an error, never a silent conversion:             │
//! │    Money(1490, USD).try_add(Money(100, EUR)) → CurrencyMismatch        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use listwise_core::currency::Currency;
//! use listwise_core::money::Money;
//!
//! let price = Money::from_cents(1099, Currency::Usd);
//! let shipping = Money::parse("$4.50", Currency::Usd);
//! let total = price.try_add(shipping).unwrap();
//! assert_eq!(total.cents(), 1549);
//! ```
//!
//! Every operation returns a new value; `Money` is `Copy` and never mutated.
//! Arithmetic saturates at the `i64` limits instead of overflowing.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::currency::Currency;
use crate::error::{CoreError, CoreResult};
use crate::types::{round_div, CharmEnding};
use crate::BPS_SCALE;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest unit of its currency.
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for refunds and losses
/// - **Currency tag**: Arithmetic checks it instead of trusting the caller
/// - **"cents"**: The minor unit; for yen that is the yen itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Money {
    cents: i64,
    currency: Currency,
}

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use listwise_core::currency::Currency;
    /// use listwise_core::money::Money;
    ///
    /// let price = Money::from_cents(1099, Currency::Usd); // $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64, currency: Currency) -> Self {
        Money { cents, currency }
    }

    /// Zero in the given currency.
    #[inline]
    pub const fn zero(currency: Currency) -> Self {
        Money { cents: 0, currency }
    }

    /// Creates a Money value from a decimal amount in major units, rounded to
    /// the currency's precision. Non-finite input becomes zero.
    ///
    /// ## Example
    /// ```rust
    /// use listwise_core::currency::Currency;
    /// use listwise_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(14.9, Currency::Usd).cents(), 1490);
    /// assert_eq!(Money::from_decimal(1490.4, Currency::Jpy).cents(), 1490);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        if !amount.is_finite() {
            return Money::zero(currency);
        }
        let cents = (amount * currency.minor_per_major() as f64).round();
        Money::from_cents(cents as i64, currency)
    }

    /// Parses free text such as `"$1,234.50"`, `"1.234,50 €"`, `"(12.00)"`
    /// or `"¥1,490"`.
    ///
    /// ## Rules
    /// - Symbols, codes and spaces are ignored
    /// - With both `.` and `,` present, the later one is the decimal mark
    /// - A lone `,` followed by 1-2 digits is a decimal comma, otherwise grouping
    /// - Several `.` are grouping (`1.234.567`)
    /// - `-` anywhere, or wrapping parentheses, mean negative
    /// - Extra fraction digits round half up; yen rounds to whole units
    /// - Empty or unreadable text is zero
    pub fn parse(text: &str, currency: Currency) -> Self {
        let text = text.trim();
        let negative =
            text.contains('-') || (text.starts_with('(') && text.ends_with(')'));

        let cleaned: String = text
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
            .collect();

        let (int_part, frac_part) = split_decimal(&cleaned);
        let int_digits: String = int_part.chars().filter(char::is_ascii_digit).collect();
        let frac_digits: Vec<i64> = frac_part
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(i64::from)
            .collect();

        let major = if int_digits.is_empty() {
            0
        } else {
            match int_digits.parse::<i64>() {
                Ok(major) => major,
                Err(_) => return Money::zero(currency),
            }
        };

        let decimals = currency.decimals() as usize;
        let mut minor = (0..decimals).fold(0_i64, |acc, i| {
            acc * 10 + frac_digits.get(i).copied().unwrap_or(0)
        });
        if frac_digits.get(decimals).copied().unwrap_or(0) >= 5 {
            minor += 1;
        }

        let cents = major
            .checked_mul(currency.minor_per_major())
            .and_then(|c| c.checked_add(minor))
            .unwrap_or(0);

        Money::from_cents(if negative { -cents } else { cents }, currency)
    }

    /// Value in minor units.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    #[inline]
    pub const fn currency(&self) -> Currency {
        self.currency
    }

    /// Value in major units, for charts and display math only.
    pub fn to_number(&self) -> f64 {
        self.cents as f64 / self.currency.minor_per_major() as f64
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.cents > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money::from_cents(self.cents.saturating_abs(), self.currency)
    }

    /// Returns the value with its sign flipped.
    #[inline]
    pub const fn negate(&self) -> Self {
        Money::from_cents(self.cents.saturating_neg(), self.currency)
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    fn ensure_same_currency(&self, other: &Money) -> CoreResult<()> {
        if self.currency != other.currency {
            return Err(CoreError::CurrencyMismatch {
                expected: self.currency,
                found: other.currency,
            });
        }
        Ok(())
    }

    /// Adds two amounts of the same currency.
    ///
    /// ## Errors
    /// [`CoreError::CurrencyMismatch`] when the currencies differ.
    pub fn try_add(&self, other: Money) -> CoreResult<Money> {
        self.ensure_same_currency(&other)?;
        Ok(Money::from_cents(
            self.cents.saturating_add(other.cents),
            self.currency,
        ))
    }

    /// Subtracts an amount of the same currency.
    ///
    /// ## Errors
    /// [`CoreError::CurrencyMismatch`] when the currencies differ.
    pub fn try_sub(&self, other: Money) -> CoreResult<Money> {
        self.ensure_same_currency(&other)?;
        Ok(Money::from_cents(
            self.cents.saturating_sub(other.cents),
            self.currency,
        ))
    }

    /// Sums amounts that must all be in `currency`. An empty slice is zero.
    pub fn try_sum(amounts: &[Money], currency: Currency) -> CoreResult<Money> {
        amounts
            .iter()
            .try_fold(Money::zero(currency), |acc, amount| acc.try_add(*amount))
    }

    /// Multiplies by an arbitrary factor, rounding half away from zero.
    ///
    /// ## Example
    /// ```rust
    /// use listwise_core::currency::Currency;
    /// use listwise_core::money::Money;
    ///
    /// let price = Money::from_cents(1000, Currency::Usd);
    /// assert_eq!(price.scale(1.15).cents(), 1150);
    /// ```
    pub fn scale(&self, factor: f64) -> Money {
        let scaled = (self.cents as f64 * factor).round();
        if !scaled.is_finite() {
            return Money::zero(self.currency);
        }
        Money::from_cents(scaled as i64, self.currency)
    }

    /// Takes a percentage of the amount, expressed in basis points.
    ///
    /// ## Example
    /// ```rust
    /// use listwise_core::currency::Currency;
    /// use listwise_core::money::Money;
    ///
    /// let price = Money::from_cents(1000, Currency::Usd);
    /// assert_eq!(price.percentage(825).cents(), 83); // $0.825 → $0.83
    /// ```
    pub fn percentage(&self, bps: u32) -> Money {
        let cents = round_div(self.cents as i128 * bps as i128, BPS_SCALE as i128)
            .clamp(i64::MIN as i128, i64::MAX as i128);
        Money::from_cents(cents as i64, self.currency)
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money::from_cents(self.cents.saturating_mul(qty), self.currency)
    }

    /// Limits the amount to the optional bounds.
    ///
    /// ## Errors
    /// [`CoreError::CurrencyMismatch`] when a bound is in another currency.
    pub fn clamp(&self, min: Option<Money>, max: Option<Money>) -> CoreResult<Money> {
        let mut cents = self.cents;
        if let Some(min) = min {
            self.ensure_same_currency(&min)?;
            cents = cents.max(min.cents);
        }
        if let Some(max) = max {
            self.ensure_same_currency(&max)?;
            cents = cents.min(max.cents);
        }
        Ok(Money::from_cents(cents, self.currency))
    }

    /// Rounds up to the next amount whose last two minor digits are the
    /// charm ending (`$12.10 → $12.99`, `¥1,210 → ¥1,299`).
    pub fn charm(&self, ending: CharmEnding) -> Money {
        let base = (self.cents.div_euclid(100) * 100).saturating_add(ending.cents());
        let cents = if base < self.cents {
            base.saturating_add(100)
        } else {
            base
        };
        Money::from_cents(cents, self.currency)
    }
}

/// Splits cleaned text (`digits`, `.` and `,` only) into integer and fraction
/// parts. Grouping marks stay in the integer part and are dropped later.
fn split_decimal(cleaned: &str) -> (&str, &str) {
    let last_dot = cleaned.rfind('.');
    let last_comma = cleaned.rfind(',');

    let decimal_at = match (last_dot, last_comma) {
        (Some(dot), Some(comma)) => Some(dot.max(comma)),
        (Some(dot), None) => {
            if cleaned.matches('.').count() == 1 {
                Some(dot)
            } else {
                None
            }
        }
        (None, Some(comma)) => {
            let after = cleaned.len() - comma - 1;
            if cleaned.matches(',').count() == 1 && (1..=2).contains(&after) {
                Some(comma)
            } else {
                None
            }
        }
        (None, None) => None,
    };

    match decimal_at {
        Some(at) => (&cleaned[..at], &cleaned[at + 1..]),
        None => (cleaned, ""),
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses the en-US format: `$14.90`, `-€5.50`, `¥1,490`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(crate::format::Locale::EnUs))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(cents: i64) -> Money {
        Money::from_cents(cents, Currency::Usd)
    }

    #[test]
    fn test_from_cents() {
        let money = usd(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.currency(), Currency::Usd);
        assert!((money.to_number() - 10.99).abs() < 1e-9);
    }

    #[test]
    fn test_from_decimal_rounds_to_currency_precision() {
        assert_eq!(Money::from_decimal(10.994, Currency::Usd).cents(), 1099);
        assert_eq!(Money::from_decimal(10.996, Currency::Eur).cents(), 1100);
        assert_eq!(Money::from_decimal(-5.5, Currency::Usd).cents(), -550);
        assert_eq!(Money::from_decimal(1490.6, Currency::Jpy).cents(), 1491);
        assert!(Money::from_decimal(f64::NAN, Currency::Usd).is_zero());
    }

    #[test]
    fn test_parse_us_style() {
        assert_eq!(Money::parse("$1,234.56", Currency::Usd).cents(), 123_456);
        assert_eq!(Money::parse("14.9", Currency::Usd).cents(), 1490);
        assert_eq!(Money::parse("USD 20", Currency::Usd).cents(), 2000);
        assert_eq!(Money::parse("1,234", Currency::Usd).cents(), 123_400);
    }

    #[test]
    fn test_parse_european_style() {
        assert_eq!(Money::parse("1.234,56 €", Currency::Eur).cents(), 123_456);
        assert_eq!(Money::parse("12,5", Currency::Eur).cents(), 1250);
        assert_eq!(Money::parse("1.234.567", Currency::Eur).cents(), 123_456_700);
    }

    #[test]
    fn test_parse_negative_and_rounding() {
        assert_eq!(Money::parse("-$5.50", Currency::Usd).cents(), -550);
        assert_eq!(Money::parse("(12.00)", Currency::Usd).cents(), -1200);
        assert_eq!(Money::parse("1.005", Currency::Usd).cents(), 101);
        assert_eq!(Money::parse("¥1,490.6", Currency::Jpy).cents(), 1491);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        assert!(Money::parse("", Currency::Usd).is_zero());
        assert!(Money::parse("   ", Currency::Usd).is_zero());
        assert!(Money::parse("free", Currency::Usd).is_zero());
        assert!(Money::parse("99999999999999999999999", Currency::Usd).is_zero());
    }

    #[test]
    fn test_arithmetic_same_currency() {
        let a = usd(1000);
        let b = usd(500);
        assert_eq!(a.try_add(b).unwrap().cents(), 1500);
        assert_eq!(a.try_sub(b).unwrap().cents(), 500);
        assert_eq!(b.try_sub(a).unwrap().cents(), -500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);
    }

    #[test]
    fn test_arithmetic_currency_mismatch() {
        let dollars = usd(1000);
        let euros = Money::from_cents(1000, Currency::Eur);
        assert_eq!(
            dollars.try_add(euros),
            Err(CoreError::CurrencyMismatch {
                expected: Currency::Usd,
                found: Currency::Eur,
            })
        );
        assert!(dollars.try_sub(euros).is_err());
        assert!(Money::try_sum(&[dollars, euros], Currency::Usd).is_err());
    }

    #[test]
    fn test_try_sum() {
        let total = Money::try_sum(&[usd(100), usd(250), usd(-50)], Currency::Usd).unwrap();
        assert_eq!(total.cents(), 300);
        assert!(Money::try_sum(&[], Currency::Gbp).unwrap().is_zero());
    }

    #[test]
    fn test_scale_and_percentage() {
        assert_eq!(usd(999).scale(0.5).cents(), 500); // 499.5 rounds away from zero
        assert_eq!(usd(-999).scale(0.5).cents(), -500);
        assert_eq!(usd(10000).percentage(1000).cents(), 1000);
        assert_eq!(usd(1490).percentage(349).cents(), 52);
    }

    #[test]
    fn test_clamp() {
        let price = usd(1500);
        assert_eq!(price.clamp(Some(usd(2000)), None).unwrap().cents(), 2000);
        assert_eq!(price.clamp(None, Some(usd(1000))).unwrap().cents(), 1000);
        assert_eq!(price.clamp(Some(usd(1000)), Some(usd(2000))).unwrap(), price);
        assert_eq!(price.clamp(None, None).unwrap(), price);
        let euros = Money::from_cents(100, Currency::Eur);
        assert!(price.clamp(Some(euros), None).is_err());
    }

    #[test]
    fn test_charm() {
        assert_eq!(usd(1210).charm(CharmEnding::NinetyNine).cents(), 1299);
        assert_eq!(usd(1299).charm(CharmEnding::NinetyNine).cents(), 1299);
        assert_eq!(usd(1296).charm(CharmEnding::NinetyFive).cents(), 1395);
        let yen = Money::from_cents(1210, Currency::Jpy);
        assert_eq!(yen.charm(CharmEnding::Ninety).cents(), 1290);
        assert_eq!(yen.charm(CharmEnding::Ninety).currency(), Currency::Jpy);
    }

    #[test]
    fn test_sign_checks() {
        assert!(Money::zero(Currency::Usd).is_zero());
        assert!(usd(1).is_positive());
        assert!(usd(-1).is_negative());
        assert_eq!(usd(-550).abs().cents(), 550);
        assert_eq!(usd(550).negate().cents(), -550);
    }

    #[test]
    fn test_arithmetic_saturates_at_limits() {
        assert_eq!(usd(i64::MAX).try_add(usd(1)).unwrap().cents(), i64::MAX);
        assert_eq!(usd(i64::MIN).try_sub(usd(1)).unwrap().cents(), i64::MIN);
        assert_eq!(usd(i64::MIN).negate().cents(), i64::MAX);
        assert_eq!(usd(i64::MIN).abs().cents(), i64::MAX);
        assert_eq!(usd(i64::MAX / 2).multiply_quantity(3).cents(), i64::MAX);
        assert_eq!(usd(i64::MIN).multiply_quantity(2).cents(), i64::MIN);
        assert_eq!(usd(i64::MAX).percentage(20_000).cents(), i64::MAX);
        assert_eq!(usd(i64::MAX - 5).charm(CharmEnding::NinetyNine).cents(), i64::MAX);
    }

    #[test]
    fn test_display() {
        assert_eq!(usd(1099).to_string(), "$10.99");
        assert_eq!(usd(-550).to_string(), "-$5.50");
        assert_eq!(Money::from_cents(1490, Currency::Jpy).to_string(), "¥1,490");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&usd(1490)).unwrap();
        assert_eq!(json, r#"{"cents":1490,"currency":"USD"}"#);
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, usd(1490));
    }
}
