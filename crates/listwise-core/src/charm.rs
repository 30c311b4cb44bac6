//! # Charm Pricing
//!
//! Rounds prices up to a psychologically friendly ending.
//!
//! ```text
//! 12.10 ──► 12.99      (.99)
//! 12.96 ──► 13.95      (.95, next one up)
//! 12.90 ──► 12.90      (.90, already there)
//! ```
//!
//! Rounding only ever goes up, so a charm price never loses margin against
//! the price it came from.

use crate::types::CharmEnding;

/// Rounds `price_cents` up to the nearest amount ending in `charm`, never
/// returning less than `minimum`.
///
/// ## Example
/// ```rust
/// use listwise_core::charm::round_to_charm;
/// use listwise_core::types::CharmEnding;
///
/// assert_eq!(round_to_charm(1210, CharmEnding::NinetyNine, None), 1299);
/// assert_eq!(round_to_charm(1296, CharmEnding::NinetyFive, None), 1395);
/// assert_eq!(round_to_charm(1210, CharmEnding::NinetyNine, Some(1450)), 1499);
/// ```
pub fn round_to_charm(price_cents: i64, charm: CharmEnding, minimum: Option<i64>) -> i64 {
    let target = minimum.map_or(price_cents, |min| price_cents.max(min));
    let candidate = (target.div_euclid(100) * 100).saturating_add(charm.cents());
    if candidate < target {
        candidate.saturating_add(100)
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_charmed_is_unchanged() {
        assert_eq!(round_to_charm(1299, CharmEnding::NinetyNine, None), 1299);
        assert_eq!(round_to_charm(1290, CharmEnding::Ninety, None), 1290);
    }

    #[test]
    fn test_rounds_up_within_dollar() {
        assert_eq!(round_to_charm(1200, CharmEnding::NinetyNine, None), 1299);
        assert_eq!(round_to_charm(1200, CharmEnding::Ninety, None), 1290);
    }

    #[test]
    fn test_rolls_into_next_dollar() {
        assert_eq!(round_to_charm(1291, CharmEnding::Ninety, None), 1390);
        assert_eq!(round_to_charm(1296, CharmEnding::NinetyFive, None), 1395);
    }

    #[test]
    fn test_minimum_wins_when_higher() {
        assert_eq!(round_to_charm(500, CharmEnding::NinetyNine, Some(1001)), 1099);
        assert_eq!(round_to_charm(2000, CharmEnding::NinetyNine, Some(1001)), 2099);
    }

    #[test]
    fn test_small_and_zero_prices() {
        assert_eq!(round_to_charm(0, CharmEnding::NinetyNine, None), 99);
        assert_eq!(round_to_charm(-50, CharmEnding::NinetyNine, Some(0)), 99);
    }

    #[test]
    fn test_saturates_near_max() {
        assert_eq!(round_to_charm(i64::MAX, CharmEnding::NinetyNine, None), i64::MAX);
        assert_eq!(round_to_charm(0, CharmEnding::Ninety, Some(i64::MAX)), i64::MAX);
    }
}
