//! # Domain Types
//!
//! Small value types shared by the evaluator half of the crate.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Bps        │   │    Platform     │   │  ProductKind    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  u32            │   │  Etsy, Ebay ... │   │  Physical       │       │
//! │  │  950 = 9.50%    │   │  Generic (else) │   │  Digital        │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │  CharmEnding    │   .99 / .95 / .90                                 │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::BPS_SCALE;

// =============================================================================
// Basis Points
// =============================================================================

/// A rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 950 bps = 9.50% (e.g., Etsy transaction + processing)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Bps(u32);

impl Bps {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn new(bps: u32) -> Self {
        Bps(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        Bps((pct * 100.0).round().max(0.0) as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Applies the rate to a cent amount, rounding to the nearest cent.
    ///
    /// ## Example
    /// ```rust
    /// use listwise_core::types::Bps;
    ///
    /// // $14.90 × 9.50% = $1.4155 → $1.42
    /// assert_eq!(Bps::new(950).apply(1490), 142);
    /// ```
    pub fn apply(&self, cents: i64) -> i64 {
        round_div(cents as i128 * self.0 as i128, BPS_SCALE as i128) as i64
    }
}

impl From<u32> for Bps {
    fn from(bps: u32) -> Self {
        Bps(bps)
    }
}

// =============================================================================
// Rounding Helpers
// =============================================================================

/// Integer division rounding half away from zero. `d` must be positive.
pub(crate) fn round_div(n: i128, d: i128) -> i128 {
    if n >= 0 {
        (2 * n + d) / (2 * d)
    } else {
        -((2 * -n + d) / (2 * d))
    }
}

/// Integer division rounding toward positive infinity. `d` must be positive.
pub(crate) fn ceil_div(n: i128, d: i128) -> i128 {
    let q = n.div_euclid(d);
    if n.rem_euclid(d) == 0 {
        q
    } else {
        q + 1
    }
}

// =============================================================================
// Platform
// =============================================================================

/// Marketplace or storefront a listing is sold on.
///
/// Unknown identifiers never fail: they fall back to [`Platform::Generic`],
/// both through [`Platform::from_id`] and through serde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Etsy,
    Ebay,
    Shopify,
    Amazon,
    Gumroad,
    TiktokShop,
    /// Catch-all preset for anything we don't have a schedule for.
    #[default]
    #[serde(other)]
    Generic,
}

impl Platform {
    /// Every platform with a fee preset, `Generic` last.
    pub const ALL: [Platform; 7] = [
        Platform::Etsy,
        Platform::Ebay,
        Platform::Shopify,
        Platform::Amazon,
        Platform::Gumroad,
        Platform::TiktokShop,
        Platform::Generic,
    ];

    /// Stable identifier used in config and UI payloads.
    pub const fn id(&self) -> &'static str {
        match self {
            Platform::Etsy => "etsy",
            Platform::Ebay => "ebay",
            Platform::Shopify => "shopify",
            Platform::Amazon => "amazon",
            Platform::Gumroad => "gumroad",
            Platform::TiktokShop => "tiktok_shop",
            Platform::Generic => "generic",
        }
    }

    /// Resolves a platform identifier, falling back to `Generic`.
    ///
    /// ## Example
    /// ```rust
    /// use listwise_core::types::Platform;
    ///
    /// assert_eq!(Platform::from_id("Etsy"), Platform::Etsy);
    /// assert_eq!(Platform::from_id("tiktok"), Platform::TiktokShop);
    /// assert_eq!(Platform::from_id("my-own-site"), Platform::Generic);
    /// ```
    pub fn from_id(id: &str) -> Platform {
        match id.trim().to_lowercase().as_str() {
            "etsy" => Platform::Etsy,
            "ebay" => Platform::Ebay,
            "shopify" => Platform::Shopify,
            "amazon" => Platform::Amazon,
            "gumroad" => Platform::Gumroad,
            "tiktok_shop" | "tiktok-shop" | "tiktok" => Platform::TiktokShop,
            "generic" => Platform::Generic,
            other => {
                debug!(platform = %other, "Unknown platform, using generic fee preset");
                Platform::Generic
            }
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl From<&str> for Platform {
    fn from(id: &str) -> Self {
        Platform::from_id(id)
    }
}

// =============================================================================
// Product Kind
// =============================================================================

/// Whether the listing ships a physical item or a download.
///
/// Digital products have no shipping or packaging cost and carry a smaller
/// default buffer (no damage or return shipping).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    #[default]
    Physical,
    Digital,
}

impl ProductKind {
    /// Returns true if shipping and packaging apply.
    #[inline]
    pub const fn ships(&self) -> bool {
        matches!(self, ProductKind::Physical)
    }
}

// =============================================================================
// Charm Ending
// =============================================================================

/// The cents a charm price ends in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CharmEnding {
    /// `x.99`
    #[default]
    #[serde(rename = "99")]
    NinetyNine,
    /// `x.95`
    #[serde(rename = "95")]
    NinetyFive,
    /// `x.90`
    #[serde(rename = "90")]
    Ninety,
}

impl CharmEnding {
    /// The trailing minor units (0-99).
    #[inline]
    pub const fn cents(&self) -> i64 {
        match self {
            CharmEnding::NinetyNine => 99,
            CharmEnding::NinetyFive => 95,
            CharmEnding::Ninety => 90,
        }
    }
}

impl FromStr for CharmEnding {
    type Err = ValidationError;

    /// Accepts `99`, `.99` and `0.99` style spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('0').trim_start_matches('.');
        match digits {
            "99" => Ok(CharmEnding::NinetyNine),
            "95" => Ok(CharmEnding::NinetyFive),
            "90" | "9" => Ok(CharmEnding::Ninety),
            _ => Err(ValidationError::InvalidFormat {
                field: "charm".to_string(),
                reason: format!("'{}' is not one of .99, .95, .90", s),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bps_apply_rounds_to_nearest_cent() {
        assert_eq!(Bps::new(950).apply(1490), 142);
        assert_eq!(Bps::new(300).apply(1490), 45); // 44.7
        assert_eq!(Bps::new(5000).apply(1), 1); // 0.5 rounds up
        assert_eq!(Bps::new(5000).apply(-1), -1); // away from zero
        assert_eq!(Bps::new(0).apply(123_456), 0);
    }

    #[test]
    fn test_bps_from_percentage() {
        assert_eq!(Bps::from_percentage(6.5).get(), 650);
        assert!((Bps::new(1325).percentage() - 13.25).abs() < 0.001);
    }

    #[test]
    fn test_round_div_and_ceil_div() {
        assert_eq!(round_div(7, 2), 4);
        assert_eq!(round_div(-7, 2), -4);
        assert_eq!(round_div(4_830_000, 1490), 3242);
        assert_eq!(ceil_div(7, 2), 4);
        assert_eq!(ceil_div(8, 2), 4);
        assert_eq!(ceil_div(-7, 2), -3);
    }

    #[test]
    fn test_platform_fallback() {
        assert_eq!(Platform::from_id(" EBAY "), Platform::Ebay);
        assert_eq!(Platform::from_id(""), Platform::Generic);
        assert_eq!(Platform::from("depop"), Platform::Generic);
    }

    #[test]
    fn test_platform_serde_fallback() {
        let p: Platform = serde_json::from_str("\"tiktok_shop\"").unwrap();
        assert_eq!(p, Platform::TiktokShop);
        let p: Platform = serde_json::from_str("\"poshmark\"").unwrap();
        assert_eq!(p, Platform::Generic);
        assert_eq!(serde_json::to_string(&Platform::Etsy).unwrap(), "\"etsy\"");
    }

    #[test]
    fn test_charm_parse() {
        assert_eq!("99".parse::<CharmEnding>().unwrap(), CharmEnding::NinetyNine);
        assert_eq!(".95".parse::<CharmEnding>().unwrap(), CharmEnding::NinetyFive);
        assert_eq!("0.90".parse::<CharmEnding>().unwrap(), CharmEnding::Ninety);
        assert!("49".parse::<CharmEnding>().is_err());
    }

    #[test]
    fn test_kind_ships() {
        assert!(ProductKind::Physical.ships());
        assert!(!ProductKind::Digital.ships());
        assert_eq!(ProductKind::default(), ProductKind::Physical);
    }
}
