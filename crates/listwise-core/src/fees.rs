//! # Platform Fees
//!
//! Static fee schedules per platform and the fee calculation built on them.
//!
//! ## Fee Formula
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fee = round(price × percent_bps / 10000) + fixed_cents                │
//! │                                                                         │
//! │  Etsy, $14.90:                                                         │
//! │    percent: 1490 × 950 / 10000 = 141.55 → 142                          │
//! │    fixed:   0                                                          │
//! │    total:   142 cents                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Overrides replace the percent or the fixed part individually, so a seller
//! on a discounted plan can keep the preset's fixed fee and change only the
//! rate.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Bps, Platform};

// =============================================================================
// Fee Preset
// =============================================================================

/// A platform's fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeePreset {
    /// Percentage of the sale price, in basis points.
    pub percent_bps: u32,
    /// Flat fee per order, in cents.
    pub fixed_cents: i64,
    /// Human readable description for the UI.
    pub label: &'static str,
}

/// Preset table, keyed by platform.
pub const FEE_PRESETS: [(Platform, FeePreset); 7] = [
    (
        Platform::Etsy,
        FeePreset {
            percent_bps: 950,
            fixed_cents: 0,
            label: "Etsy (6.5% transaction + 3% processing)",
        },
    ),
    (
        Platform::Ebay,
        FeePreset {
            percent_bps: 1325,
            fixed_cents: 30,
            label: "eBay (13.25% final value + $0.30)",
        },
    ),
    (
        Platform::Shopify,
        FeePreset {
            percent_bps: 290,
            fixed_cents: 30,
            label: "Shopify Payments (2.9% + $0.30)",
        },
    ),
    (
        Platform::Amazon,
        FeePreset {
            percent_bps: 1500,
            fixed_cents: 0,
            label: "Amazon (15% referral)",
        },
    ),
    (
        Platform::Gumroad,
        FeePreset {
            percent_bps: 1000,
            fixed_cents: 50,
            label: "Gumroad (10% + $0.50)",
        },
    ),
    (
        Platform::TiktokShop,
        FeePreset {
            percent_bps: 600,
            fixed_cents: 30,
            label: "TikTok Shop (6% + $0.30)",
        },
    ),
    (
        Platform::Generic,
        FeePreset {
            percent_bps: 300,
            fixed_cents: 30,
            label: "Generic (3% + $0.30)",
        },
    ),
];

/// The preset used when nothing more specific matches.
pub const GENERIC_PRESET: FeePreset = FEE_PRESETS[6].1;

/// Looks up the fee preset for a platform.
///
/// Every [`Platform`] has an entry; the `GENERIC_PRESET` fallback only
/// matters if the table and the enum drift apart.
pub fn fee_preset(platform: Platform) -> FeePreset {
    FEE_PRESETS
        .iter()
        .find(|(p, _)| *p == platform)
        .map(|(_, preset)| *preset)
        .unwrap_or(GENERIC_PRESET)
}

// =============================================================================
// Overrides
// =============================================================================

/// Per-listing replacements for preset and default values.
///
/// `None` keeps the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FeeOverrides {
    /// Replaces the preset's percentage.
    #[serde(default)]
    pub percent_bps: Option<u32>,
    /// Replaces the preset's fixed fee.
    #[serde(default)]
    pub fixed_cents: Option<i64>,
    /// Replaces the product kind's default buffer.
    #[serde(default)]
    pub buffer_bps: Option<u32>,
}

impl FeeOverrides {
    /// The effective percent rate for a preset.
    pub fn percent(&self, preset: &FeePreset) -> Bps {
        Bps::new(self.percent_bps.unwrap_or(preset.percent_bps))
    }

    /// The effective fixed fee for a preset.
    pub fn fixed(&self, preset: &FeePreset) -> i64 {
        self.fixed_cents.unwrap_or(preset.fixed_cents)
    }
}

// =============================================================================
// Fee Calculation
// =============================================================================

/// Result of [`compute_fees`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FeeQuote {
    pub platform: Platform,
    /// Effective percentage applied.
    pub percent_bps: u32,
    /// Percentage part, rounded to the nearest cent.
    pub percent_cents: i64,
    /// Fixed part.
    pub fixed_cents: i64,
    /// `percent_cents + fixed_cents`.
    pub total_cents: i64,
    pub label: String,
}

/// Computes platform fees for a sale price.
///
/// Never fails: unknown platforms have already resolved to
/// [`Platform::Generic`], and no price is rejected here.
///
/// ## Example
/// ```rust
/// use listwise_core::fees::{compute_fees, FeeOverrides};
/// use listwise_core::types::Platform;
///
/// let quote = compute_fees(1490, Platform::Etsy, &FeeOverrides::default());
/// assert_eq!(quote.total_cents, 142);
///
/// let ebay = compute_fees(2000, Platform::Ebay, &FeeOverrides::default());
/// assert_eq!(ebay.total_cents, 265 + 30);
/// ```
pub fn compute_fees(price_cents: i64, platform: Platform, overrides: &FeeOverrides) -> FeeQuote {
    let preset = fee_preset(platform);
    let percent = overrides.percent(&preset);
    let percent_cents = percent.apply(price_cents);
    let fixed_cents = overrides.fixed(&preset);

    FeeQuote {
        platform,
        percent_bps: percent.get(),
        percent_cents,
        fixed_cents,
        total_cents: percent_cents.saturating_add(fixed_cents),
        label: preset.label.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_platform_has_preset() {
        for platform in Platform::ALL {
            assert!(FEE_PRESETS.iter().any(|(p, _)| *p == platform), "{platform}");
        }
    }

    #[test]
    fn test_etsy_fees() {
        let quote = compute_fees(1490, Platform::Etsy, &FeeOverrides::default());
        assert_eq!(quote.percent_cents, 142);
        assert_eq!(quote.fixed_cents, 0);
        assert_eq!(quote.total_cents, 142);
        assert_eq!(quote.percent_bps, 950);
    }

    #[test]
    fn test_unknown_platform_uses_generic() {
        let quote = compute_fees(1000, Platform::from_id("craigslist"), &FeeOverrides::default());
        assert_eq!(quote.platform, Platform::Generic);
        assert_eq!(quote.total_cents, 30 + 30);
        assert_eq!(quote.label, GENERIC_PRESET.label);
    }

    #[test]
    fn test_overrides_replace_parts_individually() {
        let overrides = FeeOverrides {
            percent_bps: Some(500),
            ..Default::default()
        };
        let quote = compute_fees(2000, Platform::Shopify, &overrides);
        assert_eq!(quote.percent_cents, 100);
        assert_eq!(quote.fixed_cents, 30);

        let overrides = FeeOverrides {
            fixed_cents: Some(0),
            ..Default::default()
        };
        let quote = compute_fees(2000, Platform::Shopify, &overrides);
        assert_eq!(quote.percent_cents, 58);
        assert_eq!(quote.total_cents, 58);
    }

    #[test]
    fn test_zero_price_still_charges_fixed_fee() {
        let quote = compute_fees(0, Platform::Gumroad, &FeeOverrides::default());
        assert_eq!(quote.total_cents, 50);
    }
}
