//! # Listing Economics
//!
//! Evaluates whether a listing price clears the target margin, and solves the
//! two inverse problems: the lowest price that clears it, and the highest
//! cost of goods a given price can carry.
//!
//! ## The Margin Equation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  profit = price − (cogs + shipping + packaging + fees + buffer)        │
//! │  margin = round(profit × 10000 / price)            (bps, signed)       │
//! │  pass   = margin ≥ floor                                               │
//! │                                                                         │
//! │  fees   = price × fee% + fixed                                         │
//! │  buffer = price × buffer%                                              │
//! │                                                                         │
//! │  Solving for price at margin = floor:                                  │
//! │                                                                         │
//! │           cogs + shipping + packaging + fixed                          │
//! │  price = ──────────────────────────────────────                        │
//! │            1 − fee% − buffer% − floor%                                 │
//! │                                                                         │
//! │  Denominator ≤ 0 → no price can ever clear the floor.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## User Workflow
//! ```text
//! Seller types price ──► evaluate() ──► green/red margin badge
//!                            │
//!                            └──► min_price_for_floor() ──► "list at ≥ $X"
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::fees::{compute_fees, fee_preset, FeeOverrides};
use crate::types::{ceil_div, round_div, Bps, Platform, ProductKind};
use crate::{BPS_SCALE, DEFAULT_DIGITAL_BUFFER_BPS, DEFAULT_FLOOR_BPS, DEFAULT_PHYSICAL_BUFFER_BPS};

// =============================================================================
// Inputs
// =============================================================================

/// Everything needed to evaluate one listing price.
///
/// Only `price_cents` is validated (and only by the functions that divide
/// by it). Negative costs are accepted as given.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EconInputs {
    /// Listing price. Ignored by [`min_price_for_floor`].
    #[serde(default)]
    pub price_cents: i64,
    /// Cost of goods sold.
    #[serde(default)]
    pub cogs_cents: i64,
    /// Shipping label cost (ignored for digital products).
    #[serde(default)]
    pub shipping_cents: i64,
    /// Packaging materials (ignored for digital products).
    #[serde(default)]
    pub packaging_cents: i64,
    #[serde(default)]
    pub platform: Platform,
    #[serde(default)]
    pub kind: ProductKind,
    /// Target margin. `None` uses the crate default (30%).
    #[serde(default)]
    pub floor_bps: Option<u32>,
    #[serde(default)]
    pub overrides: FeeOverrides,
}

impl EconInputs {
    /// Creates inputs for a physical product with no shipping or packaging.
    pub fn new(price_cents: i64, cogs_cents: i64, platform: Platform) -> Self {
        EconInputs {
            price_cents,
            cogs_cents,
            platform,
            ..Default::default()
        }
    }

    /// Returns a copy with a different price.
    pub fn with_price(&self, price_cents: i64) -> Self {
        EconInputs {
            price_cents,
            ..self.clone()
        }
    }

    /// The floor in effect.
    pub fn floor(&self) -> Bps {
        Bps::new(self.floor_bps.unwrap_or(DEFAULT_FLOOR_BPS))
    }

    /// The buffer rate in effect: override, else the kind's default.
    pub fn buffer(&self) -> Bps {
        let default = match self.kind {
            ProductKind::Physical => DEFAULT_PHYSICAL_BUFFER_BPS,
            ProductKind::Digital => DEFAULT_DIGITAL_BUFFER_BPS,
        };
        Bps::new(self.overrides.buffer_bps.unwrap_or(default))
    }

    /// Shipping cost that actually applies.
    pub fn effective_shipping(&self) -> i64 {
        if self.kind.ships() {
            self.shipping_cents
        } else {
            0
        }
    }

    /// Packaging cost that actually applies.
    pub fn effective_packaging(&self) -> i64 {
        if self.kind.ships() {
            self.packaging_cents
        } else {
            0
        }
    }

    /// Costs that do not scale with price, fixed platform fee included.
    fn fixed_costs(&self) -> i64 {
        let preset = fee_preset(self.platform);
        self.cogs_cents
            .saturating_add(self.effective_shipping())
            .saturating_add(self.effective_packaging())
            .saturating_add(self.overrides.fixed(&preset))
    }

    /// Fee rate that scales with price.
    fn percent_fee(&self) -> Bps {
        self.overrides.percent(&fee_preset(self.platform))
    }
}

// =============================================================================
// Results
// =============================================================================

/// Every cost line that went into a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub cogs_cents: i64,
    pub shipping_cents: i64,
    pub packaging_cents: i64,
    pub percent_fee_cents: i64,
    pub fixed_fee_cents: i64,
    pub buffer_cents: i64,
    /// Sum of all the above.
    pub total_cost_cents: i64,
}

/// Outcome of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EconResult {
    pub price_cents: i64,
    /// Platform fees (percent + fixed).
    pub fees_cents: i64,
    pub buffer_cents: i64,
    pub profit_cents: i64,
    /// Profit over price in basis points. Negative when losing money.
    pub margin_bps: i64,
    pub floor_bps: u32,
    pub pass: bool,
    pub breakdown: CostBreakdown,
}

/// A solved price that may not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PriceBound {
    /// The lowest price (cents) that clears the floor.
    Finite(i64),
    /// Fees, buffer and floor add up to 100% or more.
    Unreachable,
}

impl PriceBound {
    /// Returns the price in cents, or `None` if unreachable.
    #[inline]
    pub const fn cents(&self) -> Option<i64> {
        match self {
            PriceBound::Finite(cents) => Some(*cents),
            PriceBound::Unreachable => None,
        }
    }

    #[inline]
    pub const fn is_reachable(&self) -> bool {
        matches!(self, PriceBound::Finite(_))
    }
}

// =============================================================================
// Evaluation
// =============================================================================

fn require_positive_price(price_cents: i64) -> CoreResult<()> {
    if price_cents <= 0 {
        return Err(CoreError::NonPositivePrice { price_cents });
    }
    Ok(())
}

/// Profit over price in bps, rounded half away from zero. `price` must be
/// positive.
fn margin_of(profit: i64, price: i64) -> i64 {
    round_div(profit as i128 * BPS_SCALE as i128, price as i128)
        .clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

/// Smallest profit at `price` whose rounded margin reaches `floor_bps`.
///
/// Rounding half up admits profits just under `price × floor`, so the
/// closed form solves `2·profit·10000 + price ≥ 2·floor·price`. The loops
/// only move for a zero floor, where a negative profit rounds away from zero.
fn min_passing_profit(price: i64, floor_bps: u32) -> i64 {
    let floor = floor_bps as i64;
    let mut profit = ceil_div(
        (2 * floor as i128 - 1) * price as i128,
        2 * BPS_SCALE as i128,
    ) as i64;
    while margin_of(profit, price) < floor {
        profit += 1;
    }
    while margin_of(profit - 1, price) >= floor {
        profit -= 1;
    }
    profit
}

/// Evaluates a listing price against its margin floor.
///
/// ## Errors
/// [`CoreError::NonPositivePrice`] when `price_cents <= 0`.
///
/// ## Example
/// ```rust
/// use listwise_core::econ::{evaluate, EconInputs};
/// use listwise_core::types::{Platform, ProductKind};
///
/// let result = evaluate(&EconInputs {
///     price_cents: 1490,
///     cogs_cents: 500,
///     shipping_cents: 320,
///     platform: Platform::Etsy,
///     kind: ProductKind::Physical,
///     ..Default::default()
/// })
/// .unwrap();
///
/// assert_eq!(result.fees_cents, 142);
/// assert_eq!(result.margin_bps, 3242);
/// assert!(result.pass);
/// ```
pub fn evaluate(inputs: &EconInputs) -> CoreResult<EconResult> {
    let price = inputs.price_cents;
    require_positive_price(price)?;

    let fees = compute_fees(price, inputs.platform, &inputs.overrides);
    let buffer_cents = inputs.buffer().apply(price);
    let shipping = inputs.effective_shipping();
    let packaging = inputs.effective_packaging();

    let total_cost = inputs
        .cogs_cents
        .saturating_add(shipping)
        .saturating_add(packaging)
        .saturating_add(fees.total_cents)
        .saturating_add(buffer_cents);
    let profit = price.saturating_sub(total_cost);
    let margin_bps = margin_of(profit, price);
    let floor = inputs.floor();
    let pass = margin_bps >= floor.get() as i64;

    debug!(
        platform = %inputs.platform,
        price = price,
        profit = profit,
        margin_bps = margin_bps,
        floor_bps = floor.get(),
        pass = pass,
        "Evaluated listing price"
    );

    Ok(EconResult {
        price_cents: price,
        fees_cents: fees.total_cents,
        buffer_cents,
        profit_cents: profit,
        margin_bps,
        floor_bps: floor.get(),
        pass,
        breakdown: CostBreakdown {
            cogs_cents: inputs.cogs_cents,
            shipping_cents: shipping,
            packaging_cents: packaging,
            percent_fee_cents: fees.percent_cents,
            fixed_fee_cents: fees.fixed_cents,
            buffer_cents,
            total_cost_cents: total_cost,
        },
    })
}

/// Solves for the lowest price whose margin reaches the floor.
///
/// `inputs.price_cents` is ignored. The answer is exact before cent
/// rounding of the fee and buffer lines, and never below 1 cent.
///
/// ## Example
/// ```rust
/// use listwise_core::econ::{min_price_for_floor, EconInputs, PriceBound};
/// use listwise_core::types::Platform;
///
/// // (1970 cogs + 30 fixed fee) / (1 − 3% fee − 3% buffer − 30% floor) = 3125
/// let mut inputs = EconInputs::new(0, 1970, Platform::Generic);
/// assert_eq!(min_price_for_floor(&inputs), PriceBound::Finite(3125));
///
/// inputs.floor_bps = Some(9500);
/// assert_eq!(min_price_for_floor(&inputs), PriceBound::Unreachable);
/// ```
pub fn min_price_for_floor(inputs: &EconInputs) -> PriceBound {
    let variable_bps = inputs.percent_fee().get() as i64
        + inputs.buffer().get() as i64
        + inputs.floor().get() as i64;
    let denominator = BPS_SCALE - variable_bps;

    if denominator <= 0 {
        debug!(
            platform = %inputs.platform,
            variable_bps = variable_bps,
            "Floor unreachable: fees, buffer and floor reach 100%"
        );
        return PriceBound::Unreachable;
    }

    let fixed = inputs.fixed_costs();
    let price = ceil_div(fixed as i128 * BPS_SCALE as i128, denominator as i128) as i64;
    PriceBound::Finite(price.max(1))
}

/// Solves for the highest cost of goods that still clears the floor at the
/// given price.
///
/// Uses the same rounded margin as [`evaluate`]: `evaluate` passes at the
/// returned COGS and fails one cent above it. The result is negative when
/// even free goods would miss the floor.
///
/// ## Errors
/// [`CoreError::NonPositivePrice`] when `price_cents <= 0`.
pub fn max_cogs_for_floor(inputs: &EconInputs) -> CoreResult<i64> {
    let price = inputs.price_cents;
    require_positive_price(price)?;

    let fees = compute_fees(price, inputs.platform, &inputs.overrides);
    let buffer_cents = inputs.buffer().apply(price);
    let required_profit = min_passing_profit(price, inputs.floor().get());

    Ok(price
        .saturating_sub(inputs.effective_shipping())
        .saturating_sub(inputs.effective_packaging())
        .saturating_sub(fees.total_cents)
        .saturating_sub(buffer_cents)
        .saturating_sub(required_profit))
}

// =============================================================================
// Variants
// =============================================================================

/// One SKU variant of a listing. Anything not given comes from the common
/// inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput {
    pub sku: String,
    pub price_cents: i64,
    pub cogs_cents: i64,
    /// Overrides the common shipping cost (heavier sizes, etc.).
    #[serde(default)]
    pub shipping_cents: Option<i64>,
}

/// A variant paired with its evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VariantEvaluation {
    pub sku: String,
    pub result: EconResult,
}

/// Evaluates every variant of a listing, in input order.
///
/// ## Errors
/// The first variant with a non-positive price fails the whole call.
pub fn evaluate_variants(
    common: &EconInputs,
    variants: &[VariantInput],
) -> CoreResult<Vec<VariantEvaluation>> {
    variants
        .iter()
        .map(|variant| {
            let inputs = EconInputs {
                price_cents: variant.price_cents,
                cogs_cents: variant.cogs_cents,
                shipping_cents: variant.shipping_cents.unwrap_or(common.shipping_cents),
                ..common.clone()
            };
            let result = evaluate(&inputs)?;
            Ok(VariantEvaluation {
                sku: variant.sku.clone(),
                result,
            })
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn etsy_mug() -> EconInputs {
        EconInputs {
            price_cents: 1490,
            cogs_cents: 500,
            shipping_cents: 320,
            platform: Platform::Etsy,
            kind: ProductKind::Physical,
            ..Default::default()
        }
    }

    #[test]
    fn test_evaluate_etsy_example() {
        let result = evaluate(&etsy_mug()).unwrap();
        assert_eq!(result.fees_cents, 142);
        assert_eq!(result.buffer_cents, 45);
        assert_eq!(result.profit_cents, 483);
        assert_eq!(result.margin_bps, 3242);
        assert_eq!(result.floor_bps, 3000);
        assert!(result.pass);
        assert_eq!(result.breakdown.total_cost_cents, 1490 - 483);
    }

    #[test]
    fn test_evaluate_fails_below_floor() {
        let inputs = EconInputs {
            floor_bps: Some(3500),
            ..etsy_mug()
        };
        let result = evaluate(&inputs).unwrap();
        assert_eq!(result.margin_bps, 3242);
        assert!(!result.pass);
    }

    #[test]
    fn test_evaluate_rejects_non_positive_price() {
        assert_eq!(
            evaluate(&etsy_mug().with_price(0)),
            Err(CoreError::NonPositivePrice { price_cents: 0 })
        );
        assert!(evaluate(&etsy_mug().with_price(-100)).is_err());
    }

    #[test]
    fn test_evaluate_negative_margin() {
        let inputs = EconInputs {
            cogs_cents: 2000,
            ..etsy_mug()
        };
        let result = evaluate(&inputs).unwrap();
        assert!(result.profit_cents < 0);
        assert!(result.margin_bps < 0);
        assert!(!result.pass);
    }

    #[test]
    fn test_digital_ignores_shipping_and_packaging() {
        let inputs = EconInputs {
            price_cents: 1000,
            cogs_cents: 0,
            shipping_cents: 500,
            packaging_cents: 100,
            platform: Platform::Gumroad,
            kind: ProductKind::Digital,
            ..Default::default()
        };
        let result = evaluate(&inputs).unwrap();
        assert_eq!(result.breakdown.shipping_cents, 0);
        assert_eq!(result.breakdown.packaging_cents, 0);
        // 100 + 50 fees, 10 buffer
        assert_eq!(result.profit_cents, 1000 - 150 - 10);
        assert_eq!(result.margin_bps, 8400);
    }

    #[test]
    fn test_buffer_override() {
        let inputs = EconInputs {
            overrides: FeeOverrides {
                buffer_bps: Some(0),
                ..Default::default()
            },
            ..etsy_mug()
        };
        let result = evaluate(&inputs).unwrap();
        assert_eq!(result.buffer_cents, 0);
        assert_eq!(result.profit_cents, 528);
    }

    #[test]
    fn test_min_price_round_trips_through_evaluate() {
        let inputs = EconInputs {
            cogs_cents: 4200,
            shipping_cents: 850,
            packaging_cents: 150,
            platform: Platform::Ebay,
            ..Default::default()
        };
        let price = min_price_for_floor(&inputs).cents().unwrap();
        let result = evaluate(&inputs.with_price(price)).unwrap();
        assert!((result.margin_bps - 3000).abs() <= 1, "{}", result.margin_bps);
    }

    #[test]
    fn test_min_price_on_small_amounts_can_miss_by_rounding() {
        // 100 / 57.5% = 173.9; whole-cent fee and buffer lines leave the
        // solved price just under the floor at this size.
        let inputs = EconInputs::new(0, 100, Platform::Etsy);
        assert_eq!(min_price_for_floor(&inputs), PriceBound::Finite(174));

        let solved = evaluate(&inputs.with_price(174)).unwrap();
        assert_eq!(solved.fees_cents, 17);
        assert_eq!(solved.buffer_cents, 5);
        assert_eq!(solved.margin_bps, 2989);
        assert!(!solved.pass);

        let next = evaluate(&inputs.with_price(175)).unwrap();
        assert_eq!(next.margin_bps, 3029);
        assert!(next.pass);
    }

    #[test]
    fn test_min_price_unreachable() {
        let inputs = EconInputs {
            platform: Platform::Amazon,
            floor_bps: Some(8200),
            ..Default::default()
        };
        // 15% + 3% + 82% = 100%
        assert_eq!(min_price_for_floor(&inputs), PriceBound::Unreachable);
        assert_eq!(min_price_for_floor(&inputs).cents(), None);
    }

    #[test]
    fn test_min_price_with_no_costs_is_one_cent() {
        let inputs = EconInputs {
            platform: Platform::Amazon,
            ..Default::default()
        };
        assert_eq!(min_price_for_floor(&inputs), PriceBound::Finite(1));
    }

    #[test]
    fn test_max_cogs_for_floor() {
        let inputs = etsy_mug();
        // 1490 − 320 − 142 − 45 − 447
        let max_cogs = max_cogs_for_floor(&inputs).unwrap();
        assert_eq!(max_cogs, 536);

        let at_limit = evaluate(&EconInputs {
            cogs_cents: max_cogs,
            ..inputs.clone()
        })
        .unwrap();
        assert!(at_limit.pass);

        let over = evaluate(&EconInputs {
            cogs_cents: max_cogs + 1,
            ..inputs
        })
        .unwrap();
        assert!(!over.pass);
    }

    #[test]
    fn test_max_cogs_counts_margin_that_rounds_up_to_floor() {
        // Profit 605 on 2017 is 29.995%, which rounds to 3000 bps.
        let inputs = EconInputs::new(2017, 0, Platform::Generic);
        let max_cogs = max_cogs_for_floor(&inputs).unwrap();
        assert_eq!(max_cogs, 1260);

        let at_limit = evaluate(&EconInputs {
            cogs_cents: 1260,
            ..inputs.clone()
        })
        .unwrap();
        assert_eq!(at_limit.margin_bps, 3000);
        assert!(at_limit.pass);

        let over = evaluate(&EconInputs {
            cogs_cents: 1261,
            ..inputs
        })
        .unwrap();
        assert_eq!(over.margin_bps, 2995);
        assert!(!over.pass);
    }

    #[test]
    fn test_max_cogs_with_zero_floor_allows_no_loss() {
        // A one cent loss on 20000 is -0.5 bps, which rounds away to -1.
        let inputs = EconInputs {
            floor_bps: Some(0),
            ..EconInputs::new(20_000, 0, Platform::Generic)
        };
        let max_cogs = max_cogs_for_floor(&inputs).unwrap();
        assert_eq!(max_cogs, 20_000 - 630 - 600);

        let over = evaluate(&EconInputs {
            cogs_cents: max_cogs + 1,
            ..inputs
        })
        .unwrap();
        assert_eq!(over.margin_bps, -1);
        assert!(!over.pass);
    }

    #[test]
    fn test_extreme_costs_saturate() {
        let inputs = EconInputs {
            shipping_cents: i64::MAX,
            ..EconInputs::new(1, i64::MAX, Platform::Ebay)
        };
        let result = evaluate(&inputs).unwrap();
        assert_eq!(result.breakdown.total_cost_cents, i64::MAX);
        assert_eq!(result.profit_cents, 1 - i64::MAX);
        assert_eq!(result.margin_bps, i64::MIN);
        assert!(!result.pass);

        assert_eq!(max_cogs_for_floor(&inputs).unwrap(), i64::MIN);
    }

    #[test]
    fn test_max_cogs_negative_when_impossible() {
        let inputs = EconInputs {
            price_cents: 100,
            shipping_cents: 500,
            ..Default::default()
        };
        assert!(max_cogs_for_floor(&inputs).unwrap() < 0);
        assert!(max_cogs_for_floor(&inputs.with_price(0)).is_err());
    }

    #[test]
    fn test_evaluate_variants_inherits_common() {
        let common = EconInputs {
            shipping_cents: 320,
            platform: Platform::Etsy,
            ..Default::default()
        };
        let variants = vec![
            VariantInput {
                sku: "MUG-S".to_string(),
                price_cents: 1490,
                cogs_cents: 500,
                shipping_cents: None,
            },
            VariantInput {
                sku: "MUG-XL".to_string(),
                price_cents: 1990,
                cogs_cents: 700,
                shipping_cents: Some(480),
            },
        ];
        let evaluations = evaluate_variants(&common, &variants).unwrap();
        assert_eq!(evaluations.len(), 2);
        assert_eq!(evaluations[0].sku, "MUG-S");
        assert_eq!(evaluations[0].result.margin_bps, 3242);
        assert_eq!(evaluations[1].result.breakdown.shipping_cents, 480);
    }

    #[test]
    fn test_evaluate_variants_propagates_bad_price() {
        let variants = vec![VariantInput {
            sku: "FREE".to_string(),
            price_cents: 0,
            cogs_cents: 0,
            shipping_cents: None,
        }];
        let err = evaluate_variants(&EconInputs::default(), &variants).unwrap_err();
        assert_eq!(err, CoreError::NonPositivePrice { price_cents: 0 });
    }

    #[test]
    fn test_inputs_deserialize_with_defaults() {
        let inputs: EconInputs =
            serde_json::from_str(r#"{"priceCents":1490,"cogsCents":500,"platform":"etsy"}"#)
                .unwrap();
        assert_eq!(inputs.kind, ProductKind::Physical);
        assert_eq!(inputs.floor().get(), 3000);
        assert_eq!(inputs.overrides, FeeOverrides::default());
    }
}
