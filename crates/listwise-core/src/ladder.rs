//! # Price Ladders
//!
//! Suggests a few charm-priced options above the break-even price, so the
//! seller can pick between "just clears the floor" and "comfortable".
//!
//! ## Ladder Construction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  break_even = min_price_for_floor(inputs)          e.g. 1427           │
//! │                                                                         │
//! │  multiplier   raw     charm (.99, ≥ break_even)   evaluate             │
//! │  ──────────   ────    ─────────────────────────   ────────             │
//! │  1.00×        1427    1499                        pass ✓               │
//! │  1.15×        1642    1699                        pass ✓               │
//! │  1.30×        1856    1899                        pass ✓               │
//! │  1.50×        2141    2199                        pass ✓               │
//! │                                                                         │
//! │  Failing rung at index 0 → bumped one charm step (+1.00) and kept.     │
//! │  Failing rung elsewhere  → dropped.                                    │
//! │  Then: sort ascending, dedupe by price.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::charm::round_to_charm;
use crate::econ::{evaluate, min_price_for_floor, EconInputs, PriceBound};
use crate::types::{ceil_div, CharmEnding};
use crate::{BPS_SCALE, DEFAULT_LADDER_MULTIPLIERS_BPS};

/// Distance between two consecutive charm prices.
const CHARM_STEP_CENTS: i64 = 100;

/// How to build a ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LadderOptions {
    /// Multipliers over break-even, in bps (11500 = 1.15×).
    pub multipliers_bps: Vec<u32>,
    pub charm: CharmEnding,
}

impl Default for LadderOptions {
    fn default() -> Self {
        LadderOptions {
            multipliers_bps: DEFAULT_LADDER_MULTIPLIERS_BPS.to_vec(),
            charm: CharmEnding::default(),
        }
    }
}

/// One suggested price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LadderRung {
    pub price_cents: i64,
    /// The multiplier that produced this rung.
    pub multiplier_bps: u32,
    pub profit_cents: i64,
    pub margin_bps: i64,
    pub pass: bool,
}

/// Builds an ascending, deduplicated ladder of charm prices.
///
/// `inputs.price_cents` is ignored. An unreachable floor gives an empty
/// ladder.
///
/// ## Example
/// ```rust
/// use listwise_core::econ::EconInputs;
/// use listwise_core::ladder::{build_price_ladder, LadderOptions};
/// use listwise_core::types::Platform;
///
/// let inputs = EconInputs {
///     cogs_cents: 500,
///     shipping_cents: 320,
///     platform: Platform::Etsy,
///     ..Default::default()
/// };
/// let prices: Vec<i64> = build_price_ladder(&inputs, &LadderOptions::default())
///     .iter()
///     .map(|rung| rung.price_cents)
///     .collect();
/// assert_eq!(prices, vec![1499, 1699, 1899, 2199]);
/// ```
pub fn build_price_ladder(inputs: &EconInputs, options: &LadderOptions) -> Vec<LadderRung> {
    let break_even = match min_price_for_floor(inputs) {
        PriceBound::Finite(cents) => cents,
        PriceBound::Unreachable => return Vec::new(),
    };

    let mut rungs = Vec::with_capacity(options.multipliers_bps.len());

    for (index, &multiplier_bps) in options.multipliers_bps.iter().enumerate() {
        let raw = ceil_div(
            break_even as i128 * multiplier_bps as i128,
            BPS_SCALE as i128,
        ) as i64;
        let candidate = round_to_charm(raw, options.charm, Some(break_even));

        let Ok(result) = evaluate(&inputs.with_price(candidate)) else {
            continue;
        };

        if result.pass {
            rungs.push(LadderRung {
                price_cents: candidate,
                multiplier_bps,
                profit_cents: result.profit_cents,
                margin_bps: result.margin_bps,
                pass: true,
            });
            continue;
        }

        // Only the first rung gets a second chance.
        if index == 0 {
            let bumped = candidate.saturating_add(CHARM_STEP_CENTS);
            debug!(
                candidate = candidate,
                bumped = bumped,
                margin_bps = result.margin_bps,
                "First ladder rung missed the floor, bumping one charm step"
            );
            if let Ok(bumped_result) = evaluate(&inputs.with_price(bumped)) {
                rungs.push(LadderRung {
                    price_cents: bumped,
                    multiplier_bps,
                    profit_cents: bumped_result.profit_cents,
                    margin_bps: bumped_result.margin_bps,
                    pass: bumped_result.pass,
                });
            }
        }
    }

    rungs.sort_by_key(|rung| rung.price_cents);
    rungs.dedup_by_key(|rung| rung.price_cents);
    rungs
}

// =============================================================================
// Unit Tests
// =============================================================================
