//! # listwise-core: Pure Pricing Logic for Listwise
//!
//! This crate is the **heart** of Listwise. It answers the questions a seller
//! asks while writing a listing: does this price make money, what is the
//! lowest price that does, and which charm prices should I offer?
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Listwise Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Listing UI (TypeScript)                      │   │
//! │  │    Price field ──► Margin badge ──► Price ladder ──► Publish    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ts-rs bindings / JSON                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ listwise-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   Fee/Margin Evaluator          Money/Currency Utility          │   │
//! │  │   ┌────────┐ ┌────────┐        ┌────────┐ ┌──────────┐          │   │
//! │  │   │  fees  │ │  econ  │        │ money  │ │  format  │          │   │
//! │  │   └────────┘ └────────┘        └────────┘ └──────────┘          │   │
//! │  │   ┌────────┐ ┌────────┐        ┌──────────┐ ┌───────────┐       │   │
//! │  │   │ charm  │ │ ladder │        │ currency │ │ processor │       │   │
//! │  │   └────────┘ └────────┘        └──────────┘ └───────────┘       │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two halves do not call each other. Each has its own charm rounding
//! and its own fee presets (platforms on one side, payment processors on the
//! other).
//!
//! ## Modules
//!
//! - [`types`] - Basis points, platforms, product kinds, charm endings
//! - [`fees`] - Platform fee presets and fee calculation
//! - [`econ`] - Margin evaluation and inverse solves
//! - [`charm`] - Charm rounding for cent prices
//! - [`ladder`] - Charm price ladders above break-even
//! - [`currency`] - Supported currencies
//! - [`money`] - Currency-tagged integer money
//! - [`format`] - Locale and compact formatting
//! - [`processor`] - Payment processor amount shapes and fees
//! - [`config`] - Seller defaults from env or JSON
//! - [`validation`] - Config value checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **Integer Money**: All monetary values are minor units (i64), all rates are bps
//! 3. **Explicit Errors**: The few business failures are typed; integer math saturates
//!
//! ## Example Usage
//!
//! ```rust
//! use listwise_core::econ::{evaluate, EconInputs};
//! use listwise_core::types::{Platform, ProductKind};
//!
//! let result = evaluate(&EconInputs {
//!     price_cents: 1490,
//!     cogs_cents: 500,
//!     shipping_cents: 320,
//!     platform: Platform::Etsy,
//!     kind: ProductKind::Physical,
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! // $14.90 on Etsy clears a 30% floor with 32.42%
//! assert_eq!(result.margin_bps, 3242);
//! assert!(result.pass);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod charm;
pub mod config;
pub mod currency;
pub mod econ;
pub mod error;
pub mod fees;
pub mod format;
pub mod ladder;
pub mod money;
pub mod processor;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use listwise_core::Money` instead of
// `use listwise_core::money::Money`

pub use charm::round_to_charm;
pub use config::{ConfigError, PricingConfig};
pub use currency::Currency;
pub use econ::{
    evaluate, evaluate_variants, max_cogs_for_floor, min_price_for_floor, EconInputs, EconResult,
    PriceBound,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use fees::{compute_fees, FeeOverrides, FeeQuote};
pub use format::Locale;
pub use ladder::{build_price_ladder, LadderOptions, LadderRung};
pub use money::Money;
pub use processor::{Processor, ProcessorAmount, StripeAmount};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// 100% in basis points.
pub const BPS_SCALE: i64 = 10_000;

/// Default target margin (30%).
///
/// ## Business Reason
/// Leaves room for promotions and the occasional refund while staying
/// competitive on handmade marketplaces.
pub const DEFAULT_FLOOR_BPS: u32 = 3_000;

/// Default buffer for physical products (3%): returns, breakage, ads.
pub const DEFAULT_PHYSICAL_BUFFER_BPS: u32 = 300;

/// Default buffer for digital products (1%): chargebacks only.
pub const DEFAULT_DIGITAL_BUFFER_BPS: u32 = 100;

/// Default ladder: 1.00×, 1.15×, 1.30×, 1.50× break-even.
pub const DEFAULT_LADDER_MULTIPLIERS_BPS: [u32; 4] = [10_000, 11_500, 13_000, 15_000];
