//! # Pricing Configuration
//!
//! Seller-level defaults the listing UI starts from.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     LISTWISE_FLOOR_BPS=3500                                            │
//! │     LISTWISE_LOCALE=de-DE                                              │
//! │                                                                         │
//! │  2. JSON document (saved seller settings, via from_json)               │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     30% floor, 3%/1% buffer, .99 charm, USD, en-US                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Environment Variables
//! | Variable                        | Example              |
//! |---------------------------------|----------------------|
//! | `LISTWISE_FLOOR_BPS`            | `3000`               |
//! | `LISTWISE_PHYSICAL_BUFFER_BPS`  | `300`                |
//! | `LISTWISE_DIGITAL_BUFFER_BPS`   | `100`                |
//! | `LISTWISE_CHARM`                | `.95`                |
//! | `LISTWISE_LADDER_MULTIPLIERS`   | `10000,11500,13000`  |
//! | `LISTWISE_CURRENCY`             | `EUR`                |
//! | `LISTWISE_LOCALE`               | `fr-FR`              |

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::currency::Currency;
use crate::econ::EconInputs;
use crate::error::ValidationError;
use crate::fees::FeeOverrides;
use crate::format::Locale;
use crate::ladder::LadderOptions;
use crate::types::{CharmEnding, Platform, ProductKind};
use crate::validation::{parse_bps, parse_multipliers, validate_bps, validate_multipliers};
use crate::{
    DEFAULT_DIGITAL_BUFFER_BPS, DEFAULT_FLOOR_BPS, DEFAULT_LADDER_MULTIPLIERS_BPS,
    DEFAULT_PHYSICAL_BUFFER_BPS,
};

/// Seller-level pricing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingConfig {
    /// Target margin in basis points.
    pub floor_bps: u32,
    /// Buffer for physical products (returns, damage, ads).
    pub physical_buffer_bps: u32,
    /// Buffer for digital products.
    pub digital_buffer_bps: u32,
    /// Ending used for suggested prices.
    pub charm: CharmEnding,
    /// Ladder multipliers over break-even, in bps.
    pub ladder_multipliers_bps: Vec<u32>,
    pub currency: Currency,
    pub locale: Locale,
}

impl Default for PricingConfig {
    /// Returns the built-in defaults.
    ///
    /// ## Default Values
    /// - Floor: 30%
    /// - Buffer: 3% physical, 1% digital
    /// - Charm: .99
    /// - Ladder: 1.00×, 1.15×, 1.30×, 1.50×
    /// - Currency/locale: USD, en-US
    fn default() -> Self {
        PricingConfig {
            floor_bps: DEFAULT_FLOOR_BPS,
            physical_buffer_bps: DEFAULT_PHYSICAL_BUFFER_BPS,
            digital_buffer_bps: DEFAULT_DIGITAL_BUFFER_BPS,
            charm: CharmEnding::NinetyNine,
            ladder_multipliers_bps: DEFAULT_LADDER_MULTIPLIERS_BPS.to_vec(),
            currency: Currency::Usd,
            locale: Locale::EnUs,
        }
    }
}

impl PricingConfig {
    /// Loads configuration from the process environment over the defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from any key lookup over the defaults.
    ///
    /// Unset keys keep their default; set but invalid keys are errors.
    ///
    /// ## Example
    /// ```rust
    /// use listwise_core::config::PricingConfig;
    ///
    /// let config = PricingConfig::from_lookup(|key| match key {
    ///     "LISTWISE_FLOOR_BPS" => Some("3500".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.floor_bps, 3500);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = PricingConfig::default();
        config.apply_lookup(lookup)?;
        debug!(
            floor_bps = config.floor_bps,
            currency = %config.currency,
            locale = %config.locale,
            "Pricing configuration loaded"
        );
        Ok(config)
    }

    /// Loads a saved settings document. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PricingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Overrides fields from a key lookup, in place.
    pub fn apply_lookup<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let invalid = |key: &str| {
            let key = key.to_string();
            move |source: ValidationError| ConfigError::InvalidValue { key, source }
        };

        const FLOOR: &str = "LISTWISE_FLOOR_BPS";
        const PHYSICAL: &str = "LISTWISE_PHYSICAL_BUFFER_BPS";
        const DIGITAL: &str = "LISTWISE_DIGITAL_BUFFER_BPS";
        const CHARM: &str = "LISTWISE_CHARM";
        const LADDER: &str = "LISTWISE_LADDER_MULTIPLIERS";
        const CURRENCY: &str = "LISTWISE_CURRENCY";
        const LOCALE: &str = "LISTWISE_LOCALE";

        if let Some(raw) = lookup(FLOOR) {
            self.floor_bps = parse_bps("floor_bps", &raw).map_err(invalid(FLOOR))?;
        }
        if let Some(raw) = lookup(PHYSICAL) {
            self.physical_buffer_bps =
                parse_bps("physical_buffer_bps", &raw).map_err(invalid(PHYSICAL))?;
        }
        if let Some(raw) = lookup(DIGITAL) {
            self.digital_buffer_bps =
                parse_bps("digital_buffer_bps", &raw).map_err(invalid(DIGITAL))?;
        }
        if let Some(raw) = lookup(CHARM) {
            self.charm = raw.parse().map_err(invalid(CHARM))?;
        }
        if let Some(raw) = lookup(LADDER) {
            self.ladder_multipliers_bps = parse_multipliers(&raw).map_err(invalid(LADDER))?;
        }
        if let Some(raw) = lookup(CURRENCY) {
            self.currency = raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: CURRENCY.to_string(),
                source: ValidationError::InvalidFormat {
                    field: "currency".to_string(),
                    reason: format!("'{}' is not a supported currency", raw.trim()),
                },
            })?;
        }
        if let Some(raw) = lookup(LOCALE) {
            self.locale = raw.parse().map_err(invalid(LOCALE))?;
        }

        Ok(())
    }

    /// Checks every field against the same rules the env loader applies.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_bps("floor_bps", self.floor_bps)?;
        validate_bps("physical_buffer_bps", self.physical_buffer_bps)?;
        validate_bps("digital_buffer_bps", self.digital_buffer_bps)?;
        validate_multipliers(&self.ladder_multipliers_bps)
    }

    /// The buffer this configuration uses for a product kind.
    pub fn buffer_bps(&self, kind: ProductKind) -> u32 {
        match kind {
            ProductKind::Physical => self.physical_buffer_bps,
            ProductKind::Digital => self.digital_buffer_bps,
        }
    }

    /// Builds evaluator inputs carrying this configuration's floor and
    /// buffer.
    pub fn inputs(
        &self,
        price_cents: i64,
        cogs_cents: i64,
        platform: Platform,
        kind: ProductKind,
    ) -> EconInputs {
        EconInputs {
            price_cents,
            cogs_cents,
            platform,
            kind,
            floor_bps: Some(self.floor_bps),
            overrides: FeeOverrides {
                buffer_bps: Some(self.buffer_bps(kind)),
                ..Default::default()
            },
            ..Default::default()
        }
    }
}

impl From<&PricingConfig> for LadderOptions {
    fn from(config: &PricingConfig) -> Self {
        LadderOptions {
            multipliers_bps: config.ladder_multipliers_bps.clone(),
            charm: config.charm,
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: ValidationError,
    },

    #[error("Invalid settings document: {0}")]
    Document(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Unit Tests
// =============================================================================
