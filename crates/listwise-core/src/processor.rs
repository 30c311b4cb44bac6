//! # Payment Processor Shapes
//!
//! Amount payloads in the exact shape processor APIs expect, plus the
//! processors' own fee schedules. No requests are made from here; the
//! caller owns the HTTP client.
//!
//! Fee schedules are quoted in cents, so they only apply to two-decimal
//! currencies. Yen charges get [`CoreError::NoProcessorSchedule`] rather
//! than a fixed part reinterpreted as whole yen.
//!
//! ## Wire Shapes
//! ```text
//! PayPal-style:  { "currency_code": "USD", "value": "14.90" }
//!                { "currency_code": "JPY", "value": "1490" }
//!
//! Stripe-style:  { "amount": 1490, "currency": "usd" }
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Processors
// =============================================================================

/// A payment processor with a published fee schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Processor {
    Paypal,
    Stripe,
    Square,
}

/// A processor's per-transaction fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorFee {
    pub percent_bps: u32,
    /// Fixed part, in hundredths of the charged currency's major unit.
    pub fixed_minor: i64,
}

impl Processor {
    /// Standard domestic card rate.
    pub const fn fee_schedule(&self) -> ProcessorFee {
        match self {
            Processor::Paypal => ProcessorFee {
                percent_bps: 349,
                fixed_minor: 49,
            },
            Processor::Stripe => ProcessorFee {
                percent_bps: 290,
                fixed_minor: 30,
            },
            Processor::Square => ProcessorFee {
                percent_bps: 260,
                fixed_minor: 10,
            },
        }
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// `{ currency_code, value }` with a fixed-decimal string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProcessorAmount {
    pub currency_code: String,
    pub value: String,
}

/// `{ amount, currency }` in integer minor units and a lowercase code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StripeAmount {
    pub amount: i64,
    pub currency: String,
}

impl Money {
    /// Fixed-decimal string using `.` and the currency's decimal places,
    /// no grouping, no symbol.
    pub fn to_fixed_decimal(&self) -> String {
        let currency = self.currency();
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.cents().unsigned_abs();
        let factor = currency.minor_per_major() as u64;
        let decimals = currency.decimals() as usize;

        if decimals == 0 {
            format!("{sign}{abs}")
        } else {
            format!(
                "{sign}{}.{:0width$}",
                abs / factor,
                abs % factor,
                width = decimals
            )
        }
    }

    /// Amount payload for PayPal-style APIs.
    ///
    /// ## Example
    /// ```rust
    /// use listwise_core::currency::Currency;
    /// use listwise_core::money::Money;
    ///
    /// let amount = Money::from_cents(1490, Currency::Usd).to_processor_amount();
    /// assert_eq!(amount.currency_code, "USD");
    /// assert_eq!(amount.value, "14.90");
    /// ```
    pub fn to_processor_amount(&self) -> ProcessorAmount {
        ProcessorAmount {
            currency_code: self.currency().code().to_string(),
            value: self.to_fixed_decimal(),
        }
    }

    /// Amount payload for Stripe-style APIs.
    pub fn to_stripe_amount(&self) -> StripeAmount {
        StripeAmount {
            amount: self.cents(),
            currency: self.currency().code().to_lowercase(),
        }
    }

    /// What the processor keeps from a charge of this amount.
    ///
    /// ## Errors
    /// [`CoreError::NoProcessorSchedule`] for currencies without two decimal
    /// places.
    pub fn processor_fee(&self, processor: Processor) -> CoreResult<Money> {
        let currency = self.currency();
        if currency.decimals() != 2 {
            return Err(CoreError::NoProcessorSchedule { currency });
        }

        let schedule = processor.fee_schedule();
        let percent = self.percentage(schedule.percent_bps);
        Ok(Money::from_cents(
            percent.cents().saturating_add(schedule.fixed_minor),
            currency,
        ))
    }

    /// What the seller receives after the processor's cut.
    ///
    /// ## Errors
    /// Same as [`Money::processor_fee`].
    pub fn net_after_processor_fee(&self, processor: Processor) -> CoreResult<Money> {
        let fee = self.processor_fee(processor)?;
        self.try_sub(fee)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
