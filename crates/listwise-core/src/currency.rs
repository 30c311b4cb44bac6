//! # Currencies
//!
//! The ISO 4217 currencies the listing tool sells in, and the facts about
//! each that money math and formatting depend on.
//!
//! ```text
//! ┌──────┬──────────┬────────┬──────────────────┐
//! │ Code │ Decimals │ Symbol │ Minor per major  │
//! ├──────┼──────────┼────────┼──────────────────┤
//! │ USD  │ 2        │ $      │ 100              │
//! │ EUR  │ 2        │ €      │ 100              │
//! │ GBP  │ 2        │ £      │ 100              │
//! │ CAD  │ 2        │ CA$    │ 100              │
//! │ AUD  │ 2        │ A$     │ 100              │
//! │ JPY  │ 0        │ ¥      │ 1                │
//! └──────┴──────────┴────────┴──────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// A supported currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Usd,
    Eur,
    Gbp,
    Cad,
    Aud,
    /// Yen has no minor unit.
    Jpy,
}

impl Currency {
    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Cad => "CAD",
            Currency::Aud => "AUD",
            Currency::Jpy => "JPY",
        }
    }

    /// Digits after the decimal point.
    pub const fn decimals(&self) -> u32 {
        match self {
            Currency::Jpy => 0,
            _ => 2,
        }
    }

    /// Minor units in one major unit (100 cents per dollar, 1 for yen).
    pub const fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimals())
    }

    /// Unambiguous international symbol.
    ///
    /// Locales whose home currency this is may drop the prefix
    /// (see `format::Locale::symbol_for`).
    pub const fn symbol(&self) -> &'static str {
        match self {
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
            Currency::Cad => "CA$",
            Currency::Aud => "A$",
            Currency::Jpy => "¥",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "CAD" => Ok(Currency::Cad),
            "AUD" => Ok(Currency::Aud),
            "JPY" => Ok(Currency::Jpy),
            other => Err(CoreError::UnknownCurrency(other.to_string())),
        }
    }
}
