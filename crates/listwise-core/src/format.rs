//! # Locale Formatting
//!
//! Turns [`Money`] into display strings for the listing UI.
//!
//! ## Locale Conventions
//! ```text
//! ┌────────┬──────────┬─────────┬──────────────┬────────────────────────┐
//! │ Locale │ Grouping │ Decimal │ Symbol       │ Example (1234.56)      │
//! ├────────┼──────────┼─────────┼──────────────┼────────────────────────┤
//! │ en-US  │ ,        │ .       │ before       │ $1,234.56              │
//! │ en-GB  │ ,        │ .       │ before       │ £1,234.56              │
//! │ en-CA  │ ,        │ .       │ before       │ $1,234.56   (CAD)      │
//! │ en-AU  │ ,        │ .       │ before       │ $1,234.56   (AUD)      │
//! │ de-DE  │ .        │ ,       │ after, NBSP  │ 1.234,56 €             │
//! │ fr-FR  │ NNBSP    │ ,       │ after, NBSP  │ 1 234,56 €             │
//! │ ja-JP  │ ,        │ .       │ before       │ ¥1,235      (JPY)      │
//! └────────┴──────────┴─────────┴──────────────┴────────────────────────┘
//! ```
//!
//! Compact formatting shortens dashboard figures: `$1.2K`, `$3M`, `1,5K €`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::currency::Currency;
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::round_div;

/// No-break space, placed between amount and a trailing symbol.
const NBSP: char = '\u{a0}';

/// Narrow no-break space, French digit grouping.
const NNBSP: char = '\u{202f}';

/// A display locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Locale {
    #[default]
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "en-GB")]
    EnGb,
    #[serde(rename = "en-CA")]
    EnCa,
    #[serde(rename = "en-AU")]
    EnAu,
    #[serde(rename = "de-DE")]
    DeDe,
    #[serde(rename = "fr-FR")]
    FrFr,
    #[serde(rename = "ja-JP")]
    JaJp,
}

impl Locale {
    /// BCP 47 tag.
    pub const fn tag(&self) -> &'static str {
        match self {
            Locale::EnUs => "en-US",
            Locale::EnGb => "en-GB",
            Locale::EnCa => "en-CA",
            Locale::EnAu => "en-AU",
            Locale::DeDe => "de-DE",
            Locale::FrFr => "fr-FR",
            Locale::JaJp => "ja-JP",
        }
    }

    const fn group_separator(&self) -> char {
        match self {
            Locale::DeDe => '.',
            Locale::FrFr => NNBSP,
            _ => ',',
        }
    }

    const fn decimal_separator(&self) -> char {
        match self {
            Locale::DeDe | Locale::FrFr => ',',
            _ => '.',
        }
    }

    const fn symbol_after(&self) -> bool {
        matches!(self, Locale::DeDe | Locale::FrFr)
    }

    /// The symbol this locale shows for a currency. A locale's own dollar
    /// is a bare `$`.
    pub const fn symbol_for(&self, currency: Currency) -> &'static str {
        match (self, currency) {
            (Locale::EnCa, Currency::Cad) | (Locale::EnAu, Currency::Aud) => "$",
            _ => currency.symbol(),
        }
    }

    fn group(&self, digits: u64) -> String {
        let raw = digits.to_string();
        let sep = self.group_separator();
        let mut out = String::with_capacity(raw.len() + raw.len() / 3);
        for (i, ch) in raw.chars().enumerate() {
            if i > 0 && (raw.len() - i) % 3 == 0 {
                out.push(sep);
            }
            out.push(ch);
        }
        out
    }

    fn attach_symbol(&self, negative: bool, number: &str, currency: Currency) -> String {
        let sign = if negative { "-" } else { "" };
        let symbol = self.symbol_for(currency);
        if self.symbol_after() {
            format!("{sign}{number}{NBSP}{symbol}")
        } else {
            format!("{sign}{symbol}{number}")
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Locale {
    type Err = ValidationError;

    /// Accepts `en-US`, `en_us`, `EN-us` and so on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('_', "-").to_lowercase().as_str() {
            "en-us" => Ok(Locale::EnUs),
            "en-gb" => Ok(Locale::EnGb),
            "en-ca" => Ok(Locale::EnCa),
            "en-au" => Ok(Locale::EnAu),
            "de-de" => Ok(Locale::DeDe),
            "fr-fr" => Ok(Locale::FrFr),
            "ja-jp" => Ok(Locale::JaJp),
            _ => Err(ValidationError::InvalidFormat {
                field: "locale".to_string(),
                reason: format!("'{}' is not a supported locale", s),
            }),
        }
    }
}

/// Magnitude suffixes for compact formatting, largest first.
const COMPACT_UNITS: [(i64, &str); 3] = [
    (1_000_000_000, "B"),
    (1_000_000, "M"),
    (1_000, "K"),
];

impl Money {
    /// Formats for display in a locale.
    ///
    /// ## Example
    /// ```rust
    /// use listwise_core::currency::Currency;
    /// use listwise_core::format::Locale;
    /// use listwise_core::money::Money;
    ///
    /// let price = Money::from_cents(123_456, Currency::Usd);
    /// assert_eq!(price.format(Locale::EnUs), "$1,234.56");
    ///
    /// let euros = Money::from_cents(123_456, Currency::Eur);
    /// assert_eq!(euros.format(Locale::DeDe), "1.234,56\u{a0}€");
    /// ```
    pub fn format(&self, locale: Locale) -> String {
        let currency = self.currency();
        let abs = self.cents().unsigned_abs();
        let factor = currency.minor_per_major() as u64;

        let mut number = locale.group(abs / factor);
        if currency.decimals() > 0 {
            number.push(locale.decimal_separator());
            number.push_str(&format!(
                "{:0width$}",
                abs % factor,
                width = currency.decimals() as usize
            ));
        }

        locale.attach_symbol(self.is_negative(), &number, currency)
    }

    /// Formats with an abbreviated magnitude for dashboards.
    ///
    /// Below 1,000 major units the amount is shown in full (whole units when
    /// there is no fraction). From 1,000 up, one decimal and a `K`/`M`/`B`
    /// suffix, with a trailing `.0` dropped.
    ///
    /// ## Example
    /// ```rust
    /// use listwise_core::currency::Currency;
    /// use listwise_core::format::Locale;
    /// use listwise_core::money::Money;
    ///
    /// let usd = |cents| Money::from_cents(cents, Currency::Usd);
    /// assert_eq!(usd(123_456).format_compact(Locale::EnUs), "$1.2K");
    /// assert_eq!(usd(300_000_000).format_compact(Locale::EnUs), "$3M");
    /// assert_eq!(usd(4_200).format_compact(Locale::EnUs), "$42");
    /// ```
    pub fn format_compact(&self, locale: Locale) -> String {
        let currency = self.currency();
        let abs = self.cents().unsigned_abs() as i128;
        let factor = currency.minor_per_major() as i128;

        let tenths_of = |index: usize| round_div(abs * 10, factor * COMPACT_UNITS[index].0 as i128);

        let unit = COMPACT_UNITS
            .iter()
            .position(|(divisor, _)| abs >= factor * *divisor as i128);

        if let Some(mut index) = unit {
            let mut tenths = tenths_of(index);
            // 999,960 would read "1000K"; promote to the next unit.
            if tenths >= 10_000 && index > 0 {
                index -= 1;
                tenths = tenths_of(index);
            }
            let suffix = COMPACT_UNITS[index].1;
            let whole = locale.group((tenths / 10) as u64);
            let number = match tenths % 10 {
                0 => format!("{whole}{suffix}"),
                frac => format!("{whole}{}{frac}{suffix}", locale.decimal_separator()),
            };
            return locale.attach_symbol(self.is_negative(), &number, currency);
        }

        if abs % factor == 0 {
            let number = locale.group((abs / factor) as u64);
            return locale.attach_symbol(self.is_negative(), &number, currency);
        }

        self.format(locale)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
