//! Static Exchange Rate Table with Macro-Based Currency Generation
//!
//! Every rate is expressed as units of the currency per one US dollar, so USD
//! is always `1.0`. Currencies are defined declaratively using a macro that
//! generates the `CurrencyCode` enum, its metadata lookups and the rate table
//! in one place. There is exactly one copy of the table in the program.
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     INR => ("INR", "₹", "Indian Rupee", "🇮🇳", 83.12),
//! }
//! ```
//!
//! # Example
//! ```
//! use exchange_rates::{CurrencyCode, convert, rate_of, unit_rate};
//!
//! assert_eq!(rate_of(CurrencyCode::USD), 1.0);
//!
//! // Two-hop conversion: BRL -> USD -> EUR
//! let euros = convert(54.5, CurrencyCode::BRL, CurrencyCode::EUR);
//! assert!((euros - 9.2).abs() < 1e-9);
//!
//! // Price of one BRL in USD
//! let rate = unit_rate(CurrencyCode::BRL, CurrencyCode::USD);
//! assert!((rate - 1.0 / 5.45).abs() < 1e-12);
//! ```

use std::collections::HashMap;

/// Reference currency every rate in the table is expressed against.
pub const REFERENCE_CURRENCY: CurrencyCode = CurrencyCode::USD;

/// Returned when text does not name a currency in the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid currency code: {0}")]
pub struct InvalidCurrencyCode(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines all currencies, CurrencyCode enum, and rate lookup
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define currencies with auto-generated enum, metadata and rates.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     NAME => ("CODE", "SYMBOL", "Display name", "FLAG", units_per_usd),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $label:literal, $flag:literal, $per_usd:expr)
        ),* $(,)?
    ) => {
        /// A currency from the closed set supported by the converter.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            /// ISO 4217 code.
            pub fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            /// Human-readable name, e.g. "Brazilian Real".
            pub fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $label),*
                }
            }

            pub fn flag(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $flag),*
                }
            }

            /// Units of this currency per one unit of the reference currency.
            pub fn units_per_usd(&self) -> f64 {
                match self {
                    $(CurrencyCode::$name => $per_usd),*
                }
            }

            /// Every supported currency, in declaration order.
            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = $crate::InvalidCurrencyCode;
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err($crate::InvalidCurrencyCode(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS - Add new currencies here!
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    USD => ("USD", "$", "US Dollar", "🇺🇸", 1.0),
    BRL => ("BRL", "R$", "Brazilian Real", "🇧🇷", 5.45),
    EUR => ("EUR", "€", "Euro", "🇪🇺", 0.92),
    GBP => ("GBP", "£", "British Pound", "🇬🇧", 0.79),
    JPY => ("JPY", "¥", "Japanese Yen", "🇯🇵", 153.72),
    CNY => ("CNY", "¥", "Chinese Yuan", "🇨🇳", 7.24),
    AUD => ("AUD", "A$", "Australian Dollar", "🇦🇺", 1.52),
    CAD => ("CAD", "C$", "Canadian Dollar", "🇨🇦", 1.37),
    CHF => ("CHF", "Fr", "Swiss Franc", "🇨🇭", 0.9),
    MXN => ("MXN", "$", "Mexican Peso", "🇲🇽", 16.82),
    AOA => ("AOA", "Kz", "Angolan Kwanza", "🇦🇴", 825.5),
    CDF => ("CDF", "FC", "Congolese Franc", "🇨🇩", 2650.0),
    ZAR => ("ZAR", "R", "South African Rand", "🇿🇦", 18.45),
    NAD => ("NAD", "N$", "Namibian Dollar", "🇳🇦", 18.4),
}

// ─────────────────────────────────────────────────────────────────────────────
// Rate Lookup & Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Rate of `code` relative to the reference currency.
///
/// Total over the closed set: every `CurrencyCode` has exactly one strictly
/// positive, finite entry.
pub fn rate_of(code: CurrencyCode) -> f64 {
    code.units_per_usd()
}

/// Units of `to` obtained for one unit of `from`.
pub fn unit_rate(from: CurrencyCode, to: CurrencyCode) -> f64 {
    if from == to {
        return 1.0;
    }
    rate_of(to) / rate_of(from)
}

/// Converts `amount` by hopping through the reference currency.
///
/// `from == to` returns `amount` unchanged.
pub fn convert(amount: f64, from: CurrencyCode, to: CurrencyCode) -> f64 {
    if from == to {
        return amount;
    }
    let usd_amount = amount / rate_of(from);
    usd_amount * rate_of(to)
}

/// Unit rate of every supported currency against `base`.
pub fn rates_from(base: CurrencyCode) -> HashMap<CurrencyCode, f64> {
    CurrencyCode::all()
        .iter()
        .map(|&c| (c, unit_rate(base, c)))
        .collect()
}

/// Zero-sized handle to the baked-in rate table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StaticRates;

impl StaticRates {
    pub fn rate_of(&self, code: CurrencyCode) -> f64 {
        rate_of(code)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
