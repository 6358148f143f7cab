//! Plain-text rendering of converter snapshots.

use converter_types::{ConversionSnapshot, CurrencyCode};

/// Formats `value` with the currency symbol and two decimals, e.g. `R$5.45`.
pub fn format_money(value: f64, code: CurrencyCode) -> String {
    format!("{}{:.2}", code.symbol(), value)
}

/// Formats the unit rate line, e.g. `1 USD = 5.4500 BRL`.
pub fn format_rate(from: CurrencyCode, to: CurrencyCode, rate: f64) -> String {
    format!("1 {} = {:.4} {}", from, rate, to)
}

/// Two-line view: the conversion and the unit rate.
pub fn render_snapshot(snapshot: &ConversionSnapshot) -> String {
    let result = if snapshot.pending {
        "...".to_string()
    } else {
        format_money(snapshot.result, snapshot.target)
    };
    format!(
        "{} = {}\n{}",
        format_money(snapshot.amount, snapshot.source),
        result,
        format_rate(snapshot.source, snapshot.target, snapshot.unit_rate)
    )
}

/// One line per currency: code, symbol, name and flag.
pub fn render_currency(code: CurrencyCode) -> String {
    format!("{} {:<4} {:<3} {}", code.flag(), code.code(), code.symbol(), code.name())
}
