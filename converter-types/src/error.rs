//! Error types for the currency converter.

pub use exchange_rates::InvalidCurrencyCode;

/// Errors raised by the asynchronous converter service.
///
/// Bad numeric input is never an error: it is normalized to zero.
#[derive(Debug, thiserror::Error)]
pub enum ConverterError {
    #[error("Converter service has stopped")]
    ServiceStopped,

    #[error(transparent)]
    InvalidCurrency(#[from] InvalidCurrencyCode),
}
