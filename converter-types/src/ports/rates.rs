//! Exchange rate provider port.

use exchange_rates::StaticRates;

use crate::CurrencyCode;

/// Source of rates relative to a single reference currency.
///
/// `rate_of` must be total over `CurrencyCode` and return strictly positive,
/// finite values.
pub trait RateProvider: Send + Sync {
    /// Units of `code` per one unit of the reference currency.
    fn rate_of(&self, code: CurrencyCode) -> f64;

    /// Units of `to` you get for one unit of `from`.
    fn unit_rate(&self, from: CurrencyCode, to: CurrencyCode) -> f64 {
        if from == to {
            return 1.0;
        }
        self.rate_of(to) / self.rate_of(from)
    }

    /// Converts via the reference currency: `source -> reference -> target`.
    fn convert(&self, amount: f64, from: CurrencyCode, to: CurrencyCode) -> f64 {
        if from == to {
            return amount;
        }
        let reference_amount = amount / self.rate_of(from);
        reference_amount * self.rate_of(to)
    }
}

impl RateProvider for StaticRates {
    fn rate_of(&self, code: CurrencyCode) -> f64 {
        exchange_rates::rate_of(code)
    }
}

impl<R: RateProvider + ?Sized> RateProvider for std::sync::Arc<R> {
    fn rate_of(&self, code: CurrencyCode) -> f64 {
        (**self).rate_of(code)
    }
}
