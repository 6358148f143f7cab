//! Conversion request domain model.

use serde::{Deserialize, Serialize};

use crate::{CurrencyCode, RateProvider};

/// Monotonic token identifying an issued conversion request.
///
/// `RequestId::default()` (zero) means no request has been issued yet.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    /// Creates a RequestId from a raw value.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }

    /// Returns the id that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The three inputs that determine a conversion, tagged with the id they were
/// issued under.
///
/// Requests are never updated in place. A newer input produces a new request
/// and older ones become stale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub id: RequestId,
    /// Normalized, non-negative amount in `source` units
    pub amount: f64,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
}

impl ConversionRequest {
    /// Computes the converted value this request would deliver.
    pub fn candidate<R: RateProvider + ?Sized>(&self, rates: &R) -> f64 {
        rates.convert(self.amount, self.source, self.target)
    }
}
