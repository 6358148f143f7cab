//! Data Transfer Objects handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::domain::{ConversionState, RequestId};
use crate::{CurrencyCode, RateProvider};

/// Read-only view of everything a front-end renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionSnapshot {
    /// Amount in `source` units
    pub amount: f64,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
    /// Last delivered result in `target` units
    pub result: f64,
    /// Drives the loading indicator
    pub pending: bool,
    /// Units of `target` per one unit of `source`
    pub unit_rate: f64,
    pub request_id: RequestId,
}

impl ConversionSnapshot {
    /// Captures `state`, computing the instantaneous rate from `rates`.
    pub fn capture<R: RateProvider + ?Sized>(state: &ConversionState, rates: &R) -> Self {
        Self {
            amount: state.amount(),
            source: state.source(),
            target: state.target(),
            result: state.result(),
            pending: state.is_pending(),
            unit_rate: rates.unit_rate(state.source(), state.target()),
            request_id: state.latest_request_id(),
        }
    }
}

impl Default for ConversionSnapshot {
    fn default() -> Self {
        Self::capture(&ConversionState::default(), &crate::StaticRates)
    }
}
