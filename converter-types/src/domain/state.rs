//! Mutable conversion state and its transition rules.

use serde::{Deserialize, Serialize};

use super::amount::normalize_amount;
use super::request::{ConversionRequest, RequestId};
use crate::CurrencyCode;

/// State owned by a single conversion engine.
///
/// Field writes go through the methods below so that `pending` and
/// `latest_request_id` stay consistent with each other.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionState {
    amount: f64,
    source: CurrencyCode,
    target: CurrencyCode,
    result: f64,
    pending: bool,
    latest_request_id: RequestId,
}

impl Default for ConversionState {
    fn default() -> Self {
        Self {
            amount: 1.0,
            source: CurrencyCode::USD,
            target: CurrencyCode::BRL,
            result: 0.0,
            pending: false,
            latest_request_id: RequestId::default(),
        }
    }
}

impl ConversionState {
    /// Creates a state with custom inputs and no result yet.
    pub fn new(amount: f64, source: CurrencyCode, target: CurrencyCode) -> Self {
        Self {
            amount: normalize_amount(amount),
            source,
            target,
            ..Self::default()
        }
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn source(&self) -> CurrencyCode {
        self.source
    }

    pub fn target(&self) -> CurrencyCode {
        self.target
    }

    /// Last delivered result.
    pub fn result(&self) -> f64 {
        self.result
    }

    /// True while the latest request has not been delivered.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn latest_request_id(&self) -> RequestId {
        self.latest_request_id
    }

    /// Stores a normalized amount.
    pub fn set_amount(&mut self, value: f64) {
        self.amount = normalize_amount(value);
    }

    pub fn set_source(&mut self, code: CurrencyCode) {
        self.source = code;
    }

    pub fn set_target(&mut self, code: CurrencyCode) {
        self.target = code;
    }

    /// Exchanges source and target in one step.
    pub fn swap_currencies(&mut self) {
        std::mem::swap(&mut self.source, &mut self.target);
    }

    /// Issues a request for the current inputs, superseding every earlier one.
    pub fn issue(&mut self) -> ConversionRequest {
        self.latest_request_id = self.latest_request_id.next();
        self.pending = true;
        ConversionRequest {
            id: self.latest_request_id,
            amount: self.amount,
            source: self.source,
            target: self.target,
        }
    }

    /// Applies a delivered candidate if `id` is still the latest request.
    ///
    /// Returns `false` and leaves the state untouched for stale ids.
    pub fn accept(&mut self, id: RequestId, candidate: f64) -> bool {
        if id != self.latest_request_id {
            return false;
        }
        self.result = candidate;
        self.pending = false;
        true
    }
}
