//! Conversion State Machine
//!
//! Owns the conversion state and the rules for turning user input into
//! conversion requests. Contains NO timers - scheduling the delivery of a
//! `PendingConversion` is the caller's job (see `service`).

use converter_types::{
    ConversionRequest, ConversionSnapshot, ConversionState, CurrencyCode, RateProvider, RequestId,
};
use tracing::debug;

/// A user input that changes what should be converted.
#[derive(Debug, Clone, PartialEq)]
pub enum ConverterInput {
    Amount(f64),
    /// Raw text from an amount field
    AmountText(String),
    Source(CurrencyCode),
    Target(CurrencyCode),
    Swap,
    /// Re-issue a request for the current inputs
    Refresh,
}

/// An issued request together with the value it will deliver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingConversion {
    pub request: ConversionRequest,
    pub candidate: f64,
}

impl PendingConversion {
    pub fn id(&self) -> RequestId {
        self.request.id
    }
}

/// What happened when a pending conversion was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The candidate became the displayed result.
    Applied,
    /// A newer request had been issued; the candidate was discarded.
    Stale,
}

/// Conversion engine.
///
/// Generic over `R: RateProvider` - the rate table is injected at compile time.
/// Every setter issues a fresh request and returns it; the caller delivers it
/// back through [`ConversionEngine::complete`] once the simulated latency
/// has elapsed. Only the latest request can change the result.
pub struct ConversionEngine<R: RateProvider> {
    rates: R,
    state: ConversionState,
}

impl<R: RateProvider> ConversionEngine<R> {
    /// Creates an engine with the default state (1 USD -> BRL).
    pub fn new(rates: R) -> Self {
        Self::with_state(rates, ConversionState::default())
    }

    pub fn with_state(rates: R, state: ConversionState) -> Self {
        Self { rates, state }
    }

    pub fn rates(&self) -> &R {
        &self.rates
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    pub fn snapshot(&self) -> ConversionSnapshot {
        ConversionSnapshot::capture(&self.state, &self.rates)
    }

    /// Units of target per unit of source.
    ///
    /// Derived synchronously from the current currencies. Independent of the
    /// amount and of any request in flight.
    pub fn unit_rate(&self) -> f64 {
        self.rates.unit_rate(self.state.source(), self.state.target())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Input Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Sets the amount. Non-finite or negative values become zero.
    pub fn set_amount(&mut self, value: f64) -> PendingConversion {
        if !(value.is_finite() && value >= 0.0) {
            debug!(value, "normalizing invalid amount to zero");
        }
        self.state.set_amount(value);
        self.recompute()
    }

    /// Sets the amount from raw text. Unparseable text becomes zero.
    pub fn set_amount_input(&mut self, text: &str) -> PendingConversion {
        match text.trim().parse::<f64>() {
            Ok(value) => self.set_amount(value),
            Err(_) => {
                debug!(input = text, "normalizing malformed amount to zero");
                self.set_amount(0.0)
            }
        }
    }

    pub fn set_source_currency(&mut self, code: CurrencyCode) -> PendingConversion {
        self.state.set_source(code);
        self.recompute()
    }

    pub fn set_target_currency(&mut self, code: CurrencyCode) -> PendingConversion {
        self.state.set_target(code);
        self.recompute()
    }

    /// Exchanges source and target, then recomputes.
    pub fn swap(&mut self) -> PendingConversion {
        self.state.swap_currencies();
        self.recompute()
    }

    /// Issues a request for the unchanged inputs.
    pub fn refresh(&mut self) -> PendingConversion {
        self.recompute()
    }

    /// Dispatches a [`ConverterInput`] to the matching operation.
    pub fn apply(&mut self, input: ConverterInput) -> PendingConversion {
        match input {
            ConverterInput::Amount(value) => self.set_amount(value),
            ConverterInput::AmountText(text) => self.set_amount_input(&text),
            ConverterInput::Source(code) => self.set_source_currency(code),
            ConverterInput::Target(code) => self.set_target_currency(code),
            ConverterInput::Swap => self.swap(),
            ConverterInput::Refresh => self.refresh(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Recomputation
    // ─────────────────────────────────────────────────────────────────────────────

    fn recompute(&mut self) -> PendingConversion {
        let request = self.state.issue();
        let candidate = request.candidate(&self.rates);
        debug!(
            request = %request.id,
            amount = request.amount,
            source = %request.source,
            target = %request.target,
            candidate,
            "issued conversion request"
        );
        PendingConversion { request, candidate }
    }

    /// Delivers a previously issued conversion.
    ///
    /// Only the most recently issued request may write the result; anything
    /// older is dropped without touching the state.
    pub fn complete(&mut self, pending: &PendingConversion) -> Completion {
        if self.state.accept(pending.id(), pending.candidate) {
            debug!(request = %pending.id(), result = pending.candidate, "applied conversion");
            Completion::Applied
        } else {
            debug!(
                request = %pending.id(),
                latest = %self.state.latest_request_id(),
                "discarded stale conversion"
            );
            Completion::Stale
        }
    }
}
