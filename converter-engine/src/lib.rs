//! # Converter Engine
//!
//! The conversion state machine and the service that drives it.
//!
//! ## Architecture
//!
//! - `engine` - Synchronous state machine (validation, request issue, stale rejection)
//! - `service` - Tokio task that owns the engine and delivers results after
//!   the simulated latency
//! - `config` - Tunables such as the simulated latency
//!
//! The engine is generic over `R: RateProvider`, allowing
//! different rate tables to be injected.

pub mod config;
pub mod engine;
pub mod service;

#[cfg(test)]
mod engine_tests;

pub use config::ConverterConfig;
pub use engine::{Completion, ConversionEngine, ConverterInput, PendingConversion};
pub use service::{ConverterHandle, ConverterService};
