//! # Converter Types
//!
//! Domain types and port traits for the currency converter.
//! This crate has ZERO runtime dependencies - only data structures,
//! normalization rules, and trait definitions.
//!
//! ## Architecture
//!
//! - `domain/` - Pure domain types (ConversionRequest, ConversionState)
//! - `ports/` - Trait definitions that rate sources must implement
//! - `dto/` - Read-only snapshot handed to the presentation layer
//! - `error/` - Error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{ConversionRequest, ConversionState, RequestId, normalize_amount};
pub use dto::ConversionSnapshot;
pub use error::{ConverterError, InvalidCurrencyCode};
pub use exchange_rates::{CurrencyCode, StaticRates};
pub use ports::RateProvider;
