//! Port traits (interfaces for adapters).
//!
//! The engine depends on these traits, not on the concrete rate table.

mod rates;

pub use rates::RateProvider;
