//! Domain models for the currency converter.

pub mod amount;
pub mod request;
pub mod state;

pub use amount::normalize_amount;
pub use request::{ConversionRequest, RequestId};
pub use state::ConversionState;
