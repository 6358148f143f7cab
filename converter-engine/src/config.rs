//! Engine configuration.

use std::time::Duration;

/// Simulated round-trip used when nothing else is configured.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(600);

/// Tunables for the converter service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    /// Delay between issuing a request and delivering its result.
    pub latency: Duration,
    /// Capacity of the command channel.
    pub command_buffer: usize,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            latency: DEFAULT_LATENCY,
            command_buffer: 32,
        }
    }
}

impl ConverterConfig {
    /// Returns a copy with a different simulated latency.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}
