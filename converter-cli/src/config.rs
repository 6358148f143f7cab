//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use converter_engine::ConverterConfig;
use converter_engine::config::DEFAULT_LATENCY;

/// Application configuration.
pub struct Config {
    pub latency: Duration,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let latency = match env::var("CONVERTER_LATENCY_MS") {
            Ok(raw) => {
                let ms: u64 = raw.trim().parse().map_err(|_| {
                    anyhow::anyhow!("CONVERTER_LATENCY_MS must be whole milliseconds, got {:?}", raw)
                })?;
                Duration::from_millis(ms)
            }
            Err(_) => DEFAULT_LATENCY,
        };

        Ok(Self { latency })
    }

    /// Applies a command-line override on top of the environment.
    pub fn with_latency_override(mut self, latency_ms: Option<u64>) -> Self {
        if let Some(ms) = latency_ms {
            self.latency = Duration::from_millis(ms);
        }
        self
    }

    pub fn converter_config(&self) -> ConverterConfig {
        ConverterConfig::default().with_latency(self.latency)
    }
}
