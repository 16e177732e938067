use crate::{ConfigError, ConfigErrorResult, DEFAULT_ACQUIRE_TIMEOUT_MS};

use std::time::Duration;

use serde::Deserialize;

/// Longest configurable wait for the store gate (one hour).
pub const MAX_ACQUIRE_TIMEOUT_MS: u64 = 60 * 60 * 1000;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Milliseconds to wait for the store gate. 0 waits forever.
    pub acquire_timeout_ms: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            acquire_timeout_ms: DEFAULT_ACQUIRE_TIMEOUT_MS,
        }
    }
}

impl GateConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.acquire_timeout_ms > MAX_ACQUIRE_TIMEOUT_MS {
            return Err(ConfigError::gate(format!(
                "gate.acquire_timeout_ms must be 0-{}, got {}",
                MAX_ACQUIRE_TIMEOUT_MS, self.acquire_timeout_ms
            )));
        }
        Ok(())
    }

    pub fn acquire_timeout(&self) -> Option<Duration> {
        match self.acquire_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }
}
