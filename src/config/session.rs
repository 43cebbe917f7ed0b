//! Session lifecycle configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Session retention and auto-save tuning
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Days an untouched session survives. Re-armed on every save.
    #[serde(default = "default_retention_days")]
    pub retention_days: u64,

    /// Quiet period after the last mutation before a save fires.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

impl SessionConfig {
    /// Retention as a Duration
    pub fn retention(&self) -> Duration {
        Duration::from_secs(self.retention_days * 24 * 60 * 60)
    }

    /// Debounce window as a Duration
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Validate session configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.retention_days == 0 {
            return Err(ValidationError::RetentionTooShort);
        }
        if self.debounce_ms == 0 {
            return Err(ValidationError::InvalidDebounce);
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            debounce_ms: default_debounce_ms(),
        }
    }
}

fn default_retention_days() -> u64 {
    30
}

fn default_debounce_ms() -> u64 {
    2000
}
