//! # Window Configuration
//!
//! Configuration for the sliding window and for reporting its readings

use crate::math::MAX_DECIMALS;
use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Errors in user-supplied configuration
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Window duration must be positive, got {0} seconds")]
    NonPositiveWindow(i64),

    #[error("Window duration out of range: {0} seconds")]
    WindowOutOfRange(u64),

    #[error("Decimals must be at most {max}, got {0}", max = MAX_DECIMALS)]
    DecimalsOutOfRange(u32),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashflowConfig {
    /// Sliding window configuration
    pub window: WindowConfig,

    /// Output configuration
    pub output: OutputConfig,
}

/// Sliding window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window length in seconds of event time
    pub window_seconds: u64,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Digits kept after the decimal point (truncated, not rounded)
    pub decimals: u32,
}

impl HashflowConfig {
    /// Check every section, reporting the first invalid value
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.duration()?;
        self.output.validated_decimals()?;
        Ok(())
    }
}

impl WindowConfig {
    pub fn new(window_seconds: u64) -> Self {
        Self { window_seconds }
    }

    /// Validated window length
    pub fn duration(&self) -> Result<Duration, ConfigError> {
        let seconds = i64::try_from(self.window_seconds)
            .map_err(|_| ConfigError::WindowOutOfRange(self.window_seconds))?;
        let duration = Duration::try_seconds(seconds)
            .ok_or(ConfigError::WindowOutOfRange(self.window_seconds))?;
        validate_window(duration)
    }
}

impl OutputConfig {
    pub fn new(decimals: u32) -> Self {
        Self { decimals }
    }

    /// Decimals, if representable
    pub fn validated_decimals(&self) -> Result<u32, ConfigError> {
        if self.decimals > MAX_DECIMALS {
            return Err(ConfigError::DecimalsOutOfRange(self.decimals));
        }
        Ok(self.decimals)
    }
}

/// Reject zero and negative window lengths
pub fn validate_window(duration: Duration) -> Result<Duration, ConfigError> {
    if duration <= Duration::zero() {
        return Err(ConfigError::NonPositiveWindow(duration.num_seconds()));
    }
    Ok(duration)
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { window_seconds: 60 }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}
