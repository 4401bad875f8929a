use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("min_duration must be positive, got {0}")]
    NonPositiveMinDuration(i64),
    #[error("min_duration {min} exceeds max_duration {max}")]
    InvertedDurationRange { min: i64, max: i64 },
    #[error("step must be positive, got {0}")]
    NonPositiveStep(i64),
    #[error("initial_duration {value} outside [{min}, {max}]")]
    InitialDurationOutOfRange { value: i64, min: i64, max: i64 },
    #[error("initial_time {value} outside [0, {duration}]")]
    InitialTimeOutOfRange { value: i64, duration: i64 },
    #[error("viewport_width must be positive, got {0}")]
    NonPositiveViewport(i64),
    #[error("drag_idle_timeout_ms must be positive, got {0}")]
    NonPositiveIdleTimeout(f64),
}

/// Tunables for one timeline instance.
///
/// Every field has a default matching the reference widget, so an empty JSON
/// object (`{}`) is a valid configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Lower bound for `duration` in ms.
    pub min_duration: i64,
    /// Upper bound for `duration` in ms.
    pub max_duration: i64,
    pub initial_duration: i64,
    pub initial_time: i64,
    /// Quantization step for time, duration and ruler offsets.
    pub step: i64,
    /// Width of the visible ruler viewport assumed until the view layer
    /// reports real geometry.
    pub viewport_width: i64,
    /// End a drag implicitly after this many ms without pointer movement.
    /// `None` keeps pointer-up as the only end condition.
    pub drag_idle_timeout_ms: Option<f64>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            min_duration: 100,
            max_duration: 6000,
            initial_duration: 2000,
            initial_time: 0,
            step: 10,
            viewport_width: 800,
            drag_idle_timeout_ms: None,
        }
    }
}

impl TimelineConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_duration <= 0 {
            return Err(ConfigError::NonPositiveMinDuration(self.min_duration));
        }
        if self.min_duration > self.max_duration {
            return Err(ConfigError::InvertedDurationRange {
                min: self.min_duration,
                max: self.max_duration,
            });
        }
        if self.step <= 0 {
            return Err(ConfigError::NonPositiveStep(self.step));
        }
        if !(self.min_duration..=self.max_duration).contains(&self.initial_duration) {
            return Err(ConfigError::InitialDurationOutOfRange {
                value: self.initial_duration,
                min: self.min_duration,
                max: self.max_duration,
            });
        }
        if !(0..=self.initial_duration).contains(&self.initial_time) {
            return Err(ConfigError::InitialTimeOutOfRange {
                value: self.initial_time,
                duration: self.initial_duration,
            });
        }
        if self.viewport_width <= 0 {
            return Err(ConfigError::NonPositiveViewport(self.viewport_width));
        }
        if let Some(timeout) = self.drag_idle_timeout_ms
            && timeout <= 0.0
        {
            return Err(ConfigError::NonPositiveIdleTimeout(timeout));
        }
        Ok(())
    }
}
