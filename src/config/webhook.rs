//! Background notification processing configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::RetryPolicy;

/// Retry schedule and queue size for payment notifications.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookConfig {
    /// Total attempts per notification, the first one included
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Notifications that may wait for the worker before intake drops them
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

impl WebhookConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            backoff_multiplier: self.backoff_multiplier,
            max_delay: Duration::from_millis(self.max_delay_ms),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidRetryPolicy("max_attempts must be at least 1"));
        }
        if !self.backoff_multiplier.is_finite() || self.backoff_multiplier < 1.0 {
            return Err(ValidationError::InvalidRetryPolicy("backoff_multiplier must be >= 1.0"));
        }
        if self.max_delay_ms < self.initial_delay_ms {
            return Err(ValidationError::InvalidRetryPolicy("max_delay_ms is below initial_delay_ms"));
        }
        if self.queue_capacity == 0 {
            return Err(ValidationError::InvalidRetryPolicy("queue_capacity must be positive"));
        }
        Ok(())
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            max_delay_ms: default_max_delay_ms(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

fn default_max_attempts() -> u32 {
    5
}

fn default_initial_delay_ms() -> u64 {
    3_000
}

fn default_backoff_multiplier() -> f64 {
    1.5
}

fn default_max_delay_ms() -> u64 {
    15_000
}

fn default_queue_capacity() -> usize {
    1024
}
