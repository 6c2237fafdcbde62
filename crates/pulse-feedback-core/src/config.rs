//! Feedback prompt configuration

use std::time::Duration;

/// Environment variable for the entrance delay in milliseconds
pub const ENV_ENTRANCE_DELAY_MS: &str = "FEEDBACK_ENTRANCE_DELAY_MS";
/// Environment variable for the auto-hide delay in milliseconds
pub const ENV_AUTO_HIDE_MS: &str = "FEEDBACK_AUTO_HIDE_MS";
/// Environment variable for the acknowledgement delay in milliseconds
pub const ENV_ACK_DELAY_MS: &str = "FEEDBACK_ACK_DELAY_MS";
/// Environment variable for the teardown delay in milliseconds
pub const ENV_TEARDOWN_DELAY_MS: &str = "FEEDBACK_TEARDOWN_DELAY_MS";

/// Timing configuration for a feedback prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptConfig {
    /// Delay between opening and becoming visible.
    /// Default: 100 ms. Zero shows the prompt immediately.
    pub entrance_delay: Duration,

    /// How long an unanswered prompt stays open, measured from opening.
    /// Default: 20 seconds. Must be positive.
    pub auto_hide: Duration,

    /// How long the acknowledgement stays up after a rating.
    /// Default: 1.5 seconds
    pub acknowledge_delay: Duration,

    /// Grace period between hiding and notifying the host.
    /// Default: 200 ms
    pub teardown_delay: Duration,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            entrance_delay: Duration::from_millis(100),
            auto_hide: Duration::from_millis(20_000),
            acknowledge_delay: Duration::from_millis(1_500),
            teardown_delay: Duration::from_millis(200),
        }
    }
}

impl PromptConfig {
    /// Create a new prompt config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entrance delay.
    #[must_use]
    pub fn with_entrance_delay(mut self, delay: Duration) -> Self {
        self.entrance_delay = delay;
        self
    }

    /// Set the auto-hide delay.
    #[must_use]
    pub fn with_auto_hide(mut self, delay: Duration) -> Self {
        self.auto_hide = delay;
        self
    }

    /// Set the auto-hide delay in milliseconds.
    #[must_use]
    pub fn with_auto_hide_ms(self, millis: u64) -> Self {
        self.with_auto_hide(Duration::from_millis(millis))
    }

    /// Set the acknowledgement delay.
    #[must_use]
    pub fn with_acknowledge_delay(mut self, delay: Duration) -> Self {
        self.acknowledge_delay = delay;
        self
    }

    /// Set the teardown delay.
    #[must_use]
    pub fn with_teardown_delay(mut self, delay: Duration) -> Self {
        self.teardown_delay = delay;
        self
    }

    /// Check that the configuration can drive a prompt
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auto_hide.is_zero() {
            return Err(ConfigError::NonPositive(ENV_AUTO_HIDE_MS));
        }
        Ok(())
    }

    /// Load configuration from environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let read_ms = |key: &'static str, default: Duration| -> Result<Duration, ConfigError> {
            match lookup(key) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map(Duration::from_millis)
                    .map_err(|_| ConfigError::Invalid(key)),
                None => Ok(default),
            }
        };

        let config = Self {
            entrance_delay: read_ms(ENV_ENTRANCE_DELAY_MS, defaults.entrance_delay)?,
            auto_hide: read_ms(ENV_AUTO_HIDE_MS, defaults.auto_hide)?,
            acknowledge_delay: read_ms(ENV_ACK_DELAY_MS, defaults.acknowledge_delay)?,
            teardown_delay: read_ms(ENV_TEARDOWN_DELAY_MS, defaults.teardown_delay)?,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Configuration error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),

    #[error("Value must be positive: {0}")]
    NonPositive(&'static str),
}
