//! Feedback controller errors

use thiserror::Error;

use crate::config::ConfigError;

/// Errors creating a feedback prompt controller
#[derive(Error, Debug)]
pub enum FeedbackError {
    /// The controller was created outside a tokio runtime
    #[error("no tokio runtime available for prompt timers")]
    NoRuntime,

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}
