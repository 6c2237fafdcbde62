//! Common error types

use thiserror::Error;

/// Common errors across Pulse
#[derive(Error, Debug)]
pub enum PulseError {
    /// Unknown plan identifier
    #[error("invalid plan: {0}")]
    InvalidPlan(String),
}

impl From<crate::PlanParseError> for PulseError {
    fn from(err: crate::PlanParseError) -> Self {
        Self::InvalidPlan(err.0)
    }
}
