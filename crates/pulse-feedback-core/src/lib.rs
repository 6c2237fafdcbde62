//! Pulse Feedback Core - Timed feedback prompt lifecycle
//!
//! A feedback prompt asks the user a single yes/maybe/no question, hides
//! itself if nobody answers, and records at most one rating per opening.
//!
//! - [`PromptMachine`] is the lifecycle as a sans-IO state machine
//! - [`FeedbackPromptController`] drives it with tokio timers and calls the
//!   host's [`FeedbackHandler`]
//! - [`PromptConfig`] holds the entrance, auto-hide, acknowledgement and
//!   teardown delays

pub mod config;
pub mod controller;
pub mod error;
pub mod handler;
pub mod machine;
pub mod metrics;

pub use config::{ConfigError, PromptConfig};
pub use controller::FeedbackPromptController;
pub use error::FeedbackError;
pub use handler::{CallbackHandler, FeedbackHandler};
pub use machine::{
    Command, DismissReason, Presence, PromptMachine, PromptSnapshot, TimerKind, TimerToken,
};

// Re-export prompt types from pulse-types for convenience
pub use pulse_types::{PromptPhase, Rating};
