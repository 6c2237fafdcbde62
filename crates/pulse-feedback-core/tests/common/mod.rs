//! Common test utilities for pulse-feedback-core integration tests

pub mod recording_handler;

#[allow(unused_imports)]
pub use recording_handler::{HandlerEvent, PanickingHandler, RecordingHandler};
