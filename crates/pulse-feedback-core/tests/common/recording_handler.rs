//! Feedback handlers that record what the controller told them

use std::sync::{Arc, Mutex};

use pulse_feedback_core::{FeedbackHandler, Rating};
use tokio::time::Instant;

/// A callback received by a test handler
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerEvent {
    Submit(Rating),
    Dismiss,
}

/// Handler that records every callback with the (paused) clock time
#[derive(Debug, Clone, Default)]
pub struct RecordingHandler {
    events: Arc<Mutex<Vec<(Instant, HandlerEvent)>>>,
}

#[allow(dead_code)]
impl RecordingHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded callbacks in order
    pub fn events(&self) -> Vec<HandlerEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(_, event)| *event)
            .collect()
    }

    /// Recorded callbacks with the instant each arrived
    pub fn timed_events(&self) -> Vec<(Instant, HandlerEvent)> {
        self.events.lock().unwrap().clone()
    }

    pub fn submit_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, HandlerEvent::Submit(_)))
            .count()
    }

    pub fn dismiss_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, HandlerEvent::Dismiss))
            .count()
    }

    fn push(&self, event: HandlerEvent) {
        self.events.lock().unwrap().push((Instant::now(), event));
    }
}

impl FeedbackHandler for RecordingHandler {
    fn on_submit(&self, rating: Rating) {
        self.push(HandlerEvent::Submit(rating));
    }

    fn on_dismiss(&self) {
        self.push(HandlerEvent::Dismiss);
    }
}

/// Handler whose submit callback panics after recording
#[derive(Debug, Clone, Default)]
pub struct PanickingHandler {
    pub inner: RecordingHandler,
}

impl FeedbackHandler for PanickingHandler {
    fn on_submit(&self, rating: Rating) {
        self.inner.on_submit(rating);
        panic!("host view failed to handle rating {rating}");
    }

    fn on_dismiss(&self) {
        self.inner.on_dismiss();
    }
}
