//! `pulse prompt`: run one feedback prompt lifecycle

use std::time::Duration;

use anyhow::Context;
use pulse_feedback_core::{
    FeedbackHandler, FeedbackPromptController, PromptConfig, PromptPhase, Rating,
};
use serde::Serialize;
use tokio::sync::mpsc;

/// What to do once the prompt is visible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Submit a rating
    Rate(Rating),
    /// Close the prompt manually
    Dismiss,
    /// Let the auto-hide timer close the prompt
    Wait,
}

/// Host callback as printed to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PromptEvent {
    Submit { rating: Rating, elapsed_ms: u64 },
    Dismiss { elapsed_ms: u64 },
}

/// Handler that forwards callbacks over a channel
struct ChannelHandler {
    started: tokio::time::Instant,
    events: mpsc::UnboundedSender<PromptEvent>,
}

impl ChannelHandler {
    fn elapsed_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

impl FeedbackHandler for ChannelHandler {
    fn on_submit(&self, rating: Rating) {
        let elapsed_ms = self.elapsed_ms();
        // Receiver outlives the controller; a closed channel only means we're shutting down
        let _ = self.events.send(PromptEvent::Submit { rating, elapsed_ms });
    }

    fn on_dismiss(&self) {
        let elapsed_ms = self.elapsed_ms();
        let _ = self.events.send(PromptEvent::Dismiss { elapsed_ms });
    }
}

/// Open a prompt, apply `action` after `delay` past the entrance, and
/// collect callbacks until the prompt dismisses itself.
pub async fn run(config: PromptConfig, action: Action, delay: Duration) -> anyhow::Result<Vec<PromptEvent>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let handler = ChannelHandler {
        started: tokio::time::Instant::now(),
        events: tx,
    };
    let prompt = FeedbackPromptController::new(config, handler)
        .context("failed to create feedback prompt")?;

    tracing::info!(?action, ?config, "Opening feedback prompt");
    prompt.set_open(true);

    wait_until_shown(&prompt, config.entrance_delay).await;
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    tracing::debug!(phase = ?prompt.phase(), "Applying prompt action");
    match action {
        Action::Rate(rating) => prompt.submit_rating(rating),
        Action::Dismiss => prompt.dismiss(),
        Action::Wait => {}
    }

    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
        if matches!(event, PromptEvent::Dismiss { .. }) {
            break;
        }
    }

    prompt.set_open(false);
    Ok(events)
}

/// Wait for the entrance timer to run.
///
/// The entrance timer is due at the same instant the sleep ends, so yield
/// until its task has had a chance to move the prompt out of `Entering`.
async fn wait_until_shown(prompt: &FeedbackPromptController, entrance_delay: Duration) {
    tokio::time::sleep(entrance_delay).await;
    while prompt.phase() == PromptPhase::Entering {
        tokio::task::yield_now().await;
    }
}
