//! Tokio driver for the feedback prompt state machine
//!
//! Each armed timer is a spawned task that sleeps and then reports its
//! [`TimerToken`] back to the machine. Tasks only hold a weak reference to
//! the controller, and every timer of a lifecycle instance is aborted when
//! the instance is superseded, closed or the controller is dropped.
//!
//! Timer bookkeeping always completes under the state lock before any host
//! callback runs, and callbacks run with the lock released, so a panicking
//! or re-entrant handler cannot leave timers behind.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use pulse_types::{PromptPhase, Rating};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::PromptConfig;
use crate::error::FeedbackError;
use crate::handler::FeedbackHandler;
use crate::machine::{Command, PromptMachine, PromptSnapshot, TimerKind, TimerToken};

/// Feedback prompt controller.
///
/// Drives a [`PromptMachine`] with tokio timers and forwards its
/// notifications to a [`FeedbackHandler`]. Must be created inside a tokio
/// runtime; a current-thread runtime is sufficient.
///
/// # Example
///
/// ```no_run
/// use pulse_feedback_core::{
///     CallbackHandler, FeedbackError, FeedbackPromptController, PromptConfig, Rating,
/// };
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), FeedbackError> {
///     let handler = CallbackHandler::new(
///         |rating| println!("rated {rating}"),
///         || println!("closed"),
///     );
///     let prompt = FeedbackPromptController::new(PromptConfig::default(), handler)?;
///
///     prompt.set_open(true);
///     // ... later, from the view
///     prompt.submit_rating(Rating::Yes);
///     Ok(())
/// }
/// ```
pub struct FeedbackPromptController {
    shared: Arc<Shared>,
}

struct Shared {
    state: Mutex<ControllerState>,
    handler: Arc<dyn FeedbackHandler>,
    runtime: Handle,
}

struct ControllerState {
    machine: PromptMachine,
    timers: HashMap<TimerKind, (TimerToken, JoinHandle<()>)>,
}

impl FeedbackPromptController {
    /// Create a controller for one prompt
    pub fn new<H: FeedbackHandler>(config: PromptConfig, handler: H) -> Result<Self, FeedbackError> {
        Self::with_shared_handler(config, Arc::new(handler))
    }

    /// Create a controller with a handler shared with other owners
    pub fn with_shared_handler(
        config: PromptConfig,
        handler: Arc<dyn FeedbackHandler>,
    ) -> Result<Self, FeedbackError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| FeedbackError::NoRuntime)?;

        Ok(Self {
            shared: Arc::new(Shared {
                state: Mutex::new(ControllerState {
                    machine: PromptMachine::new(config),
                    timers: HashMap::new(),
                }),
                handler,
                runtime,
            }),
        })
    }

    /// Apply the host's open signal
    pub fn set_open(&self, open: bool) {
        Shared::dispatch(&self.shared, |state| state.machine.set_open(open));
    }

    /// Record the user's rating
    pub fn submit_rating(&self, rating: Rating) {
        Shared::dispatch(&self.shared, |state| state.machine.submit_rating(rating));
    }

    /// Close the prompt on the user's request
    pub fn dismiss(&self) {
        Shared::dispatch(&self.shared, |state| state.machine.dismiss());
    }

    /// Point-in-time view of the prompt
    pub fn snapshot(&self) -> PromptSnapshot {
        self.shared.lock().machine.snapshot()
    }

    /// Observable phase
    pub fn phase(&self) -> PromptPhase {
        self.shared.lock().machine.phase()
    }

    /// Get the configuration
    pub fn config(&self) -> PromptConfig {
        *self.shared.lock().machine.config()
    }

    /// Number of timers that have not yet fired or been cancelled
    pub fn pending_timers(&self) -> usize {
        self.shared
            .lock()
            .timers
            .values()
            .filter(|(_, handle)| !handle.is_finished())
            .count()
    }
}

impl Drop for FeedbackPromptController {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        let pending = state.timers.len();
        let presence = state.machine.presence();
        // Timer tasks already past their sleep may still be waiting on the
        // lock; retiring the instance makes their tokens stale.
        state.machine.retire();
        state.cancel_all();
        tracing::trace!(pending, ?presence, "Feedback prompt controller dropped");
    }
}

impl std::fmt::Debug for FeedbackPromptController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedbackPromptController")
            .field("snapshot", &self.snapshot())
            .field("pending_timers", &self.pending_timers())
            .finish_non_exhaustive()
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Feed one input to the machine, execute its timer commands under the
    /// lock, then deliver notifications with the lock released.
    fn dispatch<F>(shared: &Arc<Self>, input: F)
    where
        F: FnOnce(&mut ControllerState) -> Vec<Command>,
    {
        let (generation, notifications) = {
            let mut state = shared.lock();
            let commands = input(&mut *state);
            let generation = state.machine.generation();
            (generation, state.execute(shared, commands))
        };

        for notification in notifications {
            shared.notify(generation, notification);
        }
    }

    fn on_timer(shared: &Arc<Self>, token: TimerToken) {
        Self::dispatch(shared, |state| {
            state.release(token);
            state.machine.fire(token)
        });
    }

    fn notify(&self, generation: u64, notification: Command) {
        let handler = &self.handler;
        let outcome = catch_unwind(AssertUnwindSafe(|| match notification {
            Command::NotifySubmit(rating) => handler.on_submit(rating),
            Command::NotifyDismiss => handler.on_dismiss(),
            _ => {}
        }));

        if outcome.is_err() {
            tracing::error!(
                generation,
                notification = ?notification,
                "Feedback handler panicked"
            );
        }
    }
}

impl ControllerState {
    /// Execute timer commands and return the notifications
    fn execute(&mut self, shared: &Arc<Shared>, commands: Vec<Command>) -> Vec<Command> {
        let (notifications, timers): (Vec<_>, Vec<_>) =
            commands.into_iter().partition(Command::is_notification);

        for command in timers {
            match command {
                Command::Arm { token, after } => self.arm(shared, token, after),
                Command::Cancel(token) => self.cancel(token),
                Command::CancelAll => self.cancel_all(),
                Command::NotifySubmit(_) | Command::NotifyDismiss => {}
            }
        }

        notifications
    }

    fn arm(&mut self, shared: &Arc<Shared>, token: TimerToken, after: Duration) {
        let weak = Arc::downgrade(shared);
        let handle = shared.runtime.spawn(async move {
            tokio::time::sleep(after).await;
            if let Some(shared) = weak.upgrade() {
                Shared::on_timer(&shared, token);
            }
        });

        if let Some((_, previous)) = self.timers.insert(token.kind, (token, handle)) {
            previous.abort();
        }
    }

    fn cancel(&mut self, token: TimerToken) {
        if self.timers.get(&token.kind).is_some_and(|(armed, _)| *armed == token) {
            if let Some((_, handle)) = self.timers.remove(&token.kind) {
                handle.abort();
            }
        }
    }

    fn cancel_all(&mut self) {
        for (_, (_, handle)) in self.timers.drain() {
            handle.abort();
        }
    }

    /// Forget a timer that has fired; its task is the caller
    fn release(&mut self, token: TimerToken) {
        if self.timers.get(&token.kind).is_some_and(|(armed, _)| *armed == token) {
            self.timers.remove(&token.kind);
        }
    }
}
