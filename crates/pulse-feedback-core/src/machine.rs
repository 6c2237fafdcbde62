//! Feedback prompt lifecycle state machine
//!
//! `PromptMachine` holds no timers and performs no I/O. Every input returns
//! the commands the driver must execute: arm or cancel a timer, or notify
//! the host. Timers are identified by a [`TimerToken`] carrying the
//! generation of the lifecycle instance that armed them, so a timer that
//! fires after its instance was superseded, or after it was cancelled, is
//! recognised and dropped.

use std::collections::HashSet;
use std::time::Duration;

use pulse_types::{PromptPhase, Rating};

use crate::config::PromptConfig;
use crate::metrics;

/// Timers a lifecycle instance can arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Opening to visible
    Entrance,
    /// Unanswered prompt expiry
    AutoHide,
    /// Acknowledgement after a rating
    Acknowledge,
    /// Exit animation before notifying the host
    Teardown,
}

/// Identifies one armed timer of one lifecycle instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    /// Lifecycle instance that armed the timer
    pub generation: u64,
    /// Which timer
    pub kind: TimerKind,
}

/// Whether the prompt content is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Not shown
    Gone,
    /// Opened, entrance delay pending
    Entering,
    /// Shown
    Live,
    /// Hidden, teardown pending
    Fading,
}

/// Why an instance started fading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    /// The user closed the prompt
    Manual,
    /// Nobody answered before the auto-hide delay
    AutoHide,
    /// A rating was acknowledged
    Acknowledged,
}

impl DismissReason {
    /// Get the reason as a metrics label
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::AutoHide => "auto_hide",
            Self::Acknowledged => "acknowledged",
        }
    }
}

/// Work the driver must carry out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a timer that reports `token` back after `after`
    Arm { token: TimerToken, after: Duration },
    /// Cancel one timer
    Cancel(TimerToken),
    /// Cancel every timer
    CancelAll,
    /// Call the host's submit callback
    NotifySubmit(Rating),
    /// Call the host's dismiss callback
    NotifyDismiss,
}

impl Command {
    /// Whether this command is a host notification rather than timer bookkeeping
    pub fn is_notification(&self) -> bool {
        matches!(self, Self::NotifySubmit(_) | Self::NotifyDismiss)
    }
}

/// Point-in-time view of a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptSnapshot {
    /// Current lifecycle instance
    pub generation: u64,
    /// Host open signal
    pub open: bool,
    /// Observable phase
    pub phase: PromptPhase,
    /// Whether the content is shown
    pub is_visible: bool,
    /// Whether a rating was recorded
    pub is_submitted: bool,
    /// Recorded rating
    pub rating: Option<Rating>,
}

/// Sans-IO lifecycle of a single feedback prompt
#[derive(Debug, Clone)]
pub struct PromptMachine {
    config: PromptConfig,
    open: bool,
    generation: u64,
    presence: Presence,
    submitted: bool,
    rating: Option<Rating>,
    dismiss_reason: Option<DismissReason>,
    armed: HashSet<TimerKind>,
}

impl PromptMachine {
    /// Create a closed machine
    pub fn new(config: PromptConfig) -> Self {
        Self {
            config,
            open: false,
            generation: 0,
            presence: Presence::Gone,
            submitted: false,
            rating: None,
            dismiss_reason: None,
            armed: HashSet::new(),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Current lifecycle instance
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the host has the prompt open
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the content is shown
    pub fn is_visible(&self) -> bool {
        self.presence == Presence::Live
    }

    /// Whether a rating was recorded in this instance
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Recorded rating
    pub fn rating(&self) -> Option<Rating> {
        self.rating
    }

    /// Presence of the content
    pub fn presence(&self) -> Presence {
        self.presence
    }

    /// Reason the current instance is fading or faded
    pub fn dismiss_reason(&self) -> Option<DismissReason> {
        self.dismiss_reason
    }

    /// Whether a timer of this kind is armed for the current instance
    pub fn is_armed(&self, kind: TimerKind) -> bool {
        self.armed.contains(&kind)
    }

    /// Observable phase
    pub fn phase(&self) -> PromptPhase {
        match (self.presence, self.submitted) {
            (Presence::Gone, _) => PromptPhase::Hidden,
            (Presence::Entering, _) => PromptPhase::Entering,
            (Presence::Live, false) => PromptPhase::Visible,
            (Presence::Live, true) => PromptPhase::Submitted,
            (Presence::Fading, _) => PromptPhase::Fading,
        }
    }

    /// Point-in-time view
    pub fn snapshot(&self) -> PromptSnapshot {
        PromptSnapshot {
            generation: self.generation,
            open: self.open,
            phase: self.phase(),
            is_visible: self.is_visible(),
            is_submitted: self.submitted,
            rating: self.rating,
        }
    }

    /// Apply the host's open signal.
    ///
    /// Only transitions matter: false to true starts a new instance, true to
    /// false tears the current one down without notifying the host.
    pub fn set_open(&mut self, open: bool) -> Vec<Command> {
        if open == self.open {
            return Vec::new();
        }
        self.open = open;

        if open {
            self.start_instance()
        } else {
            self.close_instance()
        }
    }

    /// Retire the current instance for good, as when the owning view is torn
    /// down. Timers still in flight become stale and no callback fires.
    pub fn retire(&mut self) -> Vec<Command> {
        self.open = false;
        self.close_instance()
    }

    /// Record a rating.
    ///
    /// Ignored unless the prompt is visible and still unanswered.
    pub fn submit_rating(&mut self, rating: Rating) -> Vec<Command> {
        if self.presence != Presence::Live || self.submitted {
            tracing::trace!(
                generation = self.generation,
                %rating,
                phase = ?self.phase(),
                "Ignoring rating outside the visible phase"
            );
            return Vec::new();
        }

        let mut commands = Vec::with_capacity(3);
        commands.extend(self.cancel(TimerKind::AutoHide));
        self.submitted = true;
        self.rating = Some(rating);
        commands.push(Command::NotifySubmit(rating));
        commands.push(self.arm(TimerKind::Acknowledge, self.config.acknowledge_delay));

        metrics::record_rating(rating);
        tracing::debug!(generation = self.generation, %rating, "Feedback rating recorded");

        commands
    }

    /// Close the prompt on the user's request.
    ///
    /// Ignored unless the prompt is visible and still unanswered.
    pub fn dismiss(&mut self) -> Vec<Command> {
        if self.presence != Presence::Live || self.submitted {
            tracing::trace!(
                generation = self.generation,
                phase = ?self.phase(),
                "Ignoring dismiss outside the visible phase"
            );
            return Vec::new();
        }
        self.begin_fade(DismissReason::Manual)
    }

    /// Handle an elapsed timer.
    pub fn fire(&mut self, token: TimerToken) -> Vec<Command> {
        if token.generation != self.generation || !self.armed.remove(&token.kind) {
            metrics::record_stale_timer();
            tracing::trace!(
                generation = self.generation,
                timer_generation = token.generation,
                kind = ?token.kind,
                "Dropping stale timer"
            );
            return Vec::new();
        }

        match token.kind {
            TimerKind::Entrance => {
                if self.presence == Presence::Entering {
                    self.presence = Presence::Live;
                    tracing::debug!(generation = self.generation, "Feedback prompt visible");
                }
                Vec::new()
            }
            TimerKind::AutoHide => {
                if self.submitted || !matches!(self.presence, Presence::Entering | Presence::Live) {
                    return Vec::new();
                }
                self.begin_fade(DismissReason::AutoHide)
            }
            TimerKind::Acknowledge => {
                if !self.submitted || self.presence != Presence::Live {
                    return Vec::new();
                }
                self.presence = Presence::Fading;
                self.dismiss_reason = Some(DismissReason::Acknowledged);
                vec![self.arm(TimerKind::Teardown, self.config.teardown_delay)]
            }
            TimerKind::Teardown => {
                self.presence = Presence::Gone;
                let reason = self.dismiss_reason.unwrap_or(DismissReason::Manual);
                metrics::record_dismissal(reason);
                tracing::debug!(
                    generation = self.generation,
                    reason = reason.as_str(),
                    "Feedback prompt torn down"
                );
                vec![Command::NotifyDismiss]
            }
        }
    }

    fn start_instance(&mut self) -> Vec<Command> {
        let mut commands = Vec::with_capacity(3);
        if !self.armed.is_empty() {
            self.armed.clear();
            commands.push(Command::CancelAll);
        }

        self.generation += 1;
        self.submitted = false;
        self.rating = None;
        self.dismiss_reason = None;

        if self.config.entrance_delay.is_zero() {
            self.presence = Presence::Live;
        } else {
            self.presence = Presence::Entering;
            commands.push(self.arm(TimerKind::Entrance, self.config.entrance_delay));
        }
        commands.push(self.arm(TimerKind::AutoHide, self.config.auto_hide));

        metrics::record_opened();
        tracing::debug!(generation = self.generation, "Feedback prompt opened");

        commands
    }

    fn close_instance(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        if !self.armed.is_empty() {
            self.armed.clear();
            commands.push(Command::CancelAll);
        }

        // Retire the instance so timers already in flight are recognised as stale.
        self.generation += 1;
        self.presence = Presence::Gone;
        self.submitted = false;
        self.rating = None;
        self.dismiss_reason = None;

        tracing::debug!(generation = self.generation, "Feedback prompt closed by host");

        commands
    }

    fn begin_fade(&mut self, reason: DismissReason) -> Vec<Command> {
        let mut commands = Vec::with_capacity(3);
        commands.extend(self.cancel(TimerKind::Entrance));
        commands.extend(self.cancel(TimerKind::AutoHide));

        self.presence = Presence::Fading;
        self.dismiss_reason = Some(reason);
        commands.push(self.arm(TimerKind::Teardown, self.config.teardown_delay));

        tracing::debug!(
            generation = self.generation,
            reason = reason.as_str(),
            "Feedback prompt fading"
        );

        commands
    }

    fn token(&self, kind: TimerKind) -> TimerToken {
        TimerToken {
            generation: self.generation,
            kind,
        }
    }

    fn arm(&mut self, kind: TimerKind, after: Duration) -> Command {
        self.armed.insert(kind);
        Command::Arm {
            token: self.token(kind),
            after,
        }
    }

    fn cancel(&mut self, kind: TimerKind) -> Option<Command> {
        self.armed
            .remove(&kind)
            .then(|| Command::Cancel(self.token(kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PromptConfig {
        PromptConfig::new()
            .with_entrance_delay(Duration::from_millis(100))
            .with_auto_hide_ms(1_000)
            .with_acknowledge_delay(Duration::from_millis(1_500))
            .with_teardown_delay(Duration::from_millis(200))
    }

    fn token(generation: u64, kind: TimerKind) -> TimerToken {
        TimerToken { generation, kind }
    }

    /// Open the machine and fire the entrance timer
    fn visible_machine() -> PromptMachine {
        let mut machine = PromptMachine::new(config());
        machine.set_open(true);
        machine.fire(token(1, TimerKind::Entrance));
        assert_eq!(machine.phase(), PromptPhase::Visible);
        machine
    }

    #[test]
    fn test_open_arms_entrance_and_auto_hide() {
        let mut machine = PromptMachine::new(config());
        let commands = machine.set_open(true);

        assert_eq!(
            commands,
            vec![
                Command::Arm {
                    token: token(1, TimerKind::Entrance),
                    after: Duration::from_millis(100),
                },
                Command::Arm {
                    token: token(1, TimerKind::AutoHide),
                    after: Duration::from_millis(1_000),
                },
            ]
        );
        assert_eq!(machine.phase(), PromptPhase::Entering);
        assert!(!machine.is_visible());
    }

    #[test]
    fn test_zero_entrance_is_immediately_visible() {
        let mut machine = PromptMachine::new(config().with_entrance_delay(Duration::ZERO));
        let commands = machine.set_open(true);

        assert_eq!(commands.len(), 1);
        assert_eq!(machine.phase(), PromptPhase::Visible);
    }

    #[test]
    fn test_repeated_open_signal_is_noop() {
        let mut machine = PromptMachine::new(config());
        machine.set_open(true);
        assert!(machine.set_open(true).is_empty());
        assert_eq!(machine.generation(), 1);
        assert!(PromptMachine::new(config()).set_open(false).is_empty());
    }

    #[test]
    fn test_close_cancels_everything_without_callback() {
        let mut machine = visible_machine();
        let commands = machine.set_open(false);

        assert_eq!(commands, vec![Command::CancelAll]);
        assert_eq!(machine.phase(), PromptPhase::Hidden);
        assert!(!commands.iter().any(Command::is_notification));
    }

    #[test]
    fn test_submit_records_once() {
        let mut machine = visible_machine();
        let commands = machine.submit_rating(Rating::Yes);

        assert_eq!(
            commands,
            vec![
                Command::Cancel(token(1, TimerKind::AutoHide)),
                Command::NotifySubmit(Rating::Yes),
                Command::Arm {
                    token: token(1, TimerKind::Acknowledge),
                    after: Duration::from_millis(1_500),
                },
            ]
        );
        assert_eq!(machine.phase(), PromptPhase::Submitted);
        assert!(machine.is_visible());

        assert!(machine.submit_rating(Rating::No).is_empty());
        assert_eq!(machine.rating(), Some(Rating::Yes));
    }

    #[test]
    fn test_submit_ignored_while_entering() {
        let mut machine = PromptMachine::new(config());
        machine.set_open(true);
        assert!(machine.submit_rating(Rating::Maybe).is_empty());
        assert_eq!(machine.rating(), None);
    }

    #[test]
    fn test_submit_then_acknowledge_then_teardown() {
        let mut machine = visible_machine();
        machine.submit_rating(Rating::Maybe);

        let commands = machine.fire(token(1, TimerKind::Acknowledge));
        assert_eq!(
            commands,
            vec![Command::Arm {
                token: token(1, TimerKind::Teardown),
                after: Duration::from_millis(200),
            }]
        );
        assert_eq!(machine.phase(), PromptPhase::Fading);
        assert_eq!(machine.dismiss_reason(), Some(DismissReason::Acknowledged));

        let commands = machine.fire(token(1, TimerKind::Teardown));
        assert_eq!(commands, vec![Command::NotifyDismiss]);
        assert_eq!(machine.phase(), PromptPhase::Hidden);
        assert_eq!(machine.rating(), Some(Rating::Maybe));
    }

    #[test]
    fn test_cancelled_auto_hide_is_inert_after_submit() {
        let mut machine = visible_machine();
        machine.submit_rating(Rating::Yes);

        assert!(machine.fire(token(1, TimerKind::AutoHide)).is_empty());
        assert_eq!(machine.phase(), PromptPhase::Submitted);
    }

    #[test]
    fn test_manual_dismiss() {
        let mut machine = visible_machine();
        let commands = machine.dismiss();

        assert_eq!(
            commands,
            vec![
                Command::Cancel(token(1, TimerKind::AutoHide)),
                Command::Arm {
                    token: token(1, TimerKind::Teardown),
                    after: Duration::from_millis(200),
                },
            ]
        );
        assert!(!machine.is_visible());
        assert!(machine.dismiss().is_empty());
        assert!(machine.submit_rating(Rating::Yes).is_empty());

        assert_eq!(
            machine.fire(token(1, TimerKind::Teardown)),
            vec![Command::NotifyDismiss]
        );
    }

    #[test]
    fn test_dismiss_ignored_after_submit() {
        let mut machine = visible_machine();
        machine.submit_rating(Rating::No);
        assert!(machine.dismiss().is_empty());
        assert_eq!(machine.phase(), PromptPhase::Submitted);
    }

    #[test]
    fn test_auto_hide_fades_visible_prompt() {
        let mut machine = visible_machine();
        let commands = machine.fire(token(1, TimerKind::AutoHide));

        assert_eq!(
            commands,
            vec![Command::Arm {
                token: token(1, TimerKind::Teardown),
                after: Duration::from_millis(200),
            }]
        );
        assert_eq!(machine.dismiss_reason(), Some(DismissReason::AutoHide));
    }

    #[test]
    fn test_auto_hide_while_entering_cancels_entrance() {
        let mut machine = PromptMachine::new(config());
        machine.set_open(true);
        let commands = machine.fire(token(1, TimerKind::AutoHide));

        assert_eq!(commands[0], Command::Cancel(token(1, TimerKind::Entrance)));
        assert_eq!(machine.phase(), PromptPhase::Fading);
        assert!(machine.fire(token(1, TimerKind::Entrance)).is_empty());
    }

    #[test]
    fn test_stale_generation_dropped() {
        let mut machine = visible_machine();
        machine.set_open(false);
        machine.set_open(true);
        assert_eq!(machine.generation(), 3);

        // Timers from the first instance must not touch the new one.
        assert!(machine.fire(token(1, TimerKind::AutoHide)).is_empty());
        assert!(machine.fire(token(1, TimerKind::Entrance)).is_empty());
        assert_eq!(machine.phase(), PromptPhase::Entering);
        assert!(machine.is_armed(TimerKind::AutoHide));
    }

    #[test]
    fn test_retire_makes_due_teardown_stale() {
        let mut machine = visible_machine();
        machine.dismiss();
        assert!(machine.is_armed(TimerKind::Teardown));

        assert_eq!(machine.retire(), vec![Command::CancelAll]);
        assert_eq!(machine.generation(), 2);
        assert_eq!(machine.presence(), Presence::Gone);
        assert!(!machine.is_open());

        // A teardown task that was already running when the view went away
        assert!(machine.fire(token(1, TimerKind::Teardown)).is_empty());
        assert!(machine.retire().is_empty());
    }

    #[test]
    fn test_reopen_during_teardown_starts_clean() {
        let mut machine = visible_machine();
        machine.submit_rating(Rating::Yes);
        machine.fire(token(1, TimerKind::Acknowledge));

        assert_eq!(machine.set_open(false), vec![Command::CancelAll]);
        machine.set_open(true);

        assert!(machine.fire(token(1, TimerKind::Teardown)).is_empty());
        assert_eq!(machine.rating(), None);
        assert!(!machine.is_submitted());
        assert_eq!(machine.phase(), PromptPhase::Entering);
    }

    #[test]
    fn test_snapshot() {
        let mut machine = visible_machine();
        machine.submit_rating(Rating::Yes);
        let snapshot = machine.snapshot();

        assert_eq!(
            snapshot,
            PromptSnapshot {
                generation: 1,
                open: true,
                phase: PromptPhase::Submitted,
                is_visible: true,
                is_submitted: true,
                rating: Some(Rating::Yes),
            }
        );
    }
}
