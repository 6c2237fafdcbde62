//! Feedback prompt metrics.
//!
//! Counters are recorded through the `metrics` facade, so they are no-ops
//! until the host installs a recorder.
//!
//! # Metrics
//!
//! - `pulse_feedback_prompts_opened_total` - Counter of lifecycle instances started
//! - `pulse_feedback_ratings_total` - Counter of recorded ratings by rating
//! - `pulse_feedback_dismissals_total` - Counter of completed teardowns by reason
//! - `pulse_feedback_stale_timers_total` - Counter of timers dropped as superseded

use metrics::counter;
use pulse_types::Rating;

use crate::machine::DismissReason;

/// Metric name for opened prompts.
pub const PROMPTS_OPENED_TOTAL: &str = "pulse_feedback_prompts_opened_total";

/// Metric name for recorded ratings.
pub const RATINGS_TOTAL: &str = "pulse_feedback_ratings_total";

/// Metric name for completed dismissals.
pub const DISMISSALS_TOTAL: &str = "pulse_feedback_dismissals_total";

/// Metric name for dropped stale timers.
pub const STALE_TIMERS_TOTAL: &str = "pulse_feedback_stale_timers_total";

/// Record a new lifecycle instance.
pub fn record_opened() {
    counter!(PROMPTS_OPENED_TOTAL).increment(1);
}

/// Record a rating.
pub fn record_rating(rating: Rating) {
    counter!(RATINGS_TOTAL, "rating" => rating.as_str()).increment(1);
}

/// Record a completed teardown.
pub fn record_dismissal(reason: DismissReason) {
    counter!(DISMISSALS_TOTAL, "reason" => reason.as_str()).increment(1);
}

/// Record a timer that fired into a superseded instance or after cancellation.
pub fn record_stale_timer() {
    counter!(STALE_TIMERS_TOTAL).increment(1);
}
