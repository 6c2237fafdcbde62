//! Host callbacks for feedback prompts

use pulse_types::Rating;

/// Callbacks a host view receives from a feedback prompt.
///
/// `on_submit` is called at most once per lifecycle instance. `on_dismiss`
/// is called exactly once for every instance that reaches teardown, and
/// never for an instance the host closed itself.
pub trait FeedbackHandler: Send + Sync + 'static {
    /// A rating was recorded
    fn on_submit(&self, rating: Rating);

    /// The prompt finished closing
    fn on_dismiss(&self);
}

type SubmitFn = Box<dyn Fn(Rating) + Send + Sync>;
type DismissFn = Box<dyn Fn() + Send + Sync>;

/// Handler built from a pair of closures
pub struct CallbackHandler {
    on_submit: SubmitFn,
    on_dismiss: DismissFn,
}

impl CallbackHandler {
    /// Create a handler from closures
    pub fn new<S, D>(on_submit: S, on_dismiss: D) -> Self
    where
        S: Fn(Rating) + Send + Sync + 'static,
        D: Fn() + Send + Sync + 'static,
    {
        Self {
            on_submit: Box::new(on_submit),
            on_dismiss: Box::new(on_dismiss),
        }
    }
}

impl FeedbackHandler for CallbackHandler {
    fn on_submit(&self, rating: Rating) {
        (self.on_submit)(rating);
    }

    fn on_dismiss(&self) {
        (self.on_dismiss)();
    }
}

impl std::fmt::Debug for CallbackHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallbackHandler").finish_non_exhaustive()
    }
}
