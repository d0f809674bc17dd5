//! Guard predicates for controlling state transitions.
//!
//! Guards are boolean functions evaluated once per tick against a read-only
//! view of the machine: the host, the current state's timers and how long the
//! machine has been in that state.

use super::tag::Tag;
use super::timer::TimerBank;

/// Read-only view handed to guards.
pub struct GuardContext<'a, T: Tag, H> {
    pub host: &'a H,
    pub timers: &'a TimerBank,
    pub current: T,
    pub time_in_state: f32,
}

/// Predicate that determines if a transition can fire this tick.
///
/// # Example
///
/// ```rust
/// use superstate::core::{Guard, GuardContext, TimerBank};
/// use superstate::state_tags;
///
/// state_tags! {
///     enum UfoTag {
///         Patrol,
///         Abduct,
///     }
/// }
///
/// struct Ufo {
///     beam_charge: f32,
/// }
///
/// let charged = Guard::new(|ctx: &GuardContext<'_, UfoTag, Ufo>| {
///     ctx.host.beam_charge >= 1.0 && ctx.timers.get(0) > 2.0
/// });
///
/// let mut timers = TimerBank::new(1);
/// timers.set(0, 3.0);
/// let host = Ufo { beam_charge: 1.0 };
/// let ctx = GuardContext {
///     host: &host,
///     timers: &timers,
///     current: UfoTag::Patrol,
///     time_in_state: 3.0,
/// };
///
/// assert!(charged.check(&ctx));
/// ```
pub struct Guard<T: Tag, H> {
    predicate: Box<dyn Fn(&GuardContext<'_, T, H>) -> bool>,
}

impl<T: Tag, H> Guard<T, H> {
    /// Create a guard from a predicate function.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&GuardContext<'_, T, H>) -> bool + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// A guard that always passes.
    pub fn always() -> Self {
        Self::new(|_| true)
    }

    /// Fires once the machine has spent more than `seconds` in the current
    /// state.
    pub fn after(seconds: f32) -> Self {
        Self::new(move |ctx| ctx.time_in_state > seconds)
    }

    /// Fires once timer slot `slot` of the current state exceeds `seconds`.
    pub fn timer_exceeds(slot: usize, seconds: f32) -> Self {
        Self::new(move |ctx| ctx.timers.get(slot) > seconds)
    }

    /// Check if the guard allows the transition.
    pub fn check(&self, ctx: &GuardContext<'_, T, H>) -> bool {
        (self.predicate)(ctx)
    }
}

impl<T: Tag, H> std::fmt::Debug for Guard<T, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Guard(..)")
    }
}
