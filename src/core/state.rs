//! The State trait and the context handed to state hooks.
//!
//! States are behavior units owned by the machine. They never hold a
//! reference back to the machine; every hook receives a [`StateContext`]
//! that lends them the host, their own timers and a way to request a
//! transition.

use super::tag::Tag;
use super::timer::TimerBank;

/// Trait for state machine states.
///
/// `T` is the tag type identifying states, `H` the host the states act on.
/// Every hook defaults to a no-op.
///
/// # Lifecycle
///
/// 1. `on_enter` - called once per entry, after the state's active timers
///    were zeroed
/// 2. `tick` - called each frame while this state is current
/// 3. `on_exit` - called once when leaving; the only guaranteed teardown
///    hook, so it must release anything `on_enter` acquired
///
/// # Example
///
/// ```rust
/// use superstate::core::{State, StateContext};
/// use superstate::state_tags;
///
/// state_tags! {
///     enum CowTag {
///         Grazing,
///         Fleeing,
///     }
/// }
///
/// struct Cow {
///     scared: bool,
/// }
///
/// struct Grazing;
///
/// impl State<CowTag, Cow> for Grazing {
///     fn timer_slots(&self) -> usize {
///         1
///     }
///
///     fn tick(&mut self, ctx: &mut StateContext<'_, CowTag, Cow>) {
///         if ctx.host().scared && ctx.timers().get(0) > 0.5 {
///             ctx.request_transition(CowTag::Fleeing);
///         }
///     }
/// }
/// ```
pub trait State<T: Tag, H> {
    /// Number of timer slots this state needs.
    ///
    /// Queried once when the state is registered. Default is `0`.
    fn timer_slots(&self) -> usize {
        0
    }

    fn on_enter(&mut self, _ctx: &mut StateContext<'_, T, H>) {}

    fn tick(&mut self, _ctx: &mut StateContext<'_, T, H>) {}

    fn on_exit(&mut self, _ctx: &mut StateContext<'_, T, H>) {}
}

/// Everything a state hook may touch.
///
/// Transition requests are queued here and applied by the machine, in the
/// order they were made, as soon as the hook returns.
pub struct StateContext<'a, T: Tag, H> {
    host: &'a mut H,
    timers: &'a mut TimerBank,
    tag: T,
    time_in_state: f32,
    requests: &'a mut Vec<T>,
}

impl<'a, T: Tag, H> StateContext<'a, T, H> {
    pub(crate) fn new(
        host: &'a mut H,
        timers: &'a mut TimerBank,
        tag: T,
        time_in_state: f32,
        requests: &'a mut Vec<T>,
    ) -> Self {
        Self {
            host,
            timers,
            tag,
            time_in_state,
            requests,
        }
    }

    pub fn host(&self) -> &H {
        self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        self.host
    }

    /// This state's own timer bank.
    pub fn timers(&self) -> &TimerBank {
        self.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerBank {
        self.timers
    }

    /// The concrete tag this state is registered under.
    pub fn tag(&self) -> T {
        self.tag
    }

    /// Seconds since the machine last changed state.
    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    /// Ask the machine to switch to `tag` once this hook returns.
    ///
    /// `tag` may be abstract. Requests that resolve to nothing, or to the
    /// state that is already current, are dropped by the machine.
    ///
    /// A request made from `on_enter` or `on_exit` runs as soon as the
    /// current switch completes. States that keep requesting each other from
    /// `on_enter` are cut off after a bounded number of rounds, with a
    /// warning logged.
    pub fn request_transition(&mut self, tag: T) {
        self.requests.push(tag);
    }
}
