//! The state machine runtime.

use std::collections::HashMap;

use crate::core::{
    Guard, GuardContext, State, StateContext, StateHistory, Tag, TimerBank, TransitionCause,
    TransitionRecord,
};
use crate::runtime::error::MachineError;
use crate::runtime::group::{GroupStack, StateGroup};
use crate::runtime::snapshot::MachineSnapshot;
use crate::runtime::transition::{Transition, TransitionOutcome};

/// Result of a single [`Machine::tick`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickResult<T: Tag> {
    /// The current state is unchanged and ticked once. Its timers advanced
    /// unless a table transition fired without moving the machine.
    Stayed,

    /// The machine left `from` for `to` during this tick.
    Transitioned {
        from: T,
        to: T,
        cause: TransitionCause,
    },
}

impl<T: Tag> TickResult<T> {
    pub fn is_transitioned(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}

/// A registered state and the timers it owns.
struct StateEntry<T: Tag, H> {
    tag: T,
    state: Box<dyn State<T, H>>,
    timers: TimerBank,
}

enum Hook {
    Enter,
    Tick,
    Exit,
}

/// Upper bound on rounds of requests raised while applying earlier ones.
const MAX_CHAINED_REQUESTS: usize = 64;

enum Resolution {
    Current,
    Found(usize),
    Missing,
}

/// Hierarchical state machine driving one host.
///
/// The machine owns its states, transition tables and groups. The host stays
/// with the caller and is lent to every lifecycle call.
///
/// # Example
///
/// ```rust
/// use superstate::core::{GuardContext, State};
/// use superstate::runtime::{Machine, TickResult};
/// use superstate::state_tags;
///
/// state_tags! {
///     enum MobTag {
///         Idle,
///         Dead,
///     }
/// }
///
/// struct Host {
///     health: i32,
/// }
///
/// struct Idle;
/// impl State<MobTag, Host> for Idle {}
///
/// struct Dead;
/// impl State<MobTag, Host> for Dead {}
///
/// let mut machine = Machine::new(MobTag::Idle, Idle).unwrap();
/// machine.add_state(MobTag::Dead, Dead).unwrap();
/// machine.add_any_transition(MobTag::Dead, |ctx: &GuardContext<'_, MobTag, Host>| {
///     ctx.host.health <= 0
/// }).unwrap();
///
/// let mut host = Host { health: 10 };
/// machine.initialize(&mut host).unwrap();
/// assert_eq!(machine.tick(&mut host, 0.016).unwrap(), TickResult::Stayed);
///
/// host.health = 0;
/// assert!(machine.tick(&mut host, 0.016).unwrap().is_transitioned());
/// assert_eq!(machine.current_tag(), MobTag::Dead);
/// ```
pub struct Machine<T: Tag, H> {
    states: Vec<StateEntry<T, H>>,
    index: HashMap<T, usize>,
    current: usize,
    transitions: HashMap<T, Vec<Transition<T, H>>>,
    any_transitions: Vec<Transition<T, H>>,
    groups: GroupStack<T, H>,
    time_in_state: f32,
    initialized: bool,
    history: StateHistory<T>,
    pending: Vec<T>,
}

impl<T: Tag, H> Machine<T, H> {
    /// Create a machine whose initial state is `state`, registered under
    /// `tag`.
    pub fn new<S>(tag: T, state: S) -> Result<Self, MachineError>
    where
        S: State<T, H> + 'static,
    {
        Self::new_boxed(tag, Box::new(state))
    }

    pub fn new_boxed(tag: T, state: Box<dyn State<T, H>>) -> Result<Self, MachineError> {
        let mut machine = Self {
            states: Vec::new(),
            index: HashMap::new(),
            current: 0,
            transitions: HashMap::new(),
            any_transitions: Vec::new(),
            groups: GroupStack::default(),
            time_in_state: 0.0,
            initialized: false,
            history: StateHistory::default(),
            pending: Vec::new(),
        };
        machine.add_boxed_state(tag, state)?;
        Ok(machine)
    }

    /// Replace the transition log with an empty one of the given capacity.
    pub fn set_history_capacity(&mut self, capacity: usize) {
        self.history = StateHistory::with_capacity(capacity);
    }

    /// Register `state` under the concrete tag `tag`.
    pub fn add_state<S>(&mut self, tag: T, state: S) -> Result<(), MachineError>
    where
        S: State<T, H> + 'static,
    {
        self.add_boxed_state(tag, Box::new(state))
    }

    pub fn add_boxed_state(
        &mut self,
        tag: T,
        state: Box<dyn State<T, H>>,
    ) -> Result<(), MachineError> {
        if tag.is_abstract() {
            return Err(MachineError::AbstractState {
                tag: tag.name().to_string(),
            });
        }
        if self.index.contains_key(&tag) {
            return Err(MachineError::DuplicateState {
                tag: tag.name().to_string(),
            });
        }

        let timers = TimerBank::new(state.timer_slots());
        self.index.insert(tag, self.states.len());
        self.states.push(StateEntry {
            tag,
            state,
            timers,
        });
        Ok(())
    }

    /// Add a transition out of `from`, taken when `predicate` holds.
    pub fn add_transition<F>(&mut self, from: T, to: T, predicate: F) -> Result<(), MachineError>
    where
        F: Fn(&GuardContext<'_, T, H>) -> bool + 'static,
    {
        self.add_transition_with(from, Transition::new(to, Guard::new(predicate)))
    }

    /// Add a prebuilt transition (possibly carrying an action) out of `from`.
    pub fn add_transition_with(
        &mut self,
        from: T,
        transition: Transition<T, H>,
    ) -> Result<(), MachineError> {
        if !self.index.contains_key(&from) {
            return Err(MachineError::UnknownSource {
                tag: from.name().to_string(),
            });
        }
        self.validate_target(transition.to)?;
        self.transitions.entry(from).or_default().push(transition);
        Ok(())
    }

    /// Add a transition that is checked from every state, ahead of the
    /// current state's own transitions.
    pub fn add_any_transition<F>(&mut self, to: T, predicate: F) -> Result<(), MachineError>
    where
        F: Fn(&GuardContext<'_, T, H>) -> bool + 'static,
    {
        self.add_any_transition_with(Transition::new(to, Guard::new(predicate)))
    }

    pub fn add_any_transition_with(
        &mut self,
        transition: Transition<T, H>,
    ) -> Result<(), MachineError> {
        self.validate_target(transition.to)?;
        self.any_transitions.push(transition);
        Ok(())
    }

    /// Put a group in the dormant pool.
    pub fn add_state_group(&mut self, group: StateGroup<T, H>) {
        self.groups.add(group);
    }

    /// Enter the initial state.
    ///
    /// Timers keep their constructed values; groups are left dormant until
    /// the first transition into one of their members.
    pub fn initialize(&mut self, host: &mut H) -> Result<(), MachineError> {
        if self.initialized {
            return Err(MachineError::AlreadyInitialized);
        }
        self.initialized = true;
        tracing::debug!(state = self.current_tag().name(), "initializing state machine");

        self.call_hook(host, Hook::Enter);
        self.apply_requests(host);
        Ok(())
    }

    /// Advance the machine by `dt` seconds.
    ///
    /// Any-transitions are checked first, then the current state's own
    /// transitions. The first one that fires switches state, ticks the newly
    /// entered state once and ends the call without advancing its timers.
    /// Otherwise the current state's active timers advance and it ticks.
    pub fn tick(&mut self, host: &mut H, dt: f32) -> Result<TickResult<T>, MachineError> {
        self.ensure_initialized()?;
        self.time_in_state += dt;
        tracing::trace!(
            state = self.current_tag().name(),
            dt,
            time_in_state = self.time_in_state,
            "tick"
        );

        if let Some(i) = self.find_any_transition(host) {
            self.any_transitions[i].run_action(host);
            let to = self.any_transitions[i].to;
            return Ok(self.fire(host, to, TransitionCause::Any));
        }

        let local = self.find_local_transition(host);
        let current = self.current_tag();
        if let (Some(i), Some(list)) = (local, self.transitions.get_mut(&current)) {
            list[i].run_action(host);
            let to = list[i].to;
            return Ok(self.fire(host, to, TransitionCause::Local));
        }

        self.states[self.current].timers.tick_active(dt);
        self.call_hook(host, Hook::Tick);
        let moved = self.apply_requests(host);
        Ok(requested_result(moved))
    }

    /// Ask the machine to switch to `target`, which may be abstract.
    pub fn request_transition(
        &mut self,
        host: &mut H,
        target: T,
    ) -> Result<TransitionOutcome<T>, MachineError> {
        self.ensure_initialized()?;
        let outcome = self.switch_to(host, target, TransitionCause::Requested);
        self.apply_requests(host);
        Ok(outcome)
    }

    pub fn current_tag(&self) -> T {
        self.states[self.current].tag
    }

    pub fn time_in_state(&self) -> f32 {
        self.time_in_state
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_registered(&self, tag: T) -> bool {
        self.index.contains_key(&tag)
    }

    /// Registered tags in registration order.
    pub fn registered_tags(&self) -> Vec<T> {
        self.states.iter().map(|e| e.tag).collect()
    }

    /// Timers of the state registered under `tag`.
    pub fn timers(&self, tag: T) -> Option<&TimerBank> {
        self.index.get(&tag).map(|&i| &self.states[i].timers)
    }

    pub fn timers_mut(&mut self, tag: T) -> Option<&mut TimerBank> {
        self.index.get(&tag).map(|&i| &mut self.states[i].timers)
    }

    /// Names of the active groups, outermost first.
    pub fn active_groups(&self) -> Vec<String> {
        self.groups.active_names()
    }

    pub fn is_group_active(&self, name: &str) -> bool {
        self.groups.is_active(name)
    }

    pub fn history(&self) -> &StateHistory<T> {
        &self.history
    }

    pub fn snapshot(&self) -> MachineSnapshot<T> {
        MachineSnapshot {
            current: self.current_tag(),
            time_in_state: self.time_in_state,
            initialized: self.initialized,
            active_groups: self.active_groups(),
            history: self.history.transitions().cloned().collect(),
        }
    }

    fn ensure_initialized(&self) -> Result<(), MachineError> {
        if self.initialized {
            Ok(())
        } else {
            Err(MachineError::NotInitialized)
        }
    }

    /// Concrete targets must be registered; abstract ones may legitimately
    /// have no registered descendant.
    fn validate_target(&self, to: T) -> Result<(), MachineError> {
        if to.is_abstract() || self.index.contains_key(&to) {
            Ok(())
        } else {
            Err(MachineError::UnknownTarget {
                tag: to.name().to_string(),
            })
        }
    }

    fn resolve(&self, target: T) -> Resolution {
        if let Some(&i) = self.index.get(&target) {
            return if i == self.current {
                Resolution::Current
            } else {
                Resolution::Found(i)
            };
        }
        if self.current_tag().descends_from(target) {
            return Resolution::Current;
        }
        match self.states.iter().position(|e| e.tag.descends_from(target)) {
            Some(i) => Resolution::Found(i),
            None => Resolution::Missing,
        }
    }

    /// Any-transitions into whatever the current state already satisfies
    /// are skipped. Every other true predicate claims the frame.
    fn occupies_current(&self, target: T) -> bool {
        matches!(self.resolve(target), Resolution::Current)
    }

    fn guard_context<'a>(&'a self, host: &'a H) -> GuardContext<'a, T, H> {
        let entry = &self.states[self.current];
        GuardContext {
            host,
            timers: &entry.timers,
            current: entry.tag,
            time_in_state: self.time_in_state,
        }
    }

    fn find_any_transition(&self, host: &H) -> Option<usize> {
        let ctx = self.guard_context(host);
        self.any_transitions
            .iter()
            .position(|t| !self.occupies_current(t.to) && t.can_fire(&ctx))
    }

    fn find_local_transition(&self, host: &H) -> Option<usize> {
        let list = self.transitions.get(&self.current_tag())?;
        let ctx = self.guard_context(host);
        list.iter().position(|t| t.can_fire(&ctx))
    }

    /// Switch for a table transition, then give the (possibly unchanged)
    /// current state its one tick for this frame. Timers do not advance.
    fn fire(&mut self, host: &mut H, to: T, cause: TransitionCause) -> TickResult<T> {
        let outcome = self.switch_to(host, to, cause);
        let chained = self.apply_requests(host);
        self.call_hook(host, Hook::Tick);
        let requested = self.apply_requests(host);

        match outcome {
            TransitionOutcome::Transitioned { from, to } => {
                TickResult::Transitioned { from, to, cause }
            }
            _ => requested_result(requested.or(chained)),
        }
    }

    fn switch_to(
        &mut self,
        host: &mut H,
        target: T,
        cause: TransitionCause,
    ) -> TransitionOutcome<T> {
        let next = match self.resolve(target) {
            Resolution::Found(i) => i,
            Resolution::Current => {
                tracing::debug!(requested = target.name(), "state already active");
                return TransitionOutcome::AlreadyActive;
            }
            Resolution::Missing => {
                tracing::debug!(requested = target.name(), "transition request did not resolve");
                return TransitionOutcome::Unresolved;
            }
        };

        let from = self.current_tag();
        let to = self.states[next].tag;

        // Local transitions are keyed by tag, so moving `current` below also
        // swaps the active local list.
        self.groups.activate_for(host, to);
        self.groups.unwind_for(host, to);

        self.call_hook(host, Hook::Exit);

        let time_in_previous = self.time_in_state;
        self.current = next;
        self.time_in_state = 0.0;
        self.states[next].timers.reset_active_to_zero();

        self.history.record(TransitionRecord {
            from,
            to,
            cause,
            time_in_previous,
        });
        tracing::debug!(
            from = from.name(),
            to = to.name(),
            ?cause,
            time_in_previous,
            "state transition"
        );

        self.call_hook(host, Hook::Enter);
        TransitionOutcome::Transitioned { from, to }
    }

    fn call_hook(&mut self, host: &mut H, hook: Hook) {
        let time_in_state = self.time_in_state;
        let entry = &mut self.states[self.current];
        let mut ctx = StateContext::new(
            host,
            &mut entry.timers,
            entry.tag,
            time_in_state,
            &mut self.pending,
        );
        match hook {
            Hook::Enter => entry.state.on_enter(&mut ctx),
            Hook::Tick => entry.state.tick(&mut ctx),
            Hook::Exit => entry.state.on_exit(&mut ctx),
        }
    }

    /// Apply queued requests in order, including any raised while applying
    /// them. Returns the last request that actually moved the machine.
    ///
    /// Requests that keep raising new ones are cut off after
    /// `MAX_CHAINED_REQUESTS` rounds.
    fn apply_requests(&mut self, host: &mut H) -> Option<TransitionOutcome<T>> {
        let mut moved = None;
        let mut rounds = 0;
        while !self.pending.is_empty() {
            if rounds == MAX_CHAINED_REQUESTS {
                tracing::warn!(
                    state = self.current_tag().name(),
                    dropped = self.pending.len(),
                    "transition requests kept chaining, dropping the rest"
                );
                self.pending.clear();
                break;
            }
            rounds += 1;
            let requested = std::mem::take(&mut self.pending);
            for target in requested {
                let outcome = self.switch_to(host, target, TransitionCause::Requested);
                if outcome.is_transitioned() {
                    moved = Some(outcome);
                }
            }
        }
        moved
    }
}

fn requested_result<T: Tag>(moved: Option<TransitionOutcome<T>>) -> TickResult<T> {
    match moved {
        Some(TransitionOutcome::Transitioned { from, to }) => TickResult::Transitioned {
            from,
            to,
            cause: TransitionCause::Requested,
        },
        _ => TickResult::Stayed,
    }
}
