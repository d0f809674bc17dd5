//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::builder::group::GroupBuilder;
use crate::builder::transition::{Edge, Source, TransitionBuilder};
use crate::core::{State, Tag, DEFAULT_HISTORY_CAPACITY};
use crate::runtime::{Machine, StateGroup};

/// Builder for constructing state machines with a fluent API.
///
/// States are registered before transitions regardless of call order, so
/// transitions may be declared before the states they reference.
pub struct StateMachineBuilder<T: Tag, H> {
    initial: Option<(T, Box<dyn State<T, H>>)>,
    states: Vec<(T, Box<dyn State<T, H>>)>,
    edges: Vec<Edge<T, H>>,
    groups: Vec<StateGroup<T, H>>,
    history_capacity: usize,
}

impl<T: Tag, H> StateMachineBuilder<T, H> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            states: Vec::new(),
            edges: Vec::new(),
            groups: Vec::new(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }

    /// Set the initial state (required).
    pub fn initial<S>(mut self, tag: T, state: S) -> Self
    where
        S: State<T, H> + 'static,
    {
        self.initial = Some((tag, Box::new(state)));
        self
    }

    /// Register another state.
    pub fn state<S>(mut self, tag: T, state: S) -> Self
    where
        S: State<T, H> + 'static,
    {
        self.states.push((tag, Box::new(state)));
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<T, H>) -> Result<Self, BuildError> {
        self.edges.push(builder.build()?);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_edge(mut self, edge: Edge<T, H>) -> Self {
        self.edges.push(edge);
        self
    }

    /// Add multiple transitions at once.
    pub fn edges(mut self, edges: Vec<Edge<T, H>>) -> Self {
        self.edges.extend(edges);
        self
    }

    /// Add a state group using a builder.
    pub fn group(mut self, builder: GroupBuilder<T, H>) -> Result<Self, BuildError> {
        self.groups.push(builder.build()?);
        Ok(self)
    }

    pub fn add_group(mut self, group: StateGroup<T, H>) -> Self {
        self.groups.push(group);
        self
    }

    /// How many transitions the machine's history keeps (0 disables it).
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    /// Build the state machine.
    /// Returns an error if required fields are missing or registration fails.
    pub fn build(self) -> Result<Machine<T, H>, BuildError> {
        let (tag, state) = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut machine = Machine::new_boxed(tag, state)?;
        machine.set_history_capacity(self.history_capacity);

        for (tag, state) in self.states {
            machine.add_boxed_state(tag, state)?;
        }
        for edge in self.edges {
            match edge.source {
                Source::State(from) => machine.add_transition_with(from, edge.transition)?,
                Source::Any => machine.add_any_transition_with(edge.transition)?,
            }
        }
        for group in self.groups {
            machine.add_state_group(group);
        }

        Ok(machine)
    }
}

impl<T: Tag, H> Default for StateMachineBuilder<T, H> {
    fn default() -> Self {
        Self::new()
    }
}
