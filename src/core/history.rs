//! State transition history tracking.
//!
//! Keeps a bounded log of the transitions a machine performed, for debug
//! overlays and test assertions. The log is diagnostic only; nothing ever
//! loads a machine back from it.

use super::tag::Tag;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Capacity used by machines that don't configure one.
pub const DEFAULT_HISTORY_CAPACITY: usize = 32;

/// What caused a transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionCause {
    /// An any-state transition fired.
    Any,
    /// A transition keyed by the previous state fired.
    Local,
    /// A state hook or an external caller requested it.
    Requested,
}

/// Record of a single state transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionRecord<T: Tag> {
    /// The state being transitioned from
    pub from: T,
    /// The concrete state being transitioned to
    pub to: T,
    pub cause: TransitionCause,
    /// Time spent in `from` before leaving it
    pub time_in_previous: f32,
}

/// Ordered, bounded history of state transitions.
///
/// Once full, recording drops the oldest entry. A capacity of zero disables
/// recording entirely.
///
/// # Example
///
/// ```rust
/// use superstate::core::{StateHistory, TransitionCause, TransitionRecord};
/// use superstate::state_tags;
///
/// state_tags! {
///     enum Phase {
///         One,
///         Two,
///         Three,
///     }
/// }
///
/// let mut history = StateHistory::with_capacity(8);
/// history.record(TransitionRecord {
///     from: Phase::One,
///     to: Phase::Two,
///     cause: TransitionCause::Local,
///     time_in_previous: 1.0,
/// });
/// history.record(TransitionRecord {
///     from: Phase::Two,
///     to: Phase::Three,
///     cause: TransitionCause::Any,
///     time_in_previous: 0.5,
/// });
///
/// assert_eq!(history.get_path(), vec![Phase::One, Phase::Two, Phase::Three]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<T: Tag> {
    capacity: usize,
    transitions: VecDeque<TransitionRecord<T>>,
}

impl<T: Tag> Default for StateHistory<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl<T: Tag> StateHistory<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            transitions: VecDeque::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append a transition, evicting the oldest one when full.
    pub fn record(&mut self, transition: TransitionRecord<T>) {
        if self.capacity == 0 {
            return;
        }
        if self.transitions.len() == self.capacity {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` of the oldest retained transition, then the `to`
    /// of each transition in order.
    pub fn get_path(&self) -> Vec<T> {
        let mut path = Vec::with_capacity(self.transitions.len() + 1);
        if let Some(first) = self.transitions.front() {
            path.push(first.from);
        }
        path.extend(self.transitions.iter().map(|t| t.to));
        path
    }

    pub fn last(&self) -> Option<&TransitionRecord<T>> {
        self.transitions.back()
    }

    pub fn transitions(&self) -> impl Iterator<Item = &TransitionRecord<T>> {
        self.transitions.iter()
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state_tags;

    state_tags! {
        enum TestTag {
            Initial,
            Processing,
            Complete,
        }
    }

    fn record(from: TestTag, to: TestTag) -> TransitionRecord<TestTag> {
        TransitionRecord {
            from,
            to,
            cause: TransitionCause::Local,
            time_in_previous: 1.0,
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestTag> = StateHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.capacity(), DEFAULT_HISTORY_CAPACITY);
        assert!(history.get_path().is_empty());
        assert!(history.last().is_none());
    }

    #[test]
    fn get_path_starts_at_first_source() {
        let mut history = StateHistory::default();
        history.record(record(TestTag::Initial, TestTag::Processing));
        history.record(record(TestTag::Processing, TestTag::Complete));

        assert_eq!(
            history.get_path(),
            vec![TestTag::Initial, TestTag::Processing, TestTag::Complete]
        );
        assert_eq!(history.last().map(|t| t.to), Some(TestTag::Complete));
    }

    #[test]
    fn full_history_evicts_oldest() {
        let mut history = StateHistory::with_capacity(2);
        history.record(record(TestTag::Initial, TestTag::Processing));
        history.record(record(TestTag::Processing, TestTag::Complete));
        history.record(record(TestTag::Complete, TestTag::Initial));

        assert_eq!(history.len(), 2);
        assert_eq!(
            history.get_path(),
            vec![TestTag::Processing, TestTag::Complete, TestTag::Initial]
        );
    }

    #[test]
    fn zero_capacity_records_nothing() {
        let mut history = StateHistory::with_capacity(0);
        history.record(record(TestTag::Initial, TestTag::Processing));
        assert!(history.is_empty());
    }

    #[test]
    fn history_serializes_to_json() {
        let mut history = StateHistory::with_capacity(4);
        history.record(TransitionRecord {
            from: TestTag::Initial,
            to: TestTag::Complete,
            cause: TransitionCause::Any,
            time_in_previous: 0.5,
        });

        let json = serde_json::to_value(&history).unwrap();
        assert_eq!(json["capacity"], 4);
        assert_eq!(json["transitions"][0]["cause"], "Any");
        assert_eq!(json["transitions"][0]["to"], "Complete");
    }
}
