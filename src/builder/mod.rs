//! Builder API for ergonomic state machine construction.
//!
//! This module provides fluent builders and macros for assembling machines,
//! transitions and groups, validating the configuration before the machine
//! ever ticks.

pub mod error;
pub mod group;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::BuildError;
pub use group::GroupBuilder;
pub use machine::StateMachineBuilder;
pub use transition::{Edge, Source, TransitionBuilder};

use crate::core::{Guard, Tag};
use crate::runtime::Transition;

/// Create an unconditional transition.
///
/// # Example
///
/// ```
/// use superstate::builder::{simple_transition, Source};
/// use superstate::state_tags;
///
/// state_tags! {
///     enum MenuTag {
///         Title,
///         Options,
///     }
/// }
///
/// let edge = simple_transition::<MenuTag, ()>(MenuTag::Title, MenuTag::Options);
/// assert_eq!(edge.source, Source::State(MenuTag::Title));
/// ```
pub fn simple_transition<T: Tag, H>(from: T, to: T) -> Edge<T, H> {
    Edge {
        source: Source::State(from),
        transition: Transition::new(to, Guard::always()),
    }
}

/// Create a transition taken once the machine has dwelt in `from` for more
/// than `seconds`.
///
/// # Example
///
/// ```
/// use superstate::builder::timed_transition;
/// use superstate::state_tags;
///
/// state_tags! {
///     enum CameraTag {
///         Focus,
///         Follow,
///     }
/// }
///
/// let edge = timed_transition::<CameraTag, ()>(CameraTag::Focus, CameraTag::Follow, 1.5);
/// assert_eq!(edge.transition.to, CameraTag::Follow);
/// ```
pub fn timed_transition<T: Tag, H>(from: T, to: T, seconds: f32) -> Edge<T, H> {
    Edge {
        source: Source::State(from),
        transition: Transition::new(to, Guard::after(seconds)),
    }
}
