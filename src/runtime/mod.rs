//! The imperative shell: the machine that owns states and drives them.
//!
//! # Key Concepts
//!
//! - **Machine**: owns the state arena, transition tables and groups, and
//!   runs the per-tick evaluation order
//! - **Transitions**: guarded edges, either keyed by a source state or
//!   global ("any-state") and checked first
//! - **Groups**: superstates that enter and exit as the current state moves
//!   in and out of their member set, stacked for nesting
//!
//! The host is never stored. Every lifecycle call borrows it and threads it
//! into guards, callbacks and state hooks.

mod error;
mod group;
mod machine;
mod snapshot;
mod transition;

pub use error::MachineError;
pub use group::{GroupCallback, StateGroup};
pub use machine::{Machine, TickResult};
pub use snapshot::MachineSnapshot;
pub use transition::{Transition, TransitionAction, TransitionOutcome};
