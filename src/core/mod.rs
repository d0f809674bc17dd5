//! Core state machine types.
//!
//! This module contains the building blocks the runtime is assembled from:
//! - Tags and their concrete/abstract hierarchy via the `Tag` trait
//! - States via the `State` trait and the `StateContext` their hooks receive
//! - Guard predicates for transition control
//! - Per-state timer banks
//! - Bounded transition history

mod guard;
mod history;
mod state;
mod tag;
mod timer;

pub use guard::{Guard, GuardContext};
pub use history::{StateHistory, TransitionCause, TransitionRecord, DEFAULT_HISTORY_CAPACITY};
pub use state::{State, StateContext};
pub use tag::{Ancestors, Tag};
pub use timer::{TimerBank, TimerSlot};
