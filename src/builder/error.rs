//! Build errors for machine, transition and group builders.

use crate::runtime::MachineError;
use thiserror::Error;

/// Errors that can occur when building machines, transitions and groups.
#[derive(Debug, Error, PartialEq)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(tag, state) before .build()")]
    MissingInitialState,

    #[error("Transition source not specified. Call .from(tag) or .from_any()")]
    MissingSource,

    #[error("Transition target not specified. Call .to(tag)")]
    MissingTarget,

    #[error("State group '{name}' has no members. Call .member(tag)")]
    EmptyGroup { name: String },

    #[error(transparent)]
    Machine(#[from] MachineError),
}
