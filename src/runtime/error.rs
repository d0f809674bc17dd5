//! Registration and lifecycle errors.

use thiserror::Error;

/// Errors raised by the machine when it is misconfigured or misused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MachineError {
    #[error("State '{tag}' is already registered")]
    DuplicateState { tag: String },

    #[error("Tag '{tag}' is abstract and cannot be registered as a state")]
    AbstractState { tag: String },

    #[error("Transition source '{tag}' is not a registered state")]
    UnknownSource { tag: String },

    #[error("Transition target '{tag}' is not a registered state")]
    UnknownTarget { tag: String },

    #[error("Machine is not initialized. Call .initialize(host) before ticking")]
    NotInitialized,

    #[error("Machine is already initialized")]
    AlreadyInitialized,
}
