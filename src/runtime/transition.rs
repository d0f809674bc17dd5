//! Guarded transitions and the outcome of a transition request.

use crate::core::{Guard, GuardContext, Tag};

/// Callback fired when a transition's guard is observed true, before the
/// state switch.
pub type TransitionAction<H> = Box<dyn FnMut(&mut H)>;

/// A guarded edge to `to`.
///
/// The source is not stored: local transitions live in a list keyed by their
/// source tag, any-transitions in the machine's global list.
pub struct Transition<T: Tag, H> {
    pub to: T,
    pub guard: Option<Guard<T, H>>,
    pub action: Option<TransitionAction<H>>,
}

impl<T: Tag, H> Transition<T, H> {
    pub fn new(to: T, guard: Guard<T, H>) -> Self {
        Self {
            to,
            guard: Some(guard),
            action: None,
        }
    }

    pub fn with_action<F>(mut self, action: F) -> Self
    where
        F: FnMut(&mut H) + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Check if this transition can fire (an unguarded transition always can).
    pub fn can_fire(&self, ctx: &GuardContext<'_, T, H>) -> bool {
        self.guard.as_ref().is_none_or(|g| g.check(ctx))
    }

    pub(crate) fn run_action(&mut self, host: &mut H) {
        if let Some(action) = self.action.as_mut() {
            action(host);
        }
    }
}

/// Result of asking the machine to change state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionOutcome<T: Tag> {
    /// The machine left `from` and entered the concrete state `to`.
    Transitioned { from: T, to: T },

    /// The current state already satisfies the requested tag.
    AlreadyActive,

    /// No registered state resolves the requested tag.
    Unresolved,
}

impl<T: Tag> TransitionOutcome<T> {
    pub fn is_transitioned(&self) -> bool {
        matches!(self, Self::Transitioned { .. })
    }
}
