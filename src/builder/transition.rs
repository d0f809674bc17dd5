//! Builder for constructing transitions.

use crate::builder::error::BuildError;
use crate::core::{Guard, GuardContext, Tag};
use crate::runtime::{Transition, TransitionAction};

/// Where a transition is checked from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source<T: Tag> {
    /// Checked from every state, before local transitions.
    Any,
    /// Checked only while this state is current.
    State(T),
}

/// A transition together with its source, ready to register.
pub struct Edge<T: Tag, H> {
    pub source: Source<T>,
    pub transition: Transition<T, H>,
}

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<T: Tag, H> {
    source: Option<Source<T>>,
    to: Option<T>,
    guard: Option<Guard<T, H>>,
    action: Option<TransitionAction<H>>,
}

impl<T: Tag, H> TransitionBuilder<T, H> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            source: None,
            to: None,
            guard: None,
            action: None,
        }
    }

    /// Set the source state.
    pub fn from(mut self, tag: T) -> Self {
        self.source = Some(Source::State(tag));
        self
    }

    /// Make this an any-state transition.
    pub fn from_any(mut self) -> Self {
        self.source = Some(Source::Any);
        self
    }

    /// Set the target tag (required). May be abstract.
    pub fn to(mut self, tag: T) -> Self {
        self.to = Some(tag);
        self
    }

    /// Add a guard (optional; unguarded transitions always fire).
    pub fn guard(mut self, guard: Guard<T, H>) -> Self {
        self.guard = Some(guard);
        self
    }

    /// Add a guard using a closure.
    pub fn when<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&GuardContext<'_, T, H>) -> bool + 'static,
    {
        self.guard = Some(Guard::new(predicate));
        self
    }

    /// Run `action` on the host when the guard passes, before the switch.
    pub fn then<F>(mut self, action: F) -> Self
    where
        F: FnMut(&mut H) + 'static,
    {
        self.action = Some(Box::new(action));
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<Edge<T, H>, BuildError> {
        let source = self.source.ok_or(BuildError::MissingSource)?;
        let to = self.to.ok_or(BuildError::MissingTarget)?;

        Ok(Edge {
            source,
            transition: Transition {
                to,
                guard: self.guard,
                action: self.action,
            },
        })
    }
}

impl<T: Tag, H> Default for TransitionBuilder<T, H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TimerBank;
    use crate::state_tags;

    state_tags! {
        enum TestTag {
            Patrol,
            Abduct,
            Flee,
        }
    }

    struct Host {
        cows_in_range: u32,
        log: Vec<&'static str>,
    }

    #[test]
    fn builder_validates_required_fields() {
        let result = TransitionBuilder::<TestTag, Host>::new()
            .from(TestTag::Patrol)
            .build();
        assert!(matches!(result, Err(BuildError::MissingTarget)));

        let result = TransitionBuilder::<TestTag, Host>::new()
            .to(TestTag::Abduct)
            .build();
        assert!(matches!(result, Err(BuildError::MissingSource)));
    }

    #[test]
    fn from_any_builds_any_source() {
        let edge = TransitionBuilder::<TestTag, Host>::new()
            .from_any()
            .to(TestTag::Flee)
            .build()
            .unwrap();

        assert_eq!(edge.source, Source::Any);
        assert_eq!(edge.transition.to, TestTag::Flee);
        assert!(edge.transition.guard.is_none());
    }

    #[test]
    fn fluent_api_builds_guarded_transition_with_action() {
        let mut edge = TransitionBuilder::new()
            .from(TestTag::Patrol)
            .to(TestTag::Abduct)
            .when(|ctx: &GuardContext<'_, TestTag, Host>| ctx.host.cows_in_range > 0)
            .then(|host: &mut Host| host.log.push("beam"))
            .build()
            .unwrap();

        let timers = TimerBank::new(0);
        let mut host = Host {
            cows_in_range: 2,
            log: Vec::new(),
        };
        let can_fire = edge.transition.can_fire(&GuardContext {
            host: &host,
            timers: &timers,
            current: TestTag::Patrol,
            time_in_state: 0.0,
        });
        assert!(can_fire);
        assert_eq!(edge.source, Source::State(TestTag::Patrol));

        if let Some(action) = edge.transition.action.as_mut() {
            action(&mut host);
        }
        assert_eq!(host.log, vec!["beam"]);
    }
}
