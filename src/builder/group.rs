//! Builder for superstate groups.

use crate::builder::error::BuildError;
use crate::core::Tag;
use crate::runtime::{GroupCallback, StateGroup};

/// Builder for [`StateGroup`]s.
///
/// # Example
///
/// ```
/// use superstate::builder::GroupBuilder;
/// use superstate::state_tags;
///
/// state_tags! {
///     enum LassoTag {
///         Idle,
///         Swinging,
///         Thrown,
///         Reeling,
///     }
/// }
///
/// struct Lasso {
///     rope_visible: bool,
/// }
///
/// let group = GroupBuilder::new("rope out")
///     .members([LassoTag::Thrown, LassoTag::Reeling])
///     .on_enter(|lasso: &mut Lasso| lasso.rope_visible = true)
///     .on_exit(|lasso: &mut Lasso| lasso.rope_visible = false)
///     .build()
///     .unwrap();
///
/// assert!(group.contains(LassoTag::Reeling));
/// assert!(!group.contains(LassoTag::Swinging));
/// ```
pub struct GroupBuilder<T: Tag, H> {
    name: String,
    members: Vec<T>,
    on_enter: Option<GroupCallback<H>>,
    on_exit: Option<GroupCallback<H>>,
}

impl<T: Tag, H> GroupBuilder<T, H> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: Vec::new(),
            on_enter: None,
            on_exit: None,
        }
    }

    /// Add a member tag. Abstract tags cover all of their descendants.
    pub fn member(mut self, tag: T) -> Self {
        self.members.push(tag);
        self
    }

    pub fn members(mut self, tags: impl IntoIterator<Item = T>) -> Self {
        self.members.extend(tags);
        self
    }

    pub fn on_enter<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut H) + 'static,
    {
        self.on_enter = Some(Box::new(callback));
        self
    }

    pub fn on_exit<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut H) + 'static,
    {
        self.on_exit = Some(Box::new(callback));
        self
    }

    /// Build the group. A group without members could never activate.
    pub fn build(self) -> Result<StateGroup<T, H>, BuildError> {
        if self.members.is_empty() {
            return Err(BuildError::EmptyGroup { name: self.name });
        }

        let mut group = StateGroup::new(self.name, self.members);
        group.set_callbacks(self.on_enter, self.on_exit);
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::State;
    use crate::runtime::Machine;
    use crate::state_tags;

    state_tags! {
        enum TestTag {
            Menu,
            Level,
            Paused,
        }
    }

    #[test]
    fn empty_group_is_rejected() {
        let result = GroupBuilder::<TestTag, ()>::new("nothing").build();
        assert!(matches!(result, Err(BuildError::EmptyGroup { name }) if name == "nothing"));
    }

    #[test]
    fn builder_collects_members() {
        let group = GroupBuilder::<TestTag, ()>::new("in game")
            .member(TestTag::Level)
            .members([TestTag::Paused])
            .build()
            .unwrap();

        assert_eq!(group.name(), "in game");
        assert_eq!(group.members(), &[TestTag::Level, TestTag::Paused]);
        assert!(!group.contains(TestTag::Menu));
    }

    #[derive(Default)]
    struct Screen {
        overlay: bool,
        toggles: u32,
    }

    struct Still;
    impl State<TestTag, Screen> for Still {}

    #[test]
    fn built_group_keeps_its_callbacks() {
        let group = GroupBuilder::new("overlay")
            .members([TestTag::Level, TestTag::Paused])
            .on_enter(|s: &mut Screen| {
                s.overlay = true;
                s.toggles += 1;
            })
            .on_exit(|s: &mut Screen| {
                s.overlay = false;
                s.toggles += 1;
            })
            .build()
            .unwrap();

        let mut machine = Machine::new(TestTag::Menu, Still).unwrap();
        machine.add_state(TestTag::Level, Still).unwrap();
        machine.add_state(TestTag::Paused, Still).unwrap();
        machine.add_state_group(group);
        let mut screen = Screen::default();
        machine.initialize(&mut screen).unwrap();

        machine.request_transition(&mut screen, TestTag::Level).unwrap();
        machine.request_transition(&mut screen, TestTag::Paused).unwrap();
        assert!(screen.overlay);

        machine.request_transition(&mut screen, TestTag::Menu).unwrap();
        assert!(!screen.overlay);
        assert_eq!(screen.toggles, 2);
    }
}
