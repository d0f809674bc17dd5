//! Superstate groups and the stack that tracks which ones are active.

use crate::core::Tag;

/// Callback run when a group activates or deactivates.
pub type GroupCallback<H> = Box<dyn FnMut(&mut H)>;

/// A named set of member tags with enter/exit callbacks.
///
/// A group is active while the current state is one of its members. A member
/// tag matches itself and every tag below it, so an abstract member covers a
/// whole category.
pub struct StateGroup<T: Tag, H> {
    name: String,
    members: Vec<T>,
    on_enter: Option<GroupCallback<H>>,
    on_exit: Option<GroupCallback<H>>,
}

impl<T: Tag, H> StateGroup<T, H> {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = T>) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().collect(),
            on_enter: None,
            on_exit: None,
        }
    }

    pub fn with_on_enter<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut H) + 'static,
    {
        self.on_enter = Some(Box::new(callback));
        self
    }

    pub fn with_on_exit<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&mut H) + 'static,
    {
        self.on_exit = Some(Box::new(callback));
        self
    }

    /// Install already boxed callbacks, replacing any set before.
    pub(crate) fn set_callbacks(
        &mut self,
        on_enter: Option<GroupCallback<H>>,
        on_exit: Option<GroupCallback<H>>,
    ) {
        self.on_enter = on_enter;
        self.on_exit = on_exit;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[T] {
        &self.members
    }

    /// Whether `tag` is a member, directly or through an ancestor.
    pub fn contains(&self, tag: T) -> bool {
        self.members.iter().any(|&member| tag.descends_from(member))
    }

    fn enter(&mut self, host: &mut H) {
        tracing::debug!(group = %self.name, "entering state group");
        if let Some(callback) = self.on_enter.as_mut() {
            callback(host);
        }
    }

    fn exit(&mut self, host: &mut H) {
        tracing::debug!(group = %self.name, "exiting state group");
        if let Some(callback) = self.on_exit.as_mut() {
            callback(host);
        }
    }
}

/// Dormant pool plus the stack of active groups.
///
/// The empty stack is the sentinel base: it has no members, never exits, and
/// is where the unwinding loop stops.
pub(crate) struct GroupStack<T: Tag, H> {
    groups: Vec<StateGroup<T, H>>,
    dormant: Vec<usize>,
    active: Vec<usize>,
}

impl<T: Tag, H> Default for GroupStack<T, H> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            dormant: Vec::new(),
            active: Vec::new(),
        }
    }
}

impl<T: Tag, H> GroupStack<T, H> {
    pub(crate) fn add(&mut self, group: StateGroup<T, H>) {
        self.dormant.push(self.groups.len());
        self.groups.push(group);
    }

    /// Push the first dormant group that contains `target`, if any.
    pub(crate) fn activate_for(&mut self, host: &mut H, target: T) {
        let found = self
            .dormant
            .iter()
            .position(|&id| self.groups[id].contains(target));

        if let Some(index) = found {
            let id = self.dormant.remove(index);
            self.active.push(id);
            self.groups[id].enter(host);
        }
    }

    /// Pop groups off the top until the top contains `target` or only the
    /// sentinel base is left.
    pub(crate) fn unwind_for(&mut self, host: &mut H, target: T) {
        while let Some(&top) = self.active.last() {
            if self.groups[top].contains(target) {
                break;
            }
            self.active.pop();
            self.groups[top].exit(host);
            self.dormant.push(top);
        }
    }

    /// Names of the active groups, bottom of the stack first.
    pub(crate) fn active_names(&self) -> Vec<String> {
        self.active
            .iter()
            .map(|&id| self.groups[id].name.clone())
            .collect()
    }

    pub(crate) fn is_active(&self, name: &str) -> bool {
        self.active.iter().any(|&id| self.groups[id].name == name)
    }
}
