//! Per-state timer bank.
//!
//! A bank is a fixed set of elapsed-time counters owned by one state. Slots
//! run independently: each can be paused, resumed, overwritten or cleared.
//! The machine advances the current state's active slots once per frame and
//! zeroes them right before the state is entered.

/// A single counter in a [`TimerBank`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimerSlot {
    pub value: f32,
    pub active: bool,
}

impl Default for TimerSlot {
    fn default() -> Self {
        Self {
            value: 0.0,
            active: true,
        }
    }
}

/// Fixed-size set of pausable elapsed-time counters.
///
/// Indices out of range panic: a state that reads a slot it never allocated
/// was built with the wrong slot count for its own logic.
///
/// # Example
///
/// ```rust
/// use superstate::core::TimerBank;
///
/// let mut timers = TimerBank::new(2);
/// timers.stop(1);
/// timers.tick_active(0.5);
///
/// assert_eq!(timers.get(0), 0.5);
/// assert_eq!(timers.get(1), 0.0);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimerBank {
    slots: Vec<TimerSlot>,
}

impl TimerBank {
    /// Create a bank with `slots` active counters at zero.
    pub fn new(slots: usize) -> Self {
        let mut bank = Self::default();
        bank.add_slots(slots);
        bank
    }

    /// Allocate `n` more active slots at zero.
    ///
    /// Only meant for construction; the machine sizes each bank once at
    /// registration.
    pub(crate) fn add_slots(&mut self, n: usize) {
        self.slots
            .extend(std::iter::repeat(TimerSlot::default()).take(n));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Resume accumulation on slot `i`, keeping its value.
    pub fn start(&mut self, i: usize) {
        self.slot_mut(i).active = true;
    }

    /// Pause accumulation on slot `i`, keeping its value.
    pub fn stop(&mut self, i: usize) {
        self.slot_mut(i).active = false;
    }

    pub fn is_active(&self, i: usize) -> bool {
        self.slot(i).active
    }

    pub fn get(&self, i: usize) -> f32 {
        self.slot(i).value
    }

    pub fn set(&mut self, i: usize, value: f32) {
        self.slot_mut(i).value = value;
    }

    pub fn clear(&mut self, i: usize) {
        self.slot_mut(i).value = 0.0;
    }

    /// Add `dt` to every active slot.
    pub fn tick_active(&mut self, dt: f32) {
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            slot.value += dt;
        }
    }

    /// Zero every active slot. Inactive slots keep their value.
    pub fn reset_active_to_zero(&mut self) {
        for slot in self.slots.iter_mut().filter(|s| s.active) {
            slot.value = 0.0;
        }
    }

    pub fn slots(&self) -> &[TimerSlot] {
        &self.slots
    }

    fn slot(&self, i: usize) -> &TimerSlot {
        let len = self.slots.len();
        self.slots
            .get(i)
            .unwrap_or_else(|| panic!("timer slot {i} out of range (bank has {len} slots)"))
    }

    fn slot_mut(&mut self, i: usize) -> &mut TimerSlot {
        let len = self.slots.len();
        self.slots
            .get_mut(i)
            .unwrap_or_else(|| panic!("timer slot {i} out of range (bank has {len} slots)"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_slots_are_active_and_zeroed() {
        let bank = TimerBank::new(3);
        assert_eq!(bank.len(), 3);
        for i in 0..3 {
            assert!(bank.is_active(i));
            assert_eq!(bank.get(i), 0.0);
        }
    }

    #[test]
    fn tick_active_skips_stopped_slots() {
        let mut bank = TimerBank::new(2);
        bank.stop(1);
        bank.tick_active(1.5);
        bank.tick_active(0.5);

        assert_eq!(bank.get(0), 2.0);
        assert_eq!(bank.get(1), 0.0);
    }

    #[test]
    fn stop_and_start_pause_without_resetting() {
        let mut bank = TimerBank::new(1);
        bank.tick_active(1.0);
        bank.stop(0);
        bank.tick_active(5.0);
        assert_eq!(bank.get(0), 1.0);

        bank.start(0);
        bank.tick_active(1.0);
        assert_eq!(bank.get(0), 2.0);
    }

    #[test]
    fn set_and_clear_overwrite_value() {
        let mut bank = TimerBank::new(1);
        bank.set(0, 7.25);
        assert_eq!(bank.get(0), 7.25);
        bank.clear(0);
        assert_eq!(bank.get(0), 0.0);
    }

    #[test]
    fn reset_leaves_inactive_slots_untouched() {
        let mut bank = TimerBank::new(2);
        bank.set(0, 3.0);
        bank.set(1, 4.0);
        bank.stop(1);

        bank.reset_active_to_zero();

        assert_eq!(bank.get(0), 0.0);
        assert_eq!(bank.get(1), 4.0);
    }

    #[test]
    fn empty_bank_ticks_and_resets() {
        let mut bank = TimerBank::new(0);
        assert!(bank.is_empty());
        bank.tick_active(1.0);
        bank.reset_active_to_zero();
        assert!(bank.slots().is_empty());
    }

    #[test]
    #[should_panic(expected = "timer slot 2 out of range")]
    fn out_of_range_read_panics() {
        let bank = TimerBank::new(2);
        bank.get(2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn out_of_range_write_panics() {
        let mut bank = TimerBank::new(0);
        bank.start(0);
    }
}
