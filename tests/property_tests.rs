//! Property-based tests for the machine runtime.
//!
//! These tests use proptest to drive machines through random request and
//! tick sequences and check the bookkeeping invariants after every step.

use proptest::prelude::*;
use superstate::core::{GuardContext, State, Tag};
use superstate::runtime::{Machine, StateGroup, TickResult, TransitionOutcome};
use superstate::state_tags;

state_tags! {
    enum TestTag {
        S0,
        S1,
        S2,
        S3,
        Wrangled,
        Lassoed: Wrangled,
        Carried: Wrangled,
    }
    categories: [Wrangled]
}

const GROUPS: [&str; 3] = ["outer", "inner", "wrangling"];

#[derive(Default)]
struct Host {
    enters: [u32; 3],
    exits: [u32; 3],
    alarm: bool,
}

struct Timed;

impl State<TestTag, Host> for Timed {
    fn timer_slots(&self) -> usize {
        1
    }
}

fn counting_group(index: usize, members: Vec<TestTag>) -> StateGroup<TestTag, Host> {
    StateGroup::new(GROUPS[index], members)
        .with_on_enter(move |h: &mut Host| h.enters[index] += 1)
        .with_on_exit(move |h: &mut Host| h.exits[index] += 1)
}

fn machine() -> Machine<TestTag, Host> {
    let mut machine = Machine::new(TestTag::S0, Timed).unwrap();
    for tag in [
        TestTag::S1,
        TestTag::S2,
        TestTag::S3,
        TestTag::Lassoed,
        TestTag::Carried,
    ] {
        machine.add_state(tag, Timed).unwrap();
    }
    machine.add_state_group(counting_group(0, vec![TestTag::S1, TestTag::S2]));
    machine.add_state_group(counting_group(1, vec![TestTag::S1]));
    machine.add_state_group(counting_group(2, vec![TestTag::Wrangled]));
    machine
}

prop_compose! {
    fn arbitrary_target()(variant in 0..7u8) -> TestTag {
        match variant {
            0 => TestTag::S0,
            1 => TestTag::S1,
            2 => TestTag::S2,
            3 => TestTag::S3,
            4 => TestTag::Wrangled,
            5 => TestTag::Lassoed,
            _ => TestTag::Carried,
        }
    }
}

proptest! {
    #[test]
    fn group_callbacks_stay_balanced(
        targets in prop::collection::vec(arbitrary_target(), 1..40)
    ) {
        let mut machine = machine();
        let mut host = Host::default();
        machine.initialize(&mut host).unwrap();

        for target in targets {
            machine.request_transition(&mut host, target).unwrap();
            let current = machine.current_tag();

            for (i, name) in GROUPS.iter().enumerate() {
                let open = host.enters[i] - host.exits[i];
                prop_assert!(open <= 1);
                prop_assert_eq!(open == 1, machine.is_group_active(name));
            }

            // The innermost active group always contains the current state.
            if let Some(top) = machine.active_groups().last() {
                let members: &[TestTag] = match top.as_str() {
                    "outer" => &[TestTag::S1, TestTag::S2],
                    "inner" => &[TestTag::S1],
                    _ => &[TestTag::Wrangled],
                };
                prop_assert!(members.iter().any(|&m| current.descends_from(m)));
            }
        }
    }

    #[test]
    fn current_state_satisfies_every_resolved_request(
        targets in prop::collection::vec(arbitrary_target(), 1..40)
    ) {
        let mut machine = machine();
        let mut host = Host::default();
        machine.initialize(&mut host).unwrap();

        for target in targets {
            let before = machine.current_tag();
            let outcome = machine.request_transition(&mut host, target).unwrap();
            let after = machine.current_tag();

            prop_assert!(after.descends_from(target));
            prop_assert!(!after.is_abstract());
            match outcome {
                TransitionOutcome::Transitioned { from, to } => {
                    prop_assert_eq!(from, before);
                    prop_assert_eq!(to, after);
                    prop_assert_eq!(machine.time_in_state(), 0.0);
                }
                TransitionOutcome::AlreadyActive => prop_assert_eq!(before, after),
                TransitionOutcome::Unresolved => prop_assert!(false, "every target is registered"),
            }
        }
    }

    #[test]
    fn re_requesting_current_state_is_a_no_op(
        targets in prop::collection::vec(arbitrary_target(), 1..20),
        dt in 0.01f32..1.0
    ) {
        let mut machine = machine();
        let mut host = Host::default();
        machine.initialize(&mut host).unwrap();

        for target in targets {
            machine.request_transition(&mut host, target).unwrap();
            machine.tick(&mut host, dt).unwrap();
            let time = machine.time_in_state();
            let history = machine.history().len();
            let current = machine.current_tag();

            let outcome = machine.request_transition(&mut host, current).unwrap();

            prop_assert_eq!(outcome, TransitionOutcome::AlreadyActive);
            prop_assert_eq!(machine.time_in_state(), time);
            prop_assert_eq!(machine.history().len(), history);
        }
    }

    #[test]
    fn timers_track_time_in_state(
        frames in prop::collection::vec((0.01f32..0.5, any::<bool>()), 1..60)
    ) {
        let mut machine = Machine::new(TestTag::S0, Timed).unwrap();
        machine.add_state(TestTag::S1, Timed).unwrap();
        machine
            .add_any_transition(TestTag::S1, |ctx: &GuardContext<'_, TestTag, Host>| ctx.host.alarm)
            .unwrap();
        machine
            .add_transition(TestTag::S1, TestTag::S0, |ctx: &GuardContext<'_, TestTag, Host>| {
                !ctx.host.alarm && ctx.time_in_state > 0.3
            })
            .unwrap();
        let mut host = Host::default();
        machine.initialize(&mut host).unwrap();

        for (dt, alarm) in frames {
            host.alarm = alarm;
            let result = machine.tick(&mut host, dt).unwrap();
            let current = machine.current_tag();
            let timer = machine.timers(current).unwrap().get(0);

            if result.is_transitioned() {
                prop_assert_eq!(timer, 0.0);
                prop_assert_eq!(machine.time_in_state(), 0.0);
            }
            prop_assert_eq!(timer, machine.time_in_state());
            let self_loop =
                matches!(result, TickResult::Transitioned { from, to, .. } if from == to);
            prop_assert!(!self_loop);
        }
    }

    #[test]
    fn descends_from_agrees_with_ancestors(tag in arbitrary_target(), other in arbitrary_target()) {
        let via_chain = tag == other || tag.ancestors().any(|a| a == other);
        prop_assert_eq!(tag.descends_from(other), via_chain);
    }
}
