//! Lasso Groups
//!
//! This example shows superstate groups and abstract tag requests on a
//! wrangler throwing a lasso at a herd animal.
//!
//! Key concepts:
//! - Nested groups entered and exited as the current state moves
//! - Group callbacks owning shared visuals (the rope, a carry proxy)
//! - Requesting an abstract category and letting the machine pick a state
//! - States requesting their own way out
//!
//! Run with: RUST_LOG=superstate=debug cargo run --example lasso_groups

use superstate::builder::{timed_transition, GroupBuilder, StateMachineBuilder};
use superstate::core::{State, StateContext, Tag};
use superstate::runtime::TransitionOutcome;
use superstate::state_tags;
use tracing_subscriber::EnvFilter;

state_tags! {
    enum WranglerTag {
        Idle,
        Swinging,
        Thrown,
        Reeling,
        Wrangling,
        Dragging: Wrangling,
        Carrying: Wrangling,
    }
    categories: [Wrangling]
}

#[derive(Default)]
struct Wrangler {
    arm_raised: bool,
    rope_visible: bool,
    proxy_spawned: bool,
    catch_ready: bool,
}

struct Quiet;

impl State<WranglerTag, Wrangler> for Quiet {}

struct Reeling;

impl State<WranglerTag, Wrangler> for Reeling {
    fn tick(&mut self, ctx: &mut StateContext<'_, WranglerTag, Wrangler>) {
        if ctx.host().catch_ready {
            ctx.request_transition(WranglerTag::Wrangling);
        }
    }
}

struct Carrying {
    put_down_after: f32,
}

impl State<WranglerTag, Wrangler> for Carrying {
    fn timer_slots(&self) -> usize {
        1
    }

    fn tick(&mut self, ctx: &mut StateContext<'_, WranglerTag, Wrangler>) {
        if ctx.timers().get(0) > self.put_down_after {
            ctx.request_transition(WranglerTag::Idle);
        }
    }
}

fn report(label: &str, wrangler: &Wrangler, groups: &[String]) {
    println!(
        "{label:<28} arm={} rope={} proxy={} groups={groups:?}",
        wrangler.arm_raised, wrangler.rope_visible, wrangler.proxy_spawned
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    println!("=== Lasso Groups ===\n");

    let mut machine = StateMachineBuilder::new()
        .initial(WranglerTag::Idle, Quiet)
        .state(WranglerTag::Swinging, Quiet)
        .state(WranglerTag::Thrown, Quiet)
        .state(WranglerTag::Reeling, Reeling)
        .state(WranglerTag::Dragging, Quiet)
        .state(WranglerTag::Carrying, Carrying { put_down_after: 1.0 })
        .add_edge(timed_transition(WranglerTag::Swinging, WranglerTag::Thrown, 0.4))
        .add_edge(timed_transition(WranglerTag::Thrown, WranglerTag::Reeling, 0.4))
        .group(
            GroupBuilder::new("arm raised")
                .members([
                    WranglerTag::Swinging,
                    WranglerTag::Thrown,
                    WranglerTag::Reeling,
                ])
                .on_enter(|w: &mut Wrangler| w.arm_raised = true)
                .on_exit(|w: &mut Wrangler| w.arm_raised = false),
        )
        .unwrap()
        .group(
            GroupBuilder::new("rope out")
                .members([WranglerTag::Thrown, WranglerTag::Reeling])
                .on_enter(|w: &mut Wrangler| w.rope_visible = true)
                .on_exit(|w: &mut Wrangler| w.rope_visible = false),
        )
        .unwrap()
        .group(
            GroupBuilder::new("wrangling")
                .member(WranglerTag::Wrangling)
                .on_enter(|w: &mut Wrangler| w.proxy_spawned = true)
                .on_exit(|w: &mut Wrangler| w.proxy_spawned = false),
        )
        .unwrap()
        .build()
        .unwrap();

    let mut wrangler = Wrangler::default();
    machine.initialize(&mut wrangler).unwrap();
    report("idle", &wrangler, &machine.active_groups());

    let outcome = machine
        .request_transition(&mut wrangler, WranglerTag::Swinging)
        .unwrap();
    report(&format!("{outcome:?}"), &wrangler, &machine.active_groups());

    for _ in 0..6 {
        let result = machine.tick(&mut wrangler, 0.25).unwrap();
        if result.is_transitioned() {
            report(machine.current_tag().name(), &wrangler, &machine.active_groups());
        }
    }

    println!("\nThe rope catches; Reeling asks for any wrangling state.");
    wrangler.catch_ready = true;
    machine.tick(&mut wrangler, 0.25).unwrap();
    report(
        &format!("now {:?}", machine.current_tag()),
        &wrangler,
        &machine.active_groups(),
    );

    // Asking for the category again while already inside it does nothing.
    let again = machine
        .request_transition(&mut wrangler, WranglerTag::Wrangling)
        .unwrap();
    assert_eq!(again, TransitionOutcome::AlreadyActive);

    println!("\nPicking the animal up switches states inside the same group.");
    let carry = machine
        .request_transition(&mut wrangler, WranglerTag::Carrying)
        .unwrap();
    report(&format!("{carry:?}"), &wrangler, &machine.active_groups());

    while machine.current_tag() != WranglerTag::Idle {
        machine.tick(&mut wrangler, 0.5).unwrap();
    }
    report("put down", &wrangler, &machine.active_groups());

    println!("\nPath taken: {:?}", machine.history().get_path());
    println!("\n=== Example Complete ===");
}
