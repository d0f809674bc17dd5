//! Animal AI
//!
//! This example drives a simple creature through idle, run and dead states.
//!
//! Key concepts:
//! - Per-state timers gating a local transition
//! - An any-state transition overriding local ones
//! - Transition actions running before the switch
//! - Inspecting history after the run
//!
//! Run with: RUST_LOG=superstate=debug cargo run --example animal_ai

use superstate::builder::{StateMachineBuilder, TransitionBuilder};
use superstate::core::{GuardContext, State, StateContext};
use superstate::state_tags;
use tracing_subscriber::EnvFilter;

state_tags! {
    enum AnimalTag {
        Idle,
        Run,
        Dead,
    }
}

struct Animal {
    health: i32,
    speed: f32,
    distance: f32,
}

struct Idle;

impl State<AnimalTag, Animal> for Idle {
    fn timer_slots(&self) -> usize {
        1
    }

    fn on_enter(&mut self, ctx: &mut StateContext<'_, AnimalTag, Animal>) {
        ctx.host_mut().speed = 0.0;
        println!("  idle: catching breath");
    }
}

struct Run;

impl State<AnimalTag, Animal> for Run {
    fn on_enter(&mut self, ctx: &mut StateContext<'_, AnimalTag, Animal>) {
        ctx.host_mut().speed = 4.0;
        println!("  run: off it goes");
    }

    fn tick(&mut self, ctx: &mut StateContext<'_, AnimalTag, Animal>) {
        let animal = ctx.host_mut();
        animal.distance += animal.speed;
        animal.health -= 3;
        println!(
            "  run: distance {:.1}, health {}",
            animal.distance, animal.health
        );
    }
}

struct Dead;

impl State<AnimalTag, Animal> for Dead {
    fn on_enter(&mut self, ctx: &mut StateContext<'_, AnimalTag, Animal>) {
        ctx.host_mut().speed = 0.0;
        println!("  dead: lies still");
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    println!("=== Animal AI ===\n");

    let mut machine = StateMachineBuilder::new()
        .initial(AnimalTag::Idle, Idle)
        .state(AnimalTag::Run, Run)
        .state(AnimalTag::Dead, Dead)
        .transition(
            TransitionBuilder::new()
                .from(AnimalTag::Idle)
                .to(AnimalTag::Run)
                .when(|ctx: &GuardContext<'_, AnimalTag, Animal>| ctx.timers.get(0) > 2.0),
        )
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .from(AnimalTag::Run)
                .to(AnimalTag::Idle)
                .when(|ctx: &GuardContext<'_, AnimalTag, Animal>| ctx.time_in_state > 1.5)
                .then(|animal: &mut Animal| animal.health += 1),
        )
        .unwrap()
        .transition(
            TransitionBuilder::new()
                .from_any()
                .to(AnimalTag::Dead)
                .when(|ctx: &GuardContext<'_, AnimalTag, Animal>| ctx.host.health <= 0),
        )
        .unwrap()
        .build()
        .unwrap();

    let mut animal = Animal {
        health: 12,
        speed: 0.0,
        distance: 0.0,
    };

    machine.initialize(&mut animal).unwrap();

    for frame in 1..=20 {
        let result = machine.tick(&mut animal, 0.5).unwrap();
        if result.is_transitioned() {
            println!("frame {frame}: {result:?}");
        }
        if machine.current_tag() == AnimalTag::Dead {
            break;
        }
    }

    println!("\nPath taken: {:?}", machine.history().get_path());
    match machine.snapshot().to_json() {
        Ok(json) => println!("\nFinal snapshot:\n{json}"),
        Err(err) => eprintln!("snapshot failed: {err}"),
    }

    println!("\n=== Example Complete ===");
}
