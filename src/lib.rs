//! Superstate: a hierarchical state machine runtime for gameplay code
//!
//! Superstate drives one host object through a set of states, once per
//! frame. Each tick it checks global ("any-state") transitions, then the
//! current state's own transitions, and keeps superstate groups and per-state
//! timers consistent as the current state changes.
//!
//! # Core Concepts
//!
//! - **Tag**: identity of a state, in a concrete/abstract hierarchy declared
//!   with [`state_tags!`]; requesting an abstract tag resolves to whichever
//!   registered state sits under it
//! - **State**: behavior with `on_enter`/`tick`/`on_exit` hooks and its own
//!   timer bank
//! - **Group**: a superstate entered and exited as the current state moves in
//!   and out of its members, stacked for nesting
//! - **Machine**: owns all of the above; the host is lent to it per call
//!
//! # Example
//!
//! ```rust
//! use superstate::builder::{StateMachineBuilder, TransitionBuilder};
//! use superstate::core::{GuardContext, State, StateContext};
//! use superstate::state_tags;
//!
//! state_tags! {
//!     enum AnimalTag {
//!         Idle,
//!         Run,
//!         Dead,
//!     }
//! }
//!
//! struct Animal {
//!     health: i32,
//!     speed: f32,
//! }
//!
//! struct Idle;
//! impl State<AnimalTag, Animal> for Idle {
//!     fn timer_slots(&self) -> usize {
//!         1
//!     }
//! }
//!
//! struct Run;
//! impl State<AnimalTag, Animal> for Run {
//!     fn on_enter(&mut self, ctx: &mut StateContext<'_, AnimalTag, Animal>) {
//!         ctx.host_mut().speed = 4.0;
//!     }
//! }
//!
//! struct Dead;
//! impl State<AnimalTag, Animal> for Dead {}
//!
//! let mut machine = StateMachineBuilder::new()
//!     .initial(AnimalTag::Idle, Idle)
//!     .state(AnimalTag::Run, Run)
//!     .state(AnimalTag::Dead, Dead)
//!     .transition(
//!         TransitionBuilder::new()
//!             .from(AnimalTag::Idle)
//!             .to(AnimalTag::Run)
//!             .when(|ctx: &GuardContext<'_, AnimalTag, Animal>| ctx.timers.get(0) > 2.0),
//!     )
//!     .unwrap()
//!     .transition(
//!         TransitionBuilder::new()
//!             .from_any()
//!             .to(AnimalTag::Dead)
//!             .when(|ctx: &GuardContext<'_, AnimalTag, Animal>| ctx.host.health <= 0),
//!     )
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let mut animal = Animal { health: 3, speed: 0.0 };
//! machine.initialize(&mut animal).unwrap();
//! for _ in 0..4 {
//!     machine.tick(&mut animal, 1.0).unwrap();
//! }
//! assert_eq!(machine.current_tag(), AnimalTag::Run);
//! assert_eq!(animal.speed, 4.0);
//!
//! animal.health = 0;
//! machine.tick(&mut animal, 0.5).unwrap();
//! assert_eq!(machine.current_tag(), AnimalTag::Dead);
//! ```

pub mod builder;
pub mod core;
pub mod runtime;

// Re-export commonly used types
pub use builder::{BuildError, GroupBuilder, StateMachineBuilder, TransitionBuilder};
pub use core::{Guard, GuardContext, State, StateContext, Tag, TimerBank};
pub use runtime::{Machine, MachineError, StateGroup, TickResult, TransitionOutcome};
