//! `hv-path` — the corridor monitor.
//!
//! # Protocol
//!
//! ```text
//! mover thread, per trip:
//!   ① enter    — place one step in on a random boundary lane,
//!                wait until `required_movers` are inside (barrier);
//!                the mover that fills the barrier hands the turn to the
//!                first arrival.
//!   ② advance  — loop: wait for the turn, step [1, max_steps] slots into a
//!                random free lane, pass the turn on in arrival order;
//!                ends when the step lands outside the grid.
//!
//! coordinator thread, any time:
//!   control(StopHarvest)   — every mover inside unwinds at its next wait
//!                            point and gets `StopHarvest`; the corridor is
//!                            reusable once the last one has.
//!   control(EndSimulation) — every waiter gets `SimulationEnded`, forever.
//! ```
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`corridor`]  | `Corridor<S>` monitor, `StepOutcome`                       |
//! | [`builder`]   | `CorridorBuilder`                                          |
//! | [`control`]   | `ControlAction`, `StopLatch`                               |
//! | [`mover`]     | `Mover` — the caller-side handle                           |
//! | [`sink`]      | `PositionSink` trait, `NoopSink`                           |
//! | [`snapshot`]  | `CorridorSnapshot`, invariant checks                       |
//! | [`error`]     | `PathError`, `PathResult<T>`                               |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hv_core::{CorridorConfig, Direction, MoverId};
//! use hv_path::{CorridorBuilder, Mover};
//!
//! let corridor = CorridorBuilder::new().config(config).build()?;
//! let mut farmer = Mover::new(MoverId(0), seed);
//! farmer.heading(Direction::Forward);
//! corridor.enter(&mut farmer)?;
//! corridor.advance(&mut farmer)?;
//! ```

pub mod builder;
pub mod control;
pub mod corridor;
pub mod error;
pub mod mover;
pub mod sink;
pub mod snapshot;

mod state;


pub use builder::CorridorBuilder;
pub use control::{ControlAction, StopLatch};
pub use corridor::{Corridor, StepOutcome};
pub use error::{PathError, PathResult};
pub use mover::Mover;
pub use sink::{NoopSink, PositionSink};
pub use snapshot::{CorridorSnapshot, MoverPosition};
