//! `hv-grid` — the corridor's shared data model.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                      |
//! |---------------|---------------------------------------------------------------|
//! | [`grid`]      | `Cell`, `OccupancyGrid` — depth × lane matrix of mover ids    |
//! | [`lanes`]     | `FreeLanes` — per-depth list of unoccupied lanes              |
//! | [`registry`]  | `MoverRegistry` — arena of `MoverSlot`s + arrival order       |
//! | [`error`]     | `GridError`, `GridResult<T>`                                  |
//!
//! # Design notes
//!
//! None of these types synchronise anything.  They are plain data owned by
//! the corridor monitor and only ever touched while its lock is held, which
//! keeps every invariant checkable from a single-threaded test.
//!
//! The grid and the free-lane registry are two views of the same fact and
//! must always agree: for every depth `d`, `free(d)` and the occupied lanes
//! of `d` partition `0..lane_capacity`.

pub mod error;
pub mod grid;
pub mod lanes;
pub mod registry;

#[cfg(test)]
mod tests;

pub use error::{GridError, GridResult};
pub use grid::{Cell, OccupancyGrid};
pub use lanes::FreeLanes;
pub use registry::{MoverRegistry, MoverSlot};
