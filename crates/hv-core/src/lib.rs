//! `hv-core` — foundational types for the harvest corridor workspace.
//!
//! This crate is a dependency of every other `hv-*` crate.  It has no `hv-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `MoverId`                                             |
//! | [`direction`]   | `Direction` (forward / reverse trip)                  |
//! | [`config`]      | `CorridorConfig`, `PauseMode`                         |
//! | [`rng`]         | `SimRng`                                              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod direction;
pub mod error;
pub mod ids;
pub mod rng;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CorridorConfig, PauseMode};
pub use direction::Direction;
pub use error::{CoreError, CoreResult};
pub use ids::MoverId;
pub use rng::SimRng;
