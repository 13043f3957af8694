//! Corridor configuration.
//!
//! # Design
//!
//! The corridor is a fixed `path_size × lane_capacity` grid.  Depth 0 is the
//! standing-area end, depth `path_size - 1` the granary end.  All parameters
//! are fixed at monitor construction; a harvest run that needs different
//! parameters builds a new monitor.
//!
//! Delays are expressed in whole milliseconds, matching the knobs exposed by
//! the control center.

use std::time::Duration;

use crate::{CoreError, CoreResult, Direction};

// ── PauseMode ─────────────────────────────────────────────────────────────────

/// Whether the simulated delays run while the monitor lock is held.
///
/// `HoldLock` serializes every mover during each pause (all other movers,
/// and the coordinator, are blocked on the lock).  `Release` sleeps with the
/// lock dropped; the move itself and the turn hand-off still happen under
/// the lock, so turn order is identical in both modes.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PauseMode {
    HoldLock,
    #[default]
    Release,
}

// ── CorridorConfig ────────────────────────────────────────────────────────────

/// Parameters of one corridor monitor.
///
/// Typically filled in from the control center's harvest-run settings and
/// passed to `CorridorBuilder`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CorridorConfig {
    /// Number of depth slots a mover crosses.
    pub path_size: usize,

    /// Lanes per depth.  Also the maximum number of movers inside at once.
    pub lane_capacity: usize,

    /// Barrier threshold: movers wait in `enter` until this many are inside.
    pub required_movers: usize,

    /// Upper bound (inclusive) of the random step drawn on each turn.
    pub max_steps: u32,

    /// Upper bound (exclusive) of the random delay before each operation.
    /// `0` disables the delay.
    pub max_delay_ms: u64,

    /// Fixed pause after each placement.  `0` disables the pause.
    pub timeout_ms: u64,

    /// Size of the mover registry arena.  Every `MoverId` must be below it.
    pub mover_capacity: usize,

    /// Master RNG seed for lane and step draws.
    pub seed: u64,

    /// Whether simulated delays hold the monitor lock.
    pub pause_mode: PauseMode,
}

impl Default for CorridorConfig {
    fn default() -> Self {
        Self {
            path_size:       10,
            lane_capacity:   5,
            required_movers: 5,
            max_steps:       3,
            max_delay_ms:    100,
            timeout_ms:      100,
            mover_capacity:  64,
            seed:            0,
            pause_mode:      PauseMode::default(),
        }
    }
}

impl CorridorConfig {
    /// Reject configurations the monitor cannot run.
    pub fn validate(&self) -> CoreResult<()> {
        if self.path_size == 0 {
            return Err(CoreError::Config("path_size must be positive".into()));
        }
        if self.lane_capacity == 0 {
            return Err(CoreError::Config("lane_capacity must be positive".into()));
        }
        if self.required_movers == 0 {
            return Err(CoreError::Config("required_movers must be positive".into()));
        }
        if self.required_movers > self.lane_capacity {
            return Err(CoreError::Config(format!(
                "required_movers ({}) exceeds lane_capacity ({})",
                self.required_movers, self.lane_capacity
            )));
        }
        if self.required_movers > self.mover_capacity {
            return Err(CoreError::Config(format!(
                "required_movers ({}) exceeds mover_capacity ({})",
                self.required_movers, self.mover_capacity
            )));
        }
        if self.max_steps == 0 {
            return Err(CoreError::Config("max_steps must be at least 1".into()));
        }
        if i64::try_from(self.path_size).is_err() {
            return Err(CoreError::Config("path_size does not fit a signed depth".into()));
        }
        Ok(())
    }

    /// `true` if `depth` names a slot inside the grid.
    #[inline]
    pub fn in_bounds(&self, depth: i64) -> bool {
        depth >= 0 && (depth as u64) < self.path_size as u64
    }

    /// First depth a mover occupies after entering in `direction`.
    #[inline]
    pub fn boundary_depth(&self, direction: Direction) -> usize {
        match direction {
            Direction::Forward => 0,
            Direction::Reverse => self.path_size - 1,
        }
    }

    /// The fixed post-placement pause.
    #[inline]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
