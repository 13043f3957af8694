//! Everything the corridor lock protects, and the bookkeeping on it.
//!
//! Nothing here blocks or sleeps; `corridor.rs` owns the waiting.  Every
//! method runs with the lock held, on the calling mover's own thread.

use hv_core::{CorridorConfig, MoverId, SimRng};
use hv_grid::{Cell, FreeLanes, GridResult, MoverRegistry, OccupancyGrid};
use tracing::{info, warn};

use crate::control::StopLatch;
use crate::{Mover, PathError, StepOutcome};

/// Result of checking the entry barrier for one mover.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub(crate) enum Barrier {
    /// Not enough movers inside yet.
    Wait,
    /// This mover's generation was already released.
    Released,
    /// A traversal is running and the threshold is met: the mover joins it.
    /// Earlier waiters may have been handed the turn, so the caller must wake
    /// them too.
    Joined,
    /// This check filled the barrier and handed the turn to the head of the
    /// arrival order.  The caller must wake the other barrier waiters.
    Opened,
}

pub(crate) struct PathState {
    pub(crate) grid:   OccupancyGrid,
    pub(crate) lanes:  FreeLanes,
    pub(crate) movers: MoverRegistry,

    /// Mover allowed to take the next step.  `None` until a barrier fills and
    /// again once the corridor empties.
    pub(crate) turn: Option<MoverId>,

    /// Bumped every time the barrier opens.  Movers registered under an
    /// older generation have been released.
    pub(crate) generation: u64,

    pub(crate) stop:  StopLatch,
    pub(crate) ended: bool,
    pub(crate) rng:   SimRng,
}

impl PathState {
    pub(crate) fn new(config: &CorridorConfig) -> Self {
        Self {
            grid:       OccupancyGrid::new(config.path_size, config.lane_capacity),
            lanes:      FreeLanes::new(config.path_size, config.lane_capacity),
            movers:     MoverRegistry::new(config.mover_capacity),
            turn:       None,
            generation: 0,
            stop:       StopLatch::default(),
            ended:      false,
            rng:        SimRng::new(config.seed),
        }
    }

    // ── Entry ─────────────────────────────────────────────────────────────

    /// Signal that refuses a new entry outright, if any.
    ///
    /// A draining soft stop turns newcomers away without touching the
    /// countdown, which only counts movers that were inside when it armed.
    pub(crate) fn entry_refusal(&self) -> Option<PathError> {
        if self.ended {
            return Some(PathError::SimulationEnded);
        }
        if self.stop.is_armed() {
            return Some(PathError::StopHarvest);
        }
        None
    }

    /// Register `mover` and place it one step into the corridor.
    ///
    /// Rolls the registration back if placement fails.
    pub(crate) fn admit(
        &mut self,
        mover:  &Mover,
        config: &CorridorConfig,
        step:   u32,
    ) -> Result<Cell, PathError> {
        let id = mover.id();
        if self.movers.contains(id) {
            return Err(PathError::AlreadyInside(id));
        }
        if self.movers.len() >= config.lane_capacity {
            return Err(PathError::CorridorFull { capacity: config.lane_capacity });
        }
        let direction = mover.direction();
        let generation = self.generation;
        self.movers
            .register(id, direction, direction.entry_depth(config.path_size), generation)?;

        match self.move_by(id, step, config) {
            Ok(StepOutcome::Moved(cell)) => Ok(cell),
            Ok(StepOutcome::Exited) => {
                self.movers.remove(id)?;
                Err(PathError::NotInside(id))
            }
            Err(e) => {
                self.movers.remove(id)?;
                Err(e.into())
            }
        }
    }

    /// Check the entry barrier for `mover`, opening it if this check fills it.
    pub(crate) fn barrier(&mut self, mover: MoverId, required: usize) -> Barrier {
        let Some(slot) = self.movers.get(mover) else {
            return Barrier::Wait;
        };
        if slot.generation < self.generation {
            return Barrier::Released;
        }
        if self.movers.len() < required {
            return Barrier::Wait;
        }
        if self.turn.is_some() {
            return Barrier::Joined;
        }
        self.turn = self.movers.head();
        self.generation += 1;
        Barrier::Opened
    }

    // ── Movement ──────────────────────────────────────────────────────────

    /// Move `mover` by `steps` slots in its direction.
    ///
    /// Stepping outside the grid only releases the held cell; stepping inside
    /// takes a random free lane at the new depth first, then releases the old
    /// cell, then occupies the new one.
    pub(crate) fn move_by(
        &mut self,
        mover:  MoverId,
        steps:  u32,
        config: &CorridorConfig,
    ) -> GridResult<StepOutcome> {
        let slot = self.movers.slot_mut(mover)?;
        let new_depth = slot.direction.apply(slot.depth, steps);
        let previous = slot.cell;

        if !config.in_bounds(new_depth) {
            slot.depth = new_depth;
            slot.cell = None;
            if let Some(cell) = previous {
                self.grid.release(cell);
                self.lanes.release(cell.depth, cell.lane)?;
            }
            return Ok(StepOutcome::Exited);
        }

        let depth = new_depth as usize;
        let lane = self.lanes.take_random(depth, &mut self.rng)?;
        if let Some(cell) = previous {
            self.grid.release(cell);
            self.lanes.release(cell.depth, cell.lane)?;
        }
        let cell = Cell::new(depth, lane);
        self.grid.occupy(cell, mover)?;
        slot.depth = new_depth;
        slot.cell = Some(cell);
        Ok(StepOutcome::Moved(cell))
    }

    /// Hand the turn to the mover after `mover` in arrival order, if anyone
    /// else is inside.  Returns the new holder.
    pub(crate) fn pass_turn(&mut self, mover: MoverId) -> Option<MoverId> {
        if self.movers.len() <= 1 {
            return None;
        }
        let next = self.movers.next_after(mover)?;
        self.turn = Some(next);
        if let Some(slot) = self.movers.get(next) {
            slot.condition().notify_all();
        }
        Some(next)
    }

    /// Drop `mover` after it stepped out of the corridor.
    ///
    /// A mover that leaves on its own while a soft stop drains still counts
    /// towards the countdown.
    pub(crate) fn retire(&mut self, mover: MoverId) -> GridResult<()> {
        self.release_cell(mover)?;
        self.movers.remove(mover)?;
        if self.stop.is_armed() && self.stop.acknowledge() {
            info!("soft stop drained");
        }
        if self.movers.is_empty() {
            self.turn = None;
        }
        Ok(())
    }

    // ── Cancellation ──────────────────────────────────────────────────────

    /// The cancellation check run at every wait point.
    ///
    /// On a soft stop the mover is unwound here, on its own thread, and the
    /// returned error is what the caller propagates.
    pub(crate) fn cancellation(&mut self, mover: &mut Mover) -> Option<PathError> {
        if self.stop.is_armed() {
            if let Err(e) = self.unwind(mover.id()) {
                return Some(e.into());
            }
            if self.stop.acknowledge() {
                info!("soft stop drained; corridor reusable");
            }
            if mover.direction().is_reverse() && mover.cargo() > 0 {
                warn!(mover = %mover.id(), cargo = mover.cargo(), "discarding cargo on stop");
                mover.discard_cargo();
            }
            return Some(PathError::StopHarvest);
        }
        if self.ended {
            return Some(PathError::SimulationEnded);
        }
        None
    }

    /// Release everything `mover` holds and forget it.
    fn unwind(&mut self, mover: MoverId) -> GridResult<()> {
        let successor = if self.turn == Some(mover) && self.movers.len() > 1 {
            self.movers.next_after(mover)
        } else {
            None
        };
        self.release_cell(mover)?;
        self.movers.remove(mover)?;
        if self.turn == Some(mover) {
            self.turn = successor;
            if let Some(next) = successor.and_then(|id| self.movers.get(id)) {
                next.condition().notify_all();
            }
        }
        if self.movers.is_empty() {
            self.turn = None;
        }
        warn!(mover = %mover, "mover unwound");
        Ok(())
    }

    fn release_cell(&mut self, mover: MoverId) -> GridResult<()> {
        let slot = self.movers.slot_mut(mover)?;
        if let Some(cell) = slot.cell.take() {
            self.grid.release(cell);
            self.lanes.release(cell.depth, cell.lane)?;
        }
        Ok(())
    }
}
