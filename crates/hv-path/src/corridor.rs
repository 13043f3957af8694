//! The `Corridor` monitor.

use std::sync::{Condvar, Mutex, MutexGuard};
use std::thread;
use std::time::Duration;

use hv_core::{CorridorConfig, MoverId, PauseMode};
use hv_grid::Cell;
use tracing::{debug, info};

use crate::state::{Barrier, PathState};
use crate::{ControlAction, CorridorSnapshot, Mover, NoopSink, PathError, PathResult, PositionSink};

/// Size of the step that carries a mover from outside onto the boundary row.
/// Every later step is drawn from `[1, max_steps]`.
const ENTRY_STEP: u32 = 1;

/// What a single turn did for the mover that took it.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// The mover now holds `Cell`.
    Moved(Cell),
    /// The mover stepped past the far edge and has left the corridor.
    Exited,
}

type Guard<'a> = MutexGuard<'a, PathState>;

// ── Corridor ──────────────────────────────────────────────────────────────────

/// A bounded `path_size × lane_capacity` corridor shared by mover threads.
///
/// Protocol, per mover and per trip:
///
/// 1. [`enter`](Self::enter) — take a random lane on the boundary row, then
///    wait until `required_movers` are inside (the barrier).
/// 2. [`advance`](Self::advance) — wait for the turn, step `[1, max_steps]`
///    slots into a random free lane, pass the turn on in arrival order; repeat
///    until past the far edge.
///
/// [`control`](Self::control) may be called from any thread at any time.  A
/// soft stop makes every mover inside unwind its own state at its next wait
/// point and fail with [`PathError::StopHarvest`]; an end-of-simulation makes
/// every waiter fail with [`PathError::SimulationEnded`].
///
/// All state sits behind one mutex.  The barrier has one shared condition;
/// every mover has its own condition for targeted turn hand-offs.
///
/// Create via [`CorridorBuilder`][crate::CorridorBuilder].
pub struct Corridor<S: PositionSink = NoopSink> {
    config:     CorridorConfig,
    state:      Mutex<PathState>,
    all_inside: Condvar,
    sink:       S,
}

impl<S: PositionSink> Corridor<S> {
    pub(crate) fn new(config: CorridorConfig, sink: S) -> Self {
        Self {
            state: Mutex::new(PathState::new(&config)),
            config,
            all_inside: Condvar::new(),
            sink,
        }
    }

    #[inline]
    pub fn config(&self) -> &CorridorConfig {
        &self.config
    }

    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    // ── Mover-facing API ──────────────────────────────────────────────────

    /// Enter the corridor in `mover.direction()` and wait at the barrier.
    ///
    /// # Errors
    ///
    /// - [`PathError::StopHarvest`] if a soft stop is draining or arrives
    ///   while waiting (the mover is unwound first).
    /// - [`PathError::SimulationEnded`] once the simulation has ended.
    /// - [`PathError::AlreadyInside`], [`PathError::CorridorFull`], or a grid
    ///   error for an id outside the registry capacity.
    pub fn enter(&self, mover: &mut Mover) -> PathResult<()> {
        let id = mover.id();
        let mut state = self.acquire(mover)?;
        if let Some(refusal) = state.entry_refusal() {
            return Err(refusal);
        }

        let cell = state.admit(mover, &self.config, ENTRY_STEP)?;
        self.sink.on_position_update(id, cell.lane, cell.depth);
        info!(mover = %id, direction = %mover.direction(), depth = cell.depth, lane = cell.lane, "mover entered");
        state = self.pause(state)?;

        loop {
            if let Some(err) = state.cancellation(mover) {
                self.report_cancel(id, &err);
                return Err(err);
            }
            match state.barrier(id, self.config.required_movers) {
                Barrier::Released => break,
                Barrier::Joined => {
                    debug!(mover = %id, turn = ?state.turn, "joined a running traversal");
                    self.all_inside.notify_all();
                    break;
                }
                Barrier::Opened => {
                    info!(mover = %id, turn = ?state.turn, inside = state.movers.len(), "barrier filled");
                    self.all_inside.notify_all();
                    break;
                }
                Barrier::Wait => {
                    state = self.all_inside.wait(state).map_err(|_| PathError::Poisoned)?;
                }
            }
        }
        Ok(())
    }

    /// Cross the corridor, one turn at a time, until stepping out.
    ///
    /// Must follow a successful [`enter`](Self::enter).  Returns `Ok(())` once
    /// the mover has left the grid.
    ///
    /// # Errors
    ///
    /// Same cancellation signals as [`enter`](Self::enter), plus
    /// [`PathError::NotInside`] if the mover never entered.
    pub fn advance(&self, mover: &mut Mover) -> PathResult<()> {
        let mut state = self.acquire(mover)?;
        loop {
            let (next, outcome) = self.take_turn(state, mover)?;
            if outcome == StepOutcome::Exited {
                return Ok(());
            }
            state = next;
        }
    }

    /// Take exactly one turn: wait for it, move, pass it on.
    ///
    /// [`advance`](Self::advance) is a loop over this; callers that want to
    /// interleave their own work between steps call it directly.
    pub fn step(&self, mover: &mut Mover) -> PathResult<StepOutcome> {
        let state = self.acquire(mover)?;
        let (_state, outcome) = self.take_turn(state, mover)?;
        Ok(outcome)
    }

    // ── Coordinator-facing API ────────────────────────────────────────────

    /// Deliver a control-center signal and wake every waiter.
    ///
    /// Never touches grid state itself; each mover unwinds on its own
    /// thread when it wakes.
    pub fn control(&self, action: ControlAction) -> PathResult<()> {
        let mut state = self.lock()?;
        match action {
            ControlAction::StopHarvest => {
                let inside = state.movers.len();
                state.stop.arm(inside);
                info!(inside, "stop harvest requested");
            }
            ControlAction::EndSimulation => {
                state.ended = true;
                info!("end of simulation requested");
            }
        }
        self.all_inside.notify_all();
        state.movers.notify_all();
        Ok(())
    }

    /// Parse a control-center wire string and deliver it.
    pub fn control_str(&self, action: &str) -> PathResult<()> {
        self.control(action.parse()?)
    }

    // ── Inspection ────────────────────────────────────────────────────────

    /// A consistent copy of the corridor state.
    pub fn snapshot(&self) -> PathResult<CorridorSnapshot> {
        let state = self.lock()?;
        Ok(CorridorSnapshot::capture(&state))
    }

    /// Number of movers currently inside.
    pub fn inside(&self) -> PathResult<usize> {
        Ok(self.lock()?.movers.len())
    }

    /// `true` once the simulation has ended.
    pub fn is_ended(&self) -> PathResult<bool> {
        Ok(self.lock()?.ended)
    }

    // ── Turn protocol ─────────────────────────────────────────────────────

    fn take_turn<'a>(
        &'a self,
        mut state: Guard<'a>,
        mover:     &mut Mover,
    ) -> PathResult<(Guard<'a>, StepOutcome)> {
        let id = mover.id();
        loop {
            if !state.movers.contains(id) {
                return Err(PathError::NotInside(id));
            }
            if let Some(err) = state.cancellation(mover) {
                self.report_cancel(id, &err);
                return Err(err);
            }
            if state.turn == Some(id) {
                break;
            }
            let condition = match state.movers.get(id) {
                Some(slot) => slot.condition(),
                None => return Err(PathError::NotInside(id)),
            };
            state = condition.wait(state).map_err(|_| PathError::Poisoned)?;
        }

        let steps = state.rng.step(self.config.max_steps);
        let outcome = state.move_by(id, steps, &self.config)?;
        match outcome {
            StepOutcome::Moved(cell) => {
                self.sink.on_position_update(id, cell.lane, cell.depth);
                debug!(mover = %id, steps, depth = cell.depth, lane = cell.lane, "mover stepped");
            }
            StepOutcome::Exited => {
                self.sink.on_leave(id);
                info!(mover = %id, steps, "mover left the corridor");
            }
        }

        state = self.pause_locked(state)?;
        let next = state.pass_turn(id);
        debug!(mover = %id, next = ?next, "turn passed");
        if outcome == StepOutcome::Exited {
            state.retire(id)?;
        }
        state = self.pause_released(state)?;
        Ok((state, outcome))
    }

    fn report_cancel(&self, mover: MoverId, err: &PathError) {
        if err.is_stop() {
            self.sink.on_leave(mover);
        }
        debug!(mover = %mover, error = %err, "wait interrupted");
    }

    // ── Locking and simulated delays ──────────────────────────────────────

    fn lock(&self) -> PathResult<Guard<'_>> {
        self.state.lock().map_err(|_| PathError::Poisoned)
    }

    /// Take the lock after the mover's random pre-action delay.
    fn acquire(&self, mover: &mut Mover) -> PathResult<Guard<'_>> {
        let delay = Duration::from_millis(mover.rng().delay_ms(self.config.max_delay_ms));
        match self.config.pause_mode {
            PauseMode::HoldLock => {
                let state = self.lock()?;
                sleep(delay);
                Ok(state)
            }
            PauseMode::Release => {
                sleep(delay);
                self.lock()
            }
        }
    }

    /// Post-placement pause, in whichever mode is configured.
    fn pause<'a>(&'a self, state: Guard<'a>) -> PathResult<Guard<'a>> {
        let state = self.pause_locked(state)?;
        self.pause_released(state)
    }

    /// Post-placement pause when delays hold the lock.
    fn pause_locked<'a>(&'a self, state: Guard<'a>) -> PathResult<Guard<'a>> {
        if self.config.pause_mode == PauseMode::HoldLock {
            sleep(self.config.timeout());
        }
        Ok(state)
    }

    /// Post-placement pause when delays release the lock.
    fn pause_released<'a>(&'a self, state: Guard<'a>) -> PathResult<Guard<'a>> {
        let timeout = self.config.timeout();
        if self.config.pause_mode != PauseMode::Release || timeout.is_zero() {
            return Ok(state);
        }
        drop(state);
        sleep(timeout);
        self.lock()
    }
}

fn sleep(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}
