//! Coordinator-facing control signals and the soft-stop countdown.

use std::fmt;
use std::str::FromStr;

use crate::PathError;

// ── ControlAction ─────────────────────────────────────────────────────────────

/// A signal from the control center.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ControlAction {
    /// Abandon the current harvest run.  Recoverable.
    StopHarvest,
    /// Shut the simulation down.  Permanent.
    EndSimulation,
}

impl ControlAction {
    /// The control-center wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            ControlAction::StopHarvest   => "stopHarvest",
            ControlAction::EndSimulation => "endSimulation",
        }
    }
}

impl fmt::Display for ControlAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlAction {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "stopHarvest"   => Ok(ControlAction::StopHarvest),
            "endSimulation" => Ok(ControlAction::EndSimulation),
            other           => Err(PathError::UnknownAction(other.to_owned())),
        }
    }
}

// ── StopLatch ─────────────────────────────────────────────────────────────────

/// Countdown of movers that still have to observe a soft stop.
///
/// Armed with the number of movers inside when the stop arrives; each mover
/// that unwinds (or leaves the corridor normally) acknowledges once.  The
/// acknowledgement that reaches zero disarms the latch, which is what makes
/// the monitor reusable for the next run.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct StopLatch {
    pending: Option<usize>,
}

impl StopLatch {
    /// Arm the latch for `count` movers.  Arming with zero is a no-op.
    ///
    /// Re-arming while armed replaces the countdown.
    pub fn arm(&mut self, count: usize) {
        if count > 0 {
            self.pending = Some(count);
        }
    }

    #[inline]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Movers still expected to acknowledge (`0` when disarmed).
    #[inline]
    pub fn pending(&self) -> usize {
        self.pending.unwrap_or(0)
    }

    /// Record one mover's acknowledgement.
    ///
    /// Returns `true` if this acknowledgement disarmed the latch.
    pub fn acknowledge(&mut self) -> bool {
        match self.pending {
            Some(n) if n > 1 => {
                self.pending = Some(n - 1);
                false
            }
            Some(_) => {
                self.pending = None;
                true
            }
            None => false,
        }
    }

    /// Disarm unconditionally.
    pub fn clear(&mut self) {
        self.pending = None;
    }
}
