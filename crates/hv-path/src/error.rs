use hv_core::{CoreError, MoverId};
use hv_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PathError {
    /// The current harvest run was stopped.  The mover's corridor state has
    /// been unwound; the caller abandons this run and may enter again later.
    #[error("harvest run stopped")]
    StopHarvest,

    /// The simulation has ended.  The caller stops participating for good.
    #[error("simulation ended")]
    SimulationEnded,

    #[error("mover {0} is already inside the corridor")]
    AlreadyInside(MoverId),

    #[error("mover {0} is not inside the corridor")]
    NotInside(MoverId),

    #[error("corridor is full ({capacity} movers inside)")]
    CorridorFull { capacity: usize },

    #[error("unknown control action {0:?}")]
    UnknownAction(String),

    /// A mover panicked while holding the monitor lock.  Corridor state can
    /// no longer be trusted.
    #[error("corridor lock poisoned")]
    Poisoned,

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error(transparent)]
    Config(#[from] CoreError),
}

impl PathError {
    /// `true` for the recoverable end-of-run signal.
    #[inline]
    pub fn is_stop(&self) -> bool {
        matches!(self, PathError::StopHarvest)
    }

    /// `true` for the permanent shutdown signal.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, PathError::SimulationEnded)
    }
}

pub type PathResult<T> = Result<T, PathError>;
