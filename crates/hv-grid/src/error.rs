use hv_core::MoverId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("mover {mover} is outside the registry capacity {capacity}")]
    IdOutOfRange { mover: MoverId, capacity: usize },

    #[error("mover {0} is already registered")]
    AlreadyRegistered(MoverId),

    #[error("mover {0} is not registered")]
    NotRegistered(MoverId),

    #[error("depth {depth} is outside the grid (size {path_size})")]
    DepthOutOfRange { depth: usize, path_size: usize },

    #[error("lane {lane} at depth {depth} is already held by {holder}")]
    LaneOccupied { depth: usize, lane: usize, holder: MoverId },

    #[error("no free lane at depth {0}")]
    NoFreeLane(usize),
}

pub type GridResult<T> = Result<T, GridError>;
