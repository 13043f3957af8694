//! The occupancy grid.

use hv_core::MoverId;

use crate::{GridError, GridResult};

/// Coordinates of one corridor slot.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub depth: usize,
    pub lane:  usize,
}

impl Cell {
    #[inline]
    pub fn new(depth: usize, lane: usize) -> Self {
        Self { depth, lane }
    }
}

/// `path_size × lane_capacity` matrix of optional mover ids.
///
/// Stored flat in row-major order (`depth * lane_capacity + lane`) so one
/// depth's lanes are contiguous.
#[derive(Clone, Debug)]
pub struct OccupancyGrid {
    cells:         Vec<Option<MoverId>>,
    path_size:     usize,
    lane_capacity: usize,
}

impl OccupancyGrid {
    /// Create an empty grid.
    pub fn new(path_size: usize, lane_capacity: usize) -> Self {
        Self {
            cells: vec![None; path_size * lane_capacity],
            path_size,
            lane_capacity,
        }
    }

    #[inline]
    pub fn path_size(&self) -> usize {
        self.path_size
    }

    #[inline]
    pub fn lane_capacity(&self) -> usize {
        self.lane_capacity
    }

    #[inline]
    fn slot(&self, cell: Cell) -> GridResult<usize> {
        if cell.depth >= self.path_size || cell.lane >= self.lane_capacity {
            return Err(GridError::DepthOutOfRange {
                depth:     cell.depth,
                path_size: self.path_size,
            });
        }
        Ok(cell.depth * self.lane_capacity + cell.lane)
    }

    /// The mover at `cell`, if any.  Out-of-range cells read as empty.
    pub fn get(&self, cell: Cell) -> Option<MoverId> {
        self.slot(cell).ok().and_then(|i| self.cells[i])
    }

    /// Place `mover` at `cell`.  Fails if another mover already holds it.
    pub fn occupy(&mut self, cell: Cell, mover: MoverId) -> GridResult<()> {
        let i = self.slot(cell)?;
        if let Some(holder) = self.cells[i] {
            return Err(GridError::LaneOccupied {
                depth: cell.depth,
                lane:  cell.lane,
                holder,
            });
        }
        self.cells[i] = Some(mover);
        Ok(())
    }

    /// Empty `cell`, returning whoever held it.
    pub fn release(&mut self, cell: Cell) -> Option<MoverId> {
        let i = self.slot(cell).ok()?;
        self.cells[i].take()
    }

    /// Number of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Lanes at `depth` that currently hold a mover.
    pub fn occupied_lanes(&self, depth: usize) -> Vec<usize> {
        if depth >= self.path_size {
            return vec![];
        }
        let row = &self.cells[depth * self.lane_capacity..(depth + 1) * self.lane_capacity];
        row.iter()
            .enumerate()
            .filter_map(|(lane, c)| c.map(|_| lane))
            .collect()
    }

    /// Every `(cell, mover)` pair currently on the grid, in row-major order.
    pub fn occupants(&self) -> impl Iterator<Item = (Cell, MoverId)> + '_ {
        let lanes = self.lane_capacity;
        self.cells.iter().enumerate().filter_map(move |(i, c)| {
            c.map(|mover| (Cell::new(i / lanes, i % lanes), mover))
        })
    }

    /// `true` if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}
