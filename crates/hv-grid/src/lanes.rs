//! Per-depth free-lane lists.

use hv_core::SimRng;

use crate::{GridError, GridResult};

/// For each depth, the lane indices nobody occupies.
///
/// Allocation picks a uniformly random position in the depth's list and
/// `swap_remove`s it, so both taking and releasing a lane are O(1).  The
/// list order carries no meaning.
#[derive(Clone, Debug)]
pub struct FreeLanes {
    free:          Vec<Vec<usize>>,
    lane_capacity: usize,
}

impl FreeLanes {
    /// Every lane at every depth starts free.
    pub fn new(path_size: usize, lane_capacity: usize) -> Self {
        Self {
            free: (0..path_size).map(|_| (0..lane_capacity).collect()).collect(),
            lane_capacity,
        }
    }

    fn row_mut(&mut self, depth: usize) -> GridResult<&mut Vec<usize>> {
        let path_size = self.free.len();
        self.free
            .get_mut(depth)
            .ok_or(GridError::DepthOutOfRange { depth, path_size })
    }

    /// Remove and return a uniformly random free lane at `depth`.
    pub fn take_random(&mut self, depth: usize, rng: &mut SimRng) -> GridResult<usize> {
        let row = self.row_mut(depth)?;
        let idx = rng.pick_index(row.len()).ok_or(GridError::NoFreeLane(depth))?;
        Ok(row.swap_remove(idx))
    }

    /// Return `lane` at `depth` to the free list.
    pub fn release(&mut self, depth: usize, lane: usize) -> GridResult<()> {
        let capacity = self.lane_capacity;
        let row = self.row_mut(depth)?;
        debug_assert!(lane < capacity, "lane {lane} outside capacity {capacity}");
        debug_assert!(!row.contains(&lane), "lane {lane} at depth {depth} released twice");
        row.push(lane);
        Ok(())
    }

    /// The free lanes at `depth` (empty for out-of-range depths).
    pub fn free_at(&self, depth: usize) -> &[usize] {
        self.free.get(depth).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total free slots across all depths.
    pub fn total_free(&self) -> usize {
        self.free.iter().map(Vec::len).sum()
    }

    /// `true` if every lane at every depth is free again.
    pub fn is_fully_restored(&self) -> bool {
        self.free.iter().all(|row| row.len() == self.lane_capacity)
    }
}
