//! Point-in-time copy of corridor state, for tests, tooling and the UI.

use hv_core::MoverId;
use hv_grid::Cell;

use crate::state::PathState;

/// Where one registered mover stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoverPosition {
    pub mover: MoverId,
    pub depth: i64,
    pub cell:  Option<Cell>,
}

/// A consistent copy of everything the corridor lock protects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorridorSnapshot {
    /// Occupied cells in row-major order.
    pub occupants: Vec<(Cell, MoverId)>,

    /// Free lanes per depth, each sorted ascending.
    pub free_lanes: Vec<Vec<usize>>,

    /// Registered movers in arrival order.
    pub order: Vec<MoverId>,

    /// Registered movers in id order.
    pub positions: Vec<MoverPosition>,

    pub turn: Option<MoverId>,

    /// Movers still owed to a draining soft stop (`0` if none).
    pub stop_pending: usize,

    pub ended: bool,

    pub lane_capacity: usize,
}

impl CorridorSnapshot {
    pub(crate) fn capture(state: &PathState) -> Self {
        let path_size = state.grid.path_size();
        Self {
            occupants:  state.grid.occupants().collect(),
            free_lanes: (0..path_size)
                .map(|d| {
                    let mut lanes = state.lanes.free_at(d).to_vec();
                    lanes.sort_unstable();
                    lanes
                })
                .collect(),
            order:      state.movers.order().to_vec(),
            positions:  state
                .movers
                .iter()
                .map(|(mover, slot)| MoverPosition { mover, depth: slot.depth, cell: slot.cell })
                .collect(),
            turn:          state.turn,
            stop_pending:  state.stop.pending(),
            ended:         state.ended,
            lane_capacity: state.grid.lane_capacity(),
        }
    }

    /// `true` if nobody is inside, every lane is free, and no stop is
    /// draining: the corridor is ready for a fresh run.
    pub fn is_idle(&self) -> bool {
        self.order.is_empty()
            && self.occupants.is_empty()
            && self.stop_pending == 0
            && self.turn.is_none()
            && self.free_lanes.iter().all(|l| l.len() == self.lane_capacity)
    }

    /// Check the structural invariants, returning every violation found.
    ///
    /// - occupied cells ↔ registered movers holding a cell, one to one;
    /// - per depth, free lanes and occupied lanes partition all lanes;
    /// - arrival order and registry hold the same ids;
    /// - the turn holder, if any, is registered.
    pub fn check_invariants(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        let held: Vec<(Cell, MoverId)> = {
            let mut v: Vec<_> = self
                .positions
                .iter()
                .filter_map(|p| p.cell.map(|c| (c, p.mover)))
                .collect();
            v.sort_by_key(|(c, _)| (c.depth, c.lane));
            v
        };
        if held != self.occupants {
            problems.push(format!("grid {:?} disagrees with movers {:?}", self.occupants, held));
        }

        for p in &self.positions {
            if let Some(c) = p.cell {
                if c.depth as i64 != p.depth {
                    problems.push(format!("{} holds depth {} but records {}", p.mover, c.depth, p.depth));
                }
            }
        }

        for (depth, free) in self.free_lanes.iter().enumerate() {
            let mut all: Vec<usize> = self
                .occupants
                .iter()
                .filter(|(c, _)| c.depth == depth)
                .map(|(c, _)| c.lane)
                .chain(free.iter().copied())
                .collect();
            all.sort_unstable();
            if all != (0..self.lane_capacity).collect::<Vec<_>>() {
                problems.push(format!("depth {depth}: free {free:?} and occupied lanes do not partition"));
            }
        }

        let mut ordered = self.order.clone();
        ordered.sort();
        let registered: Vec<MoverId> = self.positions.iter().map(|p| p.mover).collect();
        if ordered != registered {
            problems.push(format!("arrival order {:?} != registry {:?}", self.order, registered));
        }

        if let Some(t) = self.turn {
            if !self.order.contains(&t) {
                problems.push(format!("turn holder {t} is not registered"));
            }
        }

        if problems.is_empty() { Ok(()) } else { Err(problems) }
    }
}
