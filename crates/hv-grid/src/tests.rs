//! Unit tests for hv-grid.

#[cfg(test)]
mod grid_tests {
    use hv_core::MoverId;

    use crate::{Cell, GridError, OccupancyGrid};

    #[test]
    fn new_grid_is_empty() {
        let grid = OccupancyGrid::new(3, 2);
        assert!(grid.is_empty());
        assert_eq!(grid.occupied_count(), 0);
        assert_eq!(grid.path_size(), 3);
        assert_eq!(grid.lane_capacity(), 2);
    }

    #[test]
    fn occupy_and_release() {
        let mut grid = OccupancyGrid::new(3, 2);
        grid.occupy(Cell::new(1, 0), MoverId(4)).unwrap();
        assert_eq!(grid.get(Cell::new(1, 0)), Some(MoverId(4)));
        assert_eq!(grid.occupied_count(), 1);
        assert_eq!(grid.occupied_lanes(1), vec![0]);

        assert_eq!(grid.release(Cell::new(1, 0)), Some(MoverId(4)));
        assert!(grid.is_empty());
        assert_eq!(grid.release(Cell::new(1, 0)), None);
    }

    #[test]
    fn double_occupy_rejected() {
        let mut grid = OccupancyGrid::new(2, 2);
        grid.occupy(Cell::new(0, 1), MoverId(1)).unwrap();
        let err = grid.occupy(Cell::new(0, 1), MoverId(2)).unwrap_err();
        assert_eq!(err, GridError::LaneOccupied { depth: 0, lane: 1, holder: MoverId(1) });
    }

    #[test]
    fn out_of_range_cells() {
        let mut grid = OccupancyGrid::new(2, 2);
        assert!(grid.occupy(Cell::new(2, 0), MoverId(0)).is_err());
        assert!(grid.occupy(Cell::new(0, 2), MoverId(0)).is_err());
        assert_eq!(grid.get(Cell::new(5, 5)), None);
        assert!(grid.occupied_lanes(9).is_empty());
    }

    #[test]
    fn occupants_in_row_major_order() {
        let mut grid = OccupancyGrid::new(3, 2);
        grid.occupy(Cell::new(2, 1), MoverId(9)).unwrap();
        grid.occupy(Cell::new(0, 1), MoverId(3)).unwrap();
        let all: Vec<_> = grid.occupants().collect();
        assert_eq!(all, vec![(Cell::new(0, 1), MoverId(3)), (Cell::new(2, 1), MoverId(9))]);
    }
}

#[cfg(test)]
mod lanes_tests {
    use hv_core::SimRng;

    use crate::{FreeLanes, GridError};

    #[test]
    fn starts_fully_free() {
        let lanes = FreeLanes::new(3, 4);
        assert!(lanes.is_fully_restored());
        assert_eq!(lanes.total_free(), 12);
        assert_eq!(lanes.free_at(1).len(), 4);
    }

    #[test]
    fn take_until_exhausted() {
        let mut lanes = FreeLanes::new(2, 3);
        let mut rng = SimRng::new(5);
        let mut taken: Vec<usize> = (0..3).map(|_| lanes.take_random(1, &mut rng).unwrap()).collect();
        taken.sort_unstable();
        assert_eq!(taken, vec![0, 1, 2], "each lane handed out exactly once");
        assert_eq!(lanes.take_random(1, &mut rng), Err(GridError::NoFreeLane(1)));
        assert_eq!(lanes.free_at(0).len(), 3, "other depths untouched");
    }

    #[test]
    fn release_restores() {
        let mut lanes = FreeLanes::new(2, 2);
        let mut rng = SimRng::new(1);
        let lane = lanes.take_random(0, &mut rng).unwrap();
        assert!(!lanes.is_fully_restored());
        lanes.release(0, lane).unwrap();
        assert!(lanes.is_fully_restored());
    }

    #[test]
    fn bad_depth_is_error() {
        let mut lanes = FreeLanes::new(2, 2);
        let mut rng = SimRng::new(1);
        assert!(lanes.take_random(2, &mut rng).is_err());
        assert!(lanes.free_at(7).is_empty());
    }

    #[test]
    fn selection_is_spread_across_lanes() {
        let mut rng = SimRng::new(77);
        let mut hits = [0usize; 4];
        for _ in 0..400 {
            let mut lanes = FreeLanes::new(1, 4);
            hits[lanes.take_random(0, &mut rng).unwrap()] += 1;
        }
        assert!(hits.iter().all(|&h| h > 50), "lane choice looks skewed: {hits:?}");
    }
}

#[cfg(test)]
mod registry_tests {
    use hv_core::{Direction, MoverId};

    use crate::{Cell, GridError, MoverRegistry};

    #[test]
    fn register_keeps_arrival_order() {
        let mut reg = MoverRegistry::new(8);
        reg.register(MoverId(5), Direction::Forward, -1, 0).unwrap();
        reg.register(MoverId(2), Direction::Forward, -1, 0).unwrap();
        reg.register(MoverId(7), Direction::Forward, -1, 0).unwrap();
        assert_eq!(reg.order(), &[MoverId(5), MoverId(2), MoverId(7)]);
        assert_eq!(reg.head(), Some(MoverId(5)));
        assert_eq!(reg.len(), 3);
    }

    #[test]
    fn next_after_wraps() {
        let mut reg = MoverRegistry::new(4);
        for id in [1, 0, 3] {
            reg.register(MoverId(id), Direction::Reverse, 3, 0).unwrap();
        }
        assert_eq!(reg.next_after(MoverId(1)), Some(MoverId(0)));
        assert_eq!(reg.next_after(MoverId(0)), Some(MoverId(3)));
        assert_eq!(reg.next_after(MoverId(3)), Some(MoverId(1)));
        assert_eq!(reg.next_after(MoverId(2)), None);
    }

    #[test]
    fn single_mover_is_its_own_successor() {
        let mut reg = MoverRegistry::new(2);
        reg.register(MoverId(1), Direction::Forward, -1, 0).unwrap();
        assert_eq!(reg.next_after(MoverId(1)), Some(MoverId(1)));
    }

    #[test]
    fn duplicate_and_out_of_range_rejected() {
        let mut reg = MoverRegistry::new(2);
        reg.register(MoverId(0), Direction::Forward, -1, 0).unwrap();
        assert_eq!(
            reg.register(MoverId(0), Direction::Forward, -1, 0).unwrap_err(),
            GridError::AlreadyRegistered(MoverId(0))
        );
        assert_eq!(
            reg.register(MoverId(2), Direction::Forward, -1, 0).unwrap_err(),
            GridError::IdOutOfRange { mover: MoverId(2), capacity: 2 }
        );
    }

    #[test]
    fn remove_clears_slot_and_order() {
        let mut reg = MoverRegistry::new(4);
        reg.register(MoverId(0), Direction::Forward, -1, 0).unwrap();
        reg.register(MoverId(1), Direction::Forward, -1, 0).unwrap();
        reg.slot_mut(MoverId(1)).unwrap().cell = Some(Cell::new(0, 1));

        let slot = reg.remove(MoverId(1)).unwrap();
        assert_eq!(slot.cell, Some(Cell::new(0, 1)));
        assert!(!reg.contains(MoverId(1)));
        assert_eq!(reg.order(), &[MoverId(0)]);
        assert_eq!(reg.remove(MoverId(1)).unwrap_err(), GridError::NotRegistered(MoverId(1)));
    }

    #[test]
    fn slot_ids_match_order() {
        let mut reg = MoverRegistry::new(6);
        for id in [4, 1, 5] {
            reg.register(MoverId(id), Direction::Forward, -1, 0).unwrap();
        }
        reg.remove(MoverId(1)).unwrap();
        let mut from_slots: Vec<_> = reg.iter().map(|(id, _)| id).collect();
        let mut from_order = reg.order().to_vec();
        from_slots.sort();
        from_order.sort();
        assert_eq!(from_slots, from_order);
    }

    #[test]
    fn each_slot_has_its_own_condition() {
        let mut reg = MoverRegistry::new(2);
        reg.register(MoverId(0), Direction::Forward, -1, 0).unwrap();
        reg.register(MoverId(1), Direction::Forward, -1, 0).unwrap();
        let a = reg.get(MoverId(0)).unwrap().condition();
        let b = reg.get(MoverId(1)).unwrap().condition();
        assert!(!std::sync::Arc::ptr_eq(&a, &b));
        reg.notify_all(); // no waiters; must not panic
    }
}
