//! The mover registry: an arena of per-mover slots plus the arrival order.
//!
//! # Why an arena?
//!
//! Slots live in a `Vec<Option<MoverSlot>>` indexed by `MoverId`, so lookup
//! is a bounds check and an index, and "which movers are inside" is simply
//! the set of `Some` slots.  The arrival order is kept separately because
//! turn rotation follows entry order, not id order.
//!
//! Each slot owns an `Arc<Condvar>`.  The monitor clones the `Arc` before
//! waiting, since `Condvar::wait` consumes the guard that protects the
//! registry itself.

use std::sync::{Arc, Condvar};

use hv_core::{Direction, MoverId};

use crate::{Cell, GridError, GridResult};

// ── MoverSlot ─────────────────────────────────────────────────────────────────

/// Bookkeeping for one mover currently inside the corridor.
#[derive(Debug)]
pub struct MoverSlot {
    /// Trip direction fixed at entry.
    pub direction: Direction,

    /// Logical depth.  Starts at the direction's entry sentinel, lies in
    /// `[0, path_size)` while the mover holds a cell, and ends outside that
    /// range once the mover has stepped out.
    pub depth: i64,

    /// The grid cell the mover holds, if any.
    pub cell: Option<Cell>,

    /// Barrier generation the mover entered in.
    pub generation: u64,

    condition: Arc<Condvar>,
}

impl MoverSlot {
    /// Handle to this mover's dedicated wait condition.
    #[inline]
    pub fn condition(&self) -> Arc<Condvar> {
        Arc::clone(&self.condition)
    }
}

// ── MoverRegistry ─────────────────────────────────────────────────────────────

/// Fixed-capacity arena of [`MoverSlot`]s plus the arrival order.
///
/// Invariant: the ids in `order` are exactly the occupied slots.
#[derive(Debug)]
pub struct MoverRegistry {
    slots: Vec<Option<MoverSlot>>,
    order: Vec<MoverId>,
}

impl MoverRegistry {
    /// Create a registry accepting ids in `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            order: Vec::new(),
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of registered movers.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn check(&self, mover: MoverId) -> GridResult<usize> {
        let i = mover.index();
        if i >= self.slots.len() {
            return Err(GridError::IdOutOfRange { mover, capacity: self.slots.len() });
        }
        Ok(i)
    }

    /// Register `mover` at the back of the arrival order.
    pub fn register(
        &mut self,
        mover:      MoverId,
        direction:  Direction,
        depth:      i64,
        generation: u64,
    ) -> GridResult<&mut MoverSlot> {
        let i = self.check(mover)?;
        if self.slots[i].is_some() {
            return Err(GridError::AlreadyRegistered(mover));
        }
        self.order.push(mover);
        Ok(self.slots[i].insert(MoverSlot {
            direction,
            depth,
            cell: None,
            generation,
            condition: Arc::new(Condvar::new()),
        }))
    }

    /// Drop `mover`'s slot and its place in the arrival order.
    pub fn remove(&mut self, mover: MoverId) -> GridResult<MoverSlot> {
        let i = self.check(mover)?;
        let slot = self.slots[i].take().ok_or(GridError::NotRegistered(mover))?;
        self.order.retain(|&id| id != mover);
        Ok(slot)
    }

    #[inline]
    pub fn contains(&self, mover: MoverId) -> bool {
        self.get(mover).is_some()
    }

    pub fn get(&self, mover: MoverId) -> Option<&MoverSlot> {
        self.slots.get(mover.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, mover: MoverId) -> Option<&mut MoverSlot> {
        self.slots.get_mut(mover.index()).and_then(Option::as_mut)
    }

    /// Like [`get_mut`](Self::get_mut) but reports unknown movers as an error.
    pub fn slot_mut(&mut self, mover: MoverId) -> GridResult<&mut MoverSlot> {
        self.check(mover)?;
        self.get_mut(mover).ok_or(GridError::NotRegistered(mover))
    }

    /// Registered ids in arrival order.
    #[inline]
    pub fn order(&self) -> &[MoverId] {
        &self.order
    }

    /// First mover in arrival order.
    #[inline]
    pub fn head(&self) -> Option<MoverId> {
        self.order.first().copied()
    }

    /// The mover after `mover` in arrival order, wrapping around.
    ///
    /// Returns `None` if `mover` is not registered.
    pub fn next_after(&self, mover: MoverId) -> Option<MoverId> {
        let pos = self.order.iter().position(|&id| id == mover)?;
        Some(self.order[(pos + 1) % self.order.len()])
    }

    /// Signal every registered mover's condition.
    pub fn notify_all(&self) {
        for slot in self.slots.iter().flatten() {
            slot.condition.notify_all();
        }
    }

    /// Iterator over `(id, slot)` for every registered mover in id order.
    pub fn iter(&self) -> impl Iterator<Item = (MoverId, &MoverSlot)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|slot| (MoverId(i as u32), slot)))
    }
}
