//! The caller-side handle a mover thread passes into the corridor.

use hv_core::{Direction, MoverId, SimRng};

/// One mover's own state: identity, current trip, carried cobs, and the RNG
/// it draws its pre-action delays from.
///
/// The corridor only borrows this for the duration of a call.  It reads the
/// id and direction, and on a soft stop during a reverse trip it discards the
/// cargo, since a cancelled delivery never reaches the storehouse.
pub struct Mover {
    id:        MoverId,
    direction: Direction,
    cargo:     u32,
    rng:       SimRng,
}

impl Mover {
    /// A mover on a forward trip with empty hands.
    pub fn new(id: MoverId, seed: u64) -> Self {
        Self {
            id,
            direction: Direction::Forward,
            cargo:     0,
            rng:       SimRng::for_mover(seed, id),
        }
    }

    #[inline]
    pub fn id(&self) -> MoverId {
        self.id
    }

    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Set the direction for the next trip.
    pub fn heading(&mut self, direction: Direction) -> &mut Self {
        self.direction = direction;
        self
    }

    #[inline]
    pub fn cargo(&self) -> u32 {
        self.cargo
    }

    /// Pick up `amount` cobs.
    pub fn load(&mut self, amount: u32) {
        self.cargo = self.cargo.saturating_add(amount);
    }

    /// Hand over everything carried, leaving the mover empty.
    pub fn unload(&mut self) -> u32 {
        std::mem::take(&mut self.cargo)
    }

    /// Drop the cargo without delivering it.
    pub fn discard_cargo(&mut self) {
        self.cargo = 0;
    }

    pub(crate) fn rng(&mut self) -> &mut SimRng {
        &mut self.rng
    }
}

impl std::fmt::Debug for Mover {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mover")
            .field("id", &self.id)
            .field("direction", &self.direction)
            .field("cargo", &self.cargo)
            .finish_non_exhaustive()
    }
}
