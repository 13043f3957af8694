//! Deterministic corridor RNG.
//!
//! The monitor owns one `SimRng` behind its lock, so every lane and step
//! draw happens in lock order and a seeded run replays identically as long
//! as the threads arrive in the same order.  Delay draws that happen outside
//! the lock use a per-thread [`SimRng::child`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::MoverId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seeded RNG used in explicitly synchronised contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed deterministically from a run seed and a mover id.
    pub fn for_mover(seed: u64, mover: MoverId) -> Self {
        let mixed = seed ^ (mover.0 as u64).wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(mixed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Step count for a regular turn: uniform in `[1, max_steps]`.
    #[inline]
    pub fn step(&mut self, max_steps: u32) -> u32 {
        self.0.gen_range(1..=max_steps.max(1))
    }

    /// Random delay in `[0, max_ms)` milliseconds; `0` when `max_ms == 0`.
    #[inline]
    pub fn delay_ms(&mut self, max_ms: u64) -> u64 {
        if max_ms == 0 {
            return 0;
        }
        self.0.gen_range(0..max_ms)
    }

    /// Index into a non-empty collection of `len` elements.
    /// Returns `None` if `len == 0`.
    #[inline]
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.0.gen_range(0..len))
    }
}
