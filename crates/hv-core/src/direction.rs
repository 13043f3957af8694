//! Travel direction through the corridor.

/// Which way a mover crosses the corridor.
///
/// `Forward` runs from the standing area towards the granary (depth grows
/// from 0), `Reverse` is the return trip to the storehouse (depth shrinks
/// towards 0).  Movers on a reverse trip carry cobs.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    /// Depth a mover holds before its first step ("not yet placed").
    ///
    /// Lies just outside the grid on the entry side: `-1` for forward trips,
    /// `path_size` for reverse trips.
    #[inline]
    pub fn entry_depth(self, path_size: usize) -> i64 {
        match self {
            Direction::Forward => -1,
            Direction::Reverse => path_size as i64,
        }
    }

    /// Apply a step of `steps` slots in this direction to `depth`.
    #[inline]
    pub fn apply(self, depth: i64, steps: u32) -> i64 {
        match self {
            Direction::Forward => depth + steps as i64,
            Direction::Reverse => depth - steps as i64,
        }
    }

    #[inline]
    pub fn is_reverse(self) -> bool {
        matches!(self, Direction::Reverse)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward => "forward",
            Direction::Reverse => "reverse",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
