//! Presentation sink trait for position updates.

use std::sync::Arc;

use hv_core::MoverId;

/// Receives best-effort notifications of mover positions.
///
/// Called by the corridor while it holds its lock, so implementations must
/// return promptly and must never call back into the corridor.  There is no
/// error path: a sink that fails keeps the failure to itself.
///
/// All methods except `on_position_update` have default no-op
/// implementations.
///
/// # Example — stdout printer
///
/// ```rust,ignore
/// struct Printer;
///
/// impl PositionSink for Printer {
///     fn on_position_update(&self, mover: MoverId, lane: usize, depth: usize) {
///         println!("{mover} -> depth {depth}, lane {lane}");
///     }
/// }
/// ```
pub trait PositionSink: Send + Sync {
    /// `mover` now occupies `lane` at `depth`.
    fn on_position_update(&self, mover: MoverId, lane: usize, depth: usize);

    /// `mover` no longer holds a cell: it stepped out or unwound.
    fn on_leave(&self, _mover: MoverId) {}
}

/// A [`PositionSink`] that discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopSink;

impl PositionSink for NoopSink {
    fn on_position_update(&self, _mover: MoverId, _lane: usize, _depth: usize) {}
}

impl<S: PositionSink + ?Sized> PositionSink for Arc<S> {
    fn on_position_update(&self, mover: MoverId, lane: usize, depth: usize) {
        (**self).on_position_update(mover, lane, depth);
    }

    fn on_leave(&self, mover: MoverId) {
        (**self).on_leave(mover);
    }
}

impl<S: PositionSink + ?Sized> PositionSink for Box<S> {
    fn on_position_update(&self, mover: MoverId, lane: usize, depth: usize) {
        (**self).on_position_update(mover, lane, depth);
    }

    fn on_leave(&self, mover: MoverId) {
        (**self).on_leave(mover);
    }
}
