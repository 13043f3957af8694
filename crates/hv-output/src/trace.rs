//! Sink that turns position updates into `tracing` events.

use hv_core::MoverId;
use hv_path::PositionSink;
use tracing::debug;

/// A [`PositionSink`] that emits one `debug` event per update under the
/// `hv_output::present` target.
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingSink;

impl PositionSink for TracingSink {
    fn on_position_update(&self, mover: MoverId, lane: usize, depth: usize) {
        debug!(target: "hv_output::present", mover = %mover, lane, depth, "present in path");
    }

    fn on_leave(&self, mover: MoverId) {
        debug!(target: "hv_output::present", mover = %mover, "left path");
    }
}
