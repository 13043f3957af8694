//! Channel-backed sink that forwards wire messages to a presentation thread.

use std::sync::mpsc::{self, Receiver, Sender};

use hv_core::MoverId;
use hv_path::PositionSink;
use tracing::trace;

use crate::PresentMessage;

/// A [`PositionSink`] that sends a [`PresentMessage`] per update.
///
/// Sending never blocks.  Once the receiver is gone, updates are dropped.
#[derive(Clone, Debug)]
pub struct ChannelSink {
    tx: Sender<PresentMessage>,
}

impl ChannelSink {
    /// A sink and the receiving end of its channel.
    pub fn new() -> (Self, Receiver<PresentMessage>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    pub fn from_sender(tx: Sender<PresentMessage>) -> Self {
        Self { tx }
    }
}

impl PositionSink for ChannelSink {
    fn on_position_update(&self, mover: MoverId, lane: usize, depth: usize) {
        if self.tx.send(PresentMessage::new(mover, lane, depth)).is_err() {
            trace!(mover = %mover, "presentation receiver gone; update dropped");
        }
    }
}
