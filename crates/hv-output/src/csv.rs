//! CSV position recorder.
//!
//! One row per position update: `mover_id,lane,depth`.

use std::fs::File;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use csv::Writer;
use hv_core::MoverId;
use hv_path::PositionSink;
use tracing::warn;

use crate::{OutputError, OutputResult};

struct Inner {
    writer:     Writer<File>,
    rows:       u64,
    last_error: Option<OutputError>,
    finished:   bool,
}

/// A [`PositionSink`] that appends every update to a CSV file.
///
/// The corridor calls sinks with no error path, so write errors are stored
/// internally (first one only).  After the run, check with
/// [`take_error`][Self::take_error] or [`finish`][Self::finish].
pub struct CsvSink {
    inner: Mutex<Inner>,
}

impl CsvSink {
    pub const HEADER: [&'static str; 3] = ["mover_id", "lane", "depth"];

    /// Create (or truncate) the file at `path` and write the header row.
    pub fn create(path: &Path) -> OutputResult<Self> {
        let mut writer = Writer::from_path(path)?;
        writer.write_record(Self::HEADER)?;
        Ok(Self {
            inner: Mutex::new(Inner {
                writer,
                rows:       0,
                last_error: None,
                finished:   false,
            }),
        })
    }

    /// Rows written so far, header excluded.
    pub fn rows_written(&self) -> u64 {
        self.inner().rows
    }

    /// Take the stored write error, if any.
    pub fn take_error(&self) -> Option<OutputError> {
        self.inner().last_error.take()
    }

    /// Flush the file, reporting the first stored error before any flush
    /// error.
    ///
    /// Idempotent; updates that arrive afterwards are dropped.
    pub fn finish(&self) -> OutputResult<()> {
        let mut inner = self.inner();
        if let Some(e) = inner.last_error.take() {
            return Err(e);
        }
        if inner.finished {
            return Ok(());
        }
        inner.finished = true;
        inner.writer.flush()?;
        Ok(())
    }

    // A writer that panicked mid-record leaves at worst a torn row; keep going.
    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PositionSink for CsvSink {
    fn on_position_update(&self, mover: MoverId, lane: usize, depth: usize) {
        let mut inner = self.inner();
        if inner.finished {
            return;
        }
        let result = inner.writer.write_record(&[
            mover.0.to_string(),
            lane.to_string(),
            depth.to_string(),
        ]);
        match result {
            Ok(()) => inner.rows += 1,
            Err(e) => {
                warn!(mover = %mover, error = %e, "csv sink write failed");
                if inner.last_error.is_none() {
                    inner.last_error = Some(e.into());
                }
            }
        }
    }
}
