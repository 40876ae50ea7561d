//! The `TraceWriter` trait implemented by backend writers.

use crate::{CarPoseRow, OutputResult, TrackDiffRow};

/// Sink for world traces.
///
/// Errors surface through [`TraceObserver::take_error`][crate::TraceObserver::take_error]
/// when the writer is driven by the observer.
pub trait TraceWriter {
    /// Write every car pose of one snapshot.
    fn write_car_poses(&mut self, rows: &[CarPoseRow]) -> OutputResult<()>;

    fn write_track_diff(&mut self, row: &TrackDiffRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
