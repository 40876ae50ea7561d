//! `TraceObserver<W>`: bridges `WorldObserver` to a `TraceWriter`.

use hr_core::{GridPlacement, Tick};
use hr_sim::{world_poses, WorldObserver};
use hr_track::TrackDiff;
use hr_train::Train;

use crate::row::{CarPoseRow, TrackDiffRow};
use crate::writer::TraceWriter;
use crate::{OutputError, OutputResult};

/// A [`WorldObserver`] that writes car poses and track diffs to any
/// [`TraceWriter`].
///
/// Observer hooks cannot fail, so the first write error is stored.  After
/// `world.run()` returns, check it with [`take_error`][Self::take_error].
pub struct TraceObserver<W: TraceWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: TraceWriter> TraceObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer.  `World::run` does this through `on_sim_end`;
    /// call it after `run_ticks`.
    pub fn finish(&mut self) -> OutputResult<()> {
        self.writer.finish()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: TraceWriter> WorldObserver for TraceObserver<W> {
    fn on_track_diff(&mut self, tick: Tick, diff: &TrackDiff) {
        let result = self.writer.write_track_diff(&TrackDiffRow::new(tick, diff));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, trains: &[Train], placement: &GridPlacement) {
        let rows: Vec<CarPoseRow> = world_poses(trains, placement)
            .map(|(train, car, pose)| CarPoseRow::new(tick, train, car, &pose))
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_car_poses(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
