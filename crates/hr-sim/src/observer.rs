//! World observer trait for progress reporting and data collection.

use hr_core::{GridPlacement, HexCoordEdge, Tick, TrainId};
use hr_track::TrackDiff;
use hr_train::Train;

/// Callbacks invoked by [`World::run`][crate::World::run] at key points in
/// the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: halt logger
///
/// ```rust,ignore
/// struct HaltLog(Vec<TrainId>);
///
/// impl WorldObserver for HaltLog {
///     fn on_train_halted(&mut self, _tick: Tick, train: TrainId, _at: HexCoordEdge) {
///         self.0.push(train);
///     }
/// }
/// ```
pub trait WorldObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per non-empty track change made since the previous tick,
    /// in the order the edits were applied.  This is the renderer feed.
    fn on_track_diff(&mut self, _tick: Tick, _diff: &TrackDiff) {}

    /// Called when a train runs out of track and is stopped.
    fn on_train_halted(&mut self, _tick: Tick, _train: TrainId, _at: HexCoordEdge) {}

    /// Called at the end of each tick.  `on_track` counts trains that ran
    /// physics this tick.
    fn on_tick_end(&mut self, _tick: Tick, _on_track: usize) {}

    /// Called every `config.snapshot_interval_ticks` ticks with read-only
    /// access to every train and the world placement.
    fn on_snapshot(&mut self, _tick: Tick, _trains: &[Train], _placement: &GridPlacement) {}

    /// Called once after the final tick of [`World::run`][crate::World::run].
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`WorldObserver`] that does nothing.
pub struct NoopObserver;

impl WorldObserver for NoopObserver {}
