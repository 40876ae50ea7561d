//! Train-subsystem error type.
//!
//! Running out of track is not an error; see `TickOutcome::Halted`.

use thiserror::Error;

use hr_core::TrainId;
use hr_track::TrackError;

/// Errors produced by `hr-train`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainError {
    #[error("{0} is on track but has no traversed tiles")]
    EmptyQueue(TrainId),

    #[error("track query failed: {0}")]
    Track(#[from] TrackError),
}

pub type TrainResult<T> = Result<T, TrainError>;
