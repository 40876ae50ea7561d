use thiserror::Error;

use hr_core::{CoreError, TrainId};
use hr_route::RouteError;
use hr_train::TrainError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("no train with id {0}")]
    UnknownTrain(TrainId),

    #[error("train ids exhausted")]
    TooManyTrains,

    #[error("path planning failed: {0}")]
    Route(#[from] RouteError),

    #[error("{train} failed to step: {source}")]
    Train { train: TrainId, source: TrainError },
}

pub type SimResult<T> = Result<T, SimError>;
