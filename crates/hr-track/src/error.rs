//! Track-subsystem error type.
//!
//! Every variant is a caller contract violation: asking a tile or piece for
//! something it does not have.

use thiserror::Error;

use hr_core::HexEdge;

use crate::RailPiece;

/// Errors produced by `hr-track`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrackError {
    #[error("tile contains no rail pieces")]
    EmptyTile,

    #[error("{piece:?} does not touch the {edge} edge")]
    PieceDoesNotTouch { piece: RailPiece, edge: HexEdge },

    #[error("{0:?} connects no pair of edges")]
    NoConnection(RailPiece),
}

pub type TrackResult<T> = Result<T, TrackError>;
