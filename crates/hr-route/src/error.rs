//! Path-planning error type.

use thiserror::Error;

use hr_core::HexCoordEdge;

/// Errors produced by `hr-route`.
///
/// The first three are rejected before any search work is done.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("start and end are the same endpoint {0}")]
    Degenerate(HexCoordEdge),

    #[error("sharp (reversing) turns are not supported")]
    SharpTurnsUnsupported,

    #[error("endpoint {0} lies in a blocked cell")]
    Blocked(HexCoordEdge),

    #[error("no route from {from} to {to}")]
    NoRoute { from: HexCoordEdge, to: HexCoordEdge },

    #[error("search gave up after {expansions} expansions")]
    SearchExhausted { expansions: usize },
}

pub type RouteResult<T> = Result<T, RouteError>;
