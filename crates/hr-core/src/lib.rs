//! `hr-core`: foundational types for the hexrail workspace.
//!
//! This crate is a dependency of every other `hr-*` crate.  It has no
//! `hr-*` dependencies and few external ones (`glam`, `rand`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                    |
//! |------------|-------------------------------------------------------------|
//! | [`hex`]    | `HexCoord`, `HexEdge`, `HexCoordEdge`                       |
//! | [`grid`]   | plane projection, cell lookup, curve geometry, placement    |
//! | [`ids`]    | `TrainId`, `OwnerId`                                        |
//! | [`rng`]    | `TrainRng`: per-train junction choices                      |
//! | [`time`]   | `Tick`, `SimClock`                                          |
//! | [`config`] | `RailConfig`, `FrictionModel`                               |
//! | [`error`]  | `CoreError`, `CoreResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod grid;
pub mod hex;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{FrictionModel, RailConfig};
pub use error::{CoreError, CoreResult};
pub use grid::{Bend, Curve, GridPlacement};
pub use hex::{HexCoord, HexCoordEdge, HexEdge};
pub use ids::{OwnerId, TrainId};
pub use rng::TrainRng;
pub use time::{SimClock, Tick};

pub use glam;
