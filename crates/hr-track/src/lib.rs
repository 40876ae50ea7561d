//! `hr-track`: rail pieces, per-cell tiles, and the track map.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                  |
//! |-----------|-----------------------------------------------------------|
//! | [`piece`] | `RailPiece`, `PieceKind`                                  |
//! | [`tile`]  | `RailTile` bitset, buffer normalization, random choice    |
//! | [`graph`] | `TrackGraph`, `TrackDiff`                                 |
//! | [`error`] | `TrackError`, `TrackResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                    |
//! |---------|-----------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.        |

pub mod error;
pub mod graph;
pub mod piece;
pub mod tile;


pub use error::{TrackError, TrackResult};
pub use graph::{TrackDiff, TrackGraph};
pub use piece::{PieceKind, RailPiece};
pub use tile::RailTile;
