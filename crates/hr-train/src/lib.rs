//! `hr-train`: trains moving along committed track tiles.
//!
//! A train never plans a route.  Each tick it looks at the cell ahead of its
//! head tile, commits to one connecting piece (randomly at junctions), and
//! keeps just enough committed tiles to place every car.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`train`]     | `Train`, `TrainState`, `TickOutcome`                  |
//! | [`traversed`] | `TraversedTile`, `TileQueue`                          |
//! | [`car`]       | `TrainCar`, `CarPose`                                 |
//! | [`error`]     | `TrainError`, `TrainResult<T>`                        |

pub mod car;
pub mod error;
pub mod train;
pub mod traversed;


pub use car::{CarPose, TrainCar};
pub use error::{TrainError, TrainResult};
pub use train::{TickOutcome, Train, TrainState};
pub use traversed::{TileQueue, TraversedTile};
