//! `hr-sim`: the authoritative world: track, trains, and the tick loop.
//!
//! # Tick loop
//!
//! ```text
//! between ticks:
//!   place_track(start, end)  → A* around footprints; lay pieces and buffers
//!   delete_track(endpoint)   → strip pieces touching that boundary
//!   (each non-empty TrackDiff is queued)
//!
//! for tick in 0..config.total_ticks:
//!   ① Diffs    : flush queued TrackDiffs to the observer.
//!   ② Trains   : Train::step for every train against the shared track
//!                (parallel with the `parallel` feature).
//!   ③ Report   : halts, tick end, and a snapshot every
//!                `snapshot_interval_ticks`.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Steps trains on Rayon's thread pool.                   |
//! | `serde`    | Forwards `serde` to every `hr-*` dependency.           |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use hr_core::{HexCoord, HexCoordEdge, HexEdge, RailConfig};
//! use hr_sim::{NoopObserver, WorldBuilder};
//! use hr_train::TrainCar;
//!
//! let config = RailConfig::default();
//! let mut world = WorldBuilder::new(config.clone()).build()?;
//! world.place_track(
//!     HexCoordEdge::new(HexCoord::new(0, 1), HexEdge::Bottom),
//!     HexCoordEdge::new(HexCoord::new(0, 5), HexEdge::Top),
//! )?;
//! let id = world.add_train(start_pos, glam::Vec2::Y, [TrainCar::engine(&config)])?;
//! world.set_throttle(id, 1.0)?;
//! world.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod world;

#[cfg(test)]
mod tests;

pub use builder::WorldBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, WorldObserver};
pub use world::{world_poses, World};
