//! Plain data rows written by trace backends.

use hr_core::{Tick, TrainId};
use hr_track::TrackDiff;
use hr_train::CarPose;

/// One car's world-space pose at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarPoseRow {
    pub tick:  u64,
    pub train: u32,
    /// Index within the consist, front first.
    pub car:   u32,
    pub x:     f32,
    pub y:     f32,
    pub z:     f32,
    /// Radians about the world up axis.
    pub yaw:   f32,
}

impl CarPoseRow {
    pub fn new(tick: Tick, train: TrainId, car: usize, pose: &CarPose) -> Self {
        Self {
            tick:  tick.0,
            train: train.0,
            car:   car as u32,
            x:     pose.position.x,
            y:     pose.position.y,
            z:     pose.position.z,
            yaw:   pose.yaw(),
        }
    }
}

/// One cell's track change.  Masks are raw `RailTile` bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackDiffRow {
    pub tick:    u64,
    pub x:       i32,
    pub y:       i32,
    pub added:   u16,
    pub removed: u16,
}

impl TrackDiffRow {
    pub fn new(tick: Tick, diff: &TrackDiff) -> Self {
        Self {
            tick:    tick.0,
            x:       diff.coord.x,
            y:       diff.coord.y,
            added:   diff.added.bits(),
            removed: diff.removed.bits(),
        }
    }
}
