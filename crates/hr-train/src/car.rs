//! Individual cars of a consist.

use glam::{EulerRot, Quat, Vec3};

use hr_core::RailConfig;

/// Plane-space pose of one car.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl CarPose {
    /// Heading about +Z in radians; 0 faces +X.
    pub fn yaw(&self) -> f32 {
        self.rotation.to_euler(EulerRot::ZYX).0
    }

    /// Unit vector the car faces.
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::X
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrainCar {
    /// Tractive force at full throttle.  Zero for unpowered wagons.
    pub engine_force:       f32,
    pub mass:               f32,
    pub length:             f32,
    /// Distance from the front of the train to this car's centre.
    /// Recomputed every tick.
    pub distance_from_head: f32,
    /// `None` until the traversed queue reaches back far enough.
    pub pose:               Option<CarPose>,
}

impl TrainCar {
    pub fn new(engine_force: f32, mass: f32, length: f32) -> Self {
        Self { engine_force, mass, length, distance_from_head: 0.0, pose: None }
    }

    /// A powered car with the configured defaults.
    pub fn engine(config: &RailConfig) -> Self {
        Self::new(config.engine_force, config.car_mass, config.car_length)
    }

    /// An unpowered car with the configured defaults.
    pub fn wagon(config: &RailConfig) -> Self {
        Self::new(0.0, config.car_mass, config.car_length)
    }
}
