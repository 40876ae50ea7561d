//! Simulation configuration.
//!
//! Typically loaded from a JSON file by the application crate and passed to
//! the world builder.  Every field has a default matching the reference
//! gameplay tuning.

use crate::{CoreError, CoreResult, SimClock, Tick};

/// How rolling friction is applied each tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FrictionModel {
    /// Constant decrement `R·μ·dt/M`, clamped to `|v|`.
    Coulomb,
    /// Decrement proportional to speed, `R·μ·|v|·dt/M`, clamped to `|v|`.
    /// Under a constant throttle speed settles at `F / (M·μ·g)`.
    #[default]
    Viscous,
}

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RailConfig {
    /// Seconds per tick.
    pub dt: f32,

    /// Total ticks for `World::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Report car poses every N ticks.  0 disables snapshots.
    pub snapshot_interval_ticks: u64,

    /// Gravity constant used for the rolling reaction force.
    pub gravity: f32,

    /// Rolling friction coefficient μ.
    pub friction_coefficient: f32,

    /// Extra reaction per unit mass per (speed²) while a car is on a curved
    /// tile.  A gameplay-feel constant, not a physical law.
    pub curve_friction_factor: f32,

    /// How rolling friction slows a train each tick.  Defaults to
    /// [`FrictionModel::Viscous`], which scales the decrement `R·μ·dt/M` by
    /// the current speed so a throttled train settles at `F/(M·μ·g)`.
    /// [`FrictionModel::Coulomb`] applies the constant decrement as written.
    pub friction_model: FrictionModel,

    /// Gap between consecutive cars, in distance units.
    pub car_spacing: f32,

    /// Defaults for cars built with `TrainCar::engine` / `TrainCar::wagon`.
    pub car_length: f32,
    pub car_mass: f32,
    pub engine_force: f32,

    /// Give up an A* search after this many node expansions.  `None` never
    /// gives up.
    pub max_path_expansions: Option<usize>,
}

impl Default for RailConfig {
    fn default() -> Self {
        Self {
            dt:                      1.0 / 60.0,
            total_ticks:             3_600,
            seed:                    0,
            snapshot_interval_ticks: 1,
            gravity:                 9.81,
            friction_coefficient:    0.04,
            curve_friction_factor:   4.0,
            friction_model:          FrictionModel::Viscous,
            car_spacing:             0.25,
            car_length:              1.0 / 3.0,
            car_mass:                1.0,
            engine_force:            1.0,
            max_path_expansions:     None,
        }
    }
}

impl RailConfig {
    /// The tick at which `World::run` stops (exclusive).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.dt)
    }

    /// Reject values the physics step cannot integrate.
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(CoreError::Config(format!("dt must be positive, got {}", self.dt)));
        }
        if self.car_length <= 0.0 || self.car_mass <= 0.0 {
            return Err(CoreError::Config("car length and mass must be positive".into()));
        }
        if self.car_spacing < 0.0 {
            return Err(CoreError::Config(format!(
                "car spacing must not be negative, got {}",
                self.car_spacing
            )));
        }
        if self.friction_coefficient < 0.0 || self.gravity < 0.0 {
            return Err(CoreError::Config("gravity and friction must not be negative".into()));
        }
        Ok(())
    }
}
