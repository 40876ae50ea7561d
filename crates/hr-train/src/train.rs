//! One train: consist, physics state, and the fixed-step update.
//!
//! # Tick order
//!
//! 1. Advance head travel by `velocity · dt`.
//! 2. Lay out cars back from the head; sum force, mass and rolling reaction.
//! 3. Integrate velocity: throttle acceleration, then friction.
//! 4. Commit to new tiles while head travel overruns the head tile, halting
//!    at the first boundary with no connecting track.
//! 5. Resample every car pose.
//!
//! Step 3 uses the tiles covering the cars *before* step 4 pushes new ones.

use glam::{Vec2, Vec3};
use tracing::{debug, info, warn};

use hr_core::grid::{cell_at, edge_direction};
use hr_core::{FrictionModel, HexCoordEdge, HexEdge, RailConfig, TrainId, TrainRng};
use hr_track::{RailTile, TrackGraph};

use crate::{CarPose, TileQueue, TrainCar, TrainError, TrainResult, TraversedTile};

/// Fraction of a car's length from its centre to each pose sample.
const SAMPLE_OFFSET: f32 = 0.375;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrainState {
    #[default]
    OffTrack,
    OnTrack,
}

/// What one call to [`Train::step`] did.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    /// No cars, or no track under the train.
    OffTrack,
    /// Physics ran; the train may or may not have moved.
    Running,
    /// The head ran out of track at `at` and was stopped there.
    Halted { at: HexCoordEdge },
}

#[derive(Clone, Debug)]
pub struct Train {
    pub id:       TrainId,
    pub spacing:  f32,
    cars:         Vec<TrainCar>,
    state:        TrainState,
    throttle:     f32,
    velocity:     f32,
    head_travel:  f32,
    total_length: f32,
    queue:        TileQueue,
    /// Lead car position and facing; where to look for track while off it.
    position:     Vec2,
    heading:      Vec2,
}

impl Train {
    pub fn new(id: TrainId, spacing: f32) -> Self {
        Self {
            id,
            spacing,
            cars: Vec::new(),
            state: TrainState::OffTrack,
            throttle: 0.0,
            velocity: 0.0,
            head_travel: 0.0,
            total_length: 0.0,
            queue: TileQueue::new(),
            position: Vec2::ZERO,
            heading: Vec2::Y,
        }
    }

    pub fn from_config(id: TrainId, config: &RailConfig) -> Self {
        Self::new(id, config.car_spacing)
    }

    /// Append a car at the rear.
    pub fn push_car(&mut self, car: TrainCar) -> &mut Self {
        self.cars.push(car);
        self
    }

    /// Move an off-track train so the next tick looks for track at
    /// `position`, preferring the edge closest to `heading`.
    pub fn place(&mut self, position: Vec2, heading: Vec2) {
        self.position = position;
        self.heading = heading.normalize_or(Vec2::Y);
        self.derail();
    }

    /// Drop back to `OffTrack`, forgetting committed tiles, speed and poses.
    pub fn derail(&mut self) {
        self.state = TrainState::OffTrack;
        self.queue.clear();
        self.head_travel = 0.0;
        self.velocity = 0.0;
        for car in &mut self.cars {
            car.pose = None;
        }
    }

    /// Throttle is clamped to `[0, 1]`; reversing is not modelled.
    pub fn set_throttle(&mut self, value: f32) {
        self.throttle = value.clamp(0.0, 1.0);
    }

    // ── Accessors ────────────────────────────────────────────────────────────

    #[inline]
    pub fn throttle(&self) -> f32 {
        self.throttle
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn head_travel(&self) -> f32 {
        self.head_travel
    }

    #[inline]
    pub fn state(&self) -> TrainState {
        self.state
    }

    #[inline]
    pub fn is_on_track(&self) -> bool {
        self.state == TrainState::OnTrack
    }

    /// Consist length from the last tick, trailing spacing included.
    #[inline]
    pub fn total_length(&self) -> f32 {
        self.total_length
    }

    #[inline]
    pub fn cars(&self) -> &[TrainCar] {
        &self.cars
    }

    #[inline]
    pub fn traversed(&self) -> &TileQueue {
        &self.queue
    }

    /// The tile the head of the train is on.
    #[inline]
    pub fn head_tile(&self) -> Option<&TraversedTile> {
        self.queue.head()
    }

    /// Tile covering a point `distance_from_head` behind the front, and
    /// the fractional progress of that point through it.
    pub fn traversed_tile_at(&self, distance_from_head: f32) -> Option<(&TraversedTile, f32)> {
        let (tile, offset) = self.queue.lookup(self.head_travel, distance_from_head)?;
        Some((tile, (self.head_travel - distance_from_head + offset) / tile.length))
    }

    /// Poses of every placeable car, paired with its index in the consist.
    pub fn car_poses(&self) -> impl Iterator<Item = (usize, CarPose)> + '_ {
        self.cars.iter().enumerate().filter_map(|(i, c)| c.pose.map(|p| (i, p)))
    }

    // ── Track acquisition ────────────────────────────────────────────────────

    /// Try to move from `OffTrack` to `OnTrack` using the through pieces in
    /// the cell under the train.  Returns whether the train is now on track.
    pub fn put_on_track(&mut self, graph: &TrackGraph, rng: &mut TrainRng) -> TrainResult<bool> {
        let coord = cell_at(self.position);
        let tile = graph.get(coord) & RailTile::THROUGH;
        if tile.is_empty() {
            return Ok(false);
        }

        let piece = tile.random_piece(rng)?;
        let forward = self.heading;

        let best = piece
            .edges()
            .iter()
            .copied()
            .max_by(|a, b| edge_direction(*a).dot(forward).total_cmp(&edge_direction(*b).dot(forward)))
            .unwrap_or(HexEdge::Top);
        let from = piece.connected_edge(best)?;

        self.queue.clear();
        self.queue.push(TraversedTile::new(coord, from, best), self.total_length);
        self.head_travel = 0.0;
        self.state = TrainState::OnTrack;

        info!(train = %self.id, %coord, ?piece, heading = %best, "train on track");
        Ok(true)
    }

    // ── Fixed step ───────────────────────────────────────────────────────────

    pub fn step(
        &mut self,
        graph: &TrackGraph,
        config: &RailConfig,
        rng: &mut TrainRng,
    ) -> TrainResult<TickOutcome> {
        if self.cars.is_empty() {
            return Ok(TickOutcome::OffTrack);
        }
        if !self.is_on_track() && !self.put_on_track(graph, rng)? {
            return Ok(TickOutcome::OffTrack);
        }

        let dt = config.dt;
        self.head_travel += self.velocity * dt;

        // Consist layout and forces.
        let mut offset = 0.0;
        let mut total_mass = 0.0;
        let mut total_force = 0.0;
        let mut total_reaction = 0.0;

        for car in &mut self.cars {
            offset += car.length * 0.5;
            car.distance_from_head = offset;
            offset += car.length * 0.5 + self.spacing;

            total_mass += car.mass;
            total_force += car.engine_force;

            // Cars behind the retained queue add no reaction until it fills.
            let Some((tile, _)) = self.queue.lookup(self.head_travel, car.distance_from_head) else {
                continue;
            };
            let curve_boost = if tile.is_curved() {
                config.curve_friction_factor * self.velocity * self.velocity
            } else {
                0.0
            };
            total_reaction += car.mass * (config.gravity + curve_boost);
        }
        self.total_length = offset;

        self.integrate(config, total_force, total_mass, total_reaction);

        let outcome = self.advance_tiles(graph, rng)?;
        self.update_poses();
        Ok(outcome)
    }

    fn integrate(&mut self, config: &RailConfig, force: f32, mass: f32, reaction: f32) {
        if mass <= 0.0 {
            return;
        }
        let dt = config.dt;
        let start_speed = self.velocity.abs();

        self.velocity += self.throttle * force / mass * dt;

        let decrement = match config.friction_model {
            FrictionModel::Coulomb => reaction * config.friction_coefficient * dt / mass,
            FrictionModel::Viscous => {
                reaction * config.friction_coefficient * start_speed * dt / mass
            }
        };
        self.velocity -= decrement.min(self.velocity.abs()) * self.velocity.signum();
    }

    fn advance_tiles(&mut self, graph: &TrackGraph, rng: &mut TrainRng) -> TrainResult<TickOutcome> {
        loop {
            let head = *self.queue.head().ok_or(TrainError::EmptyQueue(self.id))?;
            if self.head_travel <= head.length {
                return Ok(TickOutcome::Running);
            }
            self.head_travel -= head.length;

            let exit = head.exit();
            let next = exit.opposite();
            let candidates = graph.get(next.coord).filter_by_edge(next.edge) & RailTile::THROUGH;

            if candidates.is_empty() {
                self.throttle = 0.0;
                self.velocity = 0.0;
                self.head_travel = head.length;
                warn!(train = %self.id, at = %exit, "no track ahead, train halted");
                return Ok(TickOutcome::Halted { at: exit });
            }

            let piece = candidates.random_piece(rng)?;
            let to = piece.connected_edge(next.edge)?;
            self.queue.push(TraversedTile::new(next.coord, next.edge, to), self.total_length);
            debug!(train = %self.id, coord = %next.coord, ?piece, "entered tile");
        }
    }

    /// Sample each car at two points a little ahead of and behind its
    /// centre, and average them.
    fn update_poses(&mut self) {
        for car in &mut self.cars {
            let reach = car.length * SAMPLE_OFFSET;
            let front = self.queue.sample(self.head_travel, car.distance_from_head - reach);
            let rear = self.queue.sample(self.head_travel, car.distance_from_head + reach);

            car.pose = match (front, rear) {
                (Some((fp, fr)), Some((rp, rr))) => Some(CarPose {
                    position: (fp + rp) * 0.5,
                    rotation: fr.slerp(rr, 0.5),
                }),
                _ => None,
            };
        }

        if let Some(lead) = self.cars.first().and_then(|c| c.pose) {
            self.position = lead.position.truncate();
            self.heading = lead.forward().truncate();
        }
    }

    /// Plane position of the lead car, or of the placement while off track.
    pub fn position(&self) -> Vec3 {
        self.position.extend(0.0)
    }
}
