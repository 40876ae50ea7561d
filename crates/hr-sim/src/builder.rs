//! Fluent builder for constructing a [`World`].

use hr_core::{GridPlacement, RailConfig};
use hr_route::{AStarPlanner, FootprintMap, PathPlanner};
use hr_track::TrackGraph;

use crate::{SimResult, World};

/// Fluent builder for [`World<P>`].
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                                         |
/// |--------------------|-------------------------------------------------|
/// | `.track(g)`        | Empty `TrackGraph`                              |
/// | `.footprints(m)`   | Empty `FootprintMap`                            |
/// | `.placement(p)`    | `GridPlacement::default()` (identity)           |
/// | `.planner(p)`      | `AStarPlanner` capped by `max_path_expansions`  |
///
/// # Example
///
/// ```rust,ignore
/// let mut world = WorldBuilder::new(config)
///     .footprints(buildings)
///     .build()?;
/// world.place_track(start, end)?;
/// world.run(&mut NoopObserver)?;
/// ```
pub struct WorldBuilder<P: PathPlanner = AStarPlanner> {
    config:     RailConfig,
    planner:    P,
    track:      Option<TrackGraph>,
    footprints: Option<FootprintMap>,
    placement:  Option<GridPlacement>,
}

impl WorldBuilder<AStarPlanner> {
    /// Start from a config; the planner honours `config.max_path_expansions`.
    pub fn new(config: RailConfig) -> Self {
        let planner = AStarPlanner::new().with_max_expansions(config.max_path_expansions);
        Self { config, planner, track: None, footprints: None, placement: None }
    }
}

impl<P: PathPlanner> WorldBuilder<P> {
    /// Start from existing track, e.g. a loaded save.
    pub fn track(mut self, track: TrackGraph) -> Self {
        self.track = Some(track);
        self
    }

    /// Cells reserved by other structures.  Routes never enter them.
    pub fn footprints(mut self, footprints: FootprintMap) -> Self {
        self.footprints = Some(footprints);
        self
    }

    pub fn placement(mut self, placement: GridPlacement) -> Self {
        self.placement = Some(placement);
        self
    }

    /// Swap in a different planner implementation.
    pub fn planner<Q: PathPlanner>(self, planner: Q) -> WorldBuilder<Q> {
        WorldBuilder {
            config:     self.config,
            planner,
            track:      self.track,
            footprints: self.footprints,
            placement:  self.placement,
        }
    }

    /// Validate the config and return a world with no trains.
    pub fn build(self) -> SimResult<World<P>> {
        self.config.validate()?;

        Ok(World::from_parts(
            self.config,
            self.track.unwrap_or_default(),
            self.footprints.unwrap_or_default(),
            self.placement.unwrap_or_default(),
            self.planner,
        ))
    }
}
