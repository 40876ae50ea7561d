//! The `World` struct: track, trains, and the tick loop.

use glam::Vec2;
use tracing::{debug, info};

use hr_core::{
    GridPlacement, HexCoordEdge, RailConfig, SimClock, Tick, TrainId, TrainRng,
};
use hr_route::{FootprintMap, Obstacles, PathPlanner, PathRequest, Route, SearchScratch};
use hr_track::{RailPiece, TrackDiff, TrackGraph};
use hr_train::{CarPose, TickOutcome, Train, TrainCar};

use crate::{NoopObserver, SimError, SimResult, WorldObserver};

/// The rail world.
///
/// Create via [`WorldBuilder`][crate::WorldBuilder]; do not construct
/// directly.  Track edits (`place_track`, `delete_track`) happen between
/// ticks and are reported to the observer at the start of the next one.
pub struct World<P: PathPlanner> {
    pub config:     RailConfig,
    pub clock:      SimClock,
    pub track:      TrackGraph,
    pub footprints: FootprintMap,
    pub placement:  GridPlacement,
    pub planner:    P,

    /// Indexed by `TrainId`.
    trains:         Vec<Train>,
    /// One per train, same order.
    rngs:           Vec<TrainRng>,
    scratch:        SearchScratch,
    pending_diffs:  Vec<TrackDiff>,
}

impl<P: PathPlanner> World<P> {
    pub(crate) fn from_parts(
        config:     RailConfig,
        track:      TrackGraph,
        footprints: FootprintMap,
        placement:  GridPlacement,
        planner:    P,
    ) -> Self {
        Self {
            clock: config.make_clock(),
            config,
            track,
            footprints,
            placement,
            planner,
            trains: Vec::new(),
            rngs: Vec::new(),
            scratch: SearchScratch::new(),
            pending_diffs: Vec::new(),
        }
    }

    // ── Trains ────────────────────────────────────────────────────────────

    /// Add an off-track train at `position`, facing `heading`.  It looks for
    /// track under itself on every tick until it finds some.
    pub fn add_train(
        &mut self,
        position: Vec2,
        heading:  Vec2,
        cars:     impl IntoIterator<Item = TrainCar>,
    ) -> SimResult<TrainId> {
        let id = TrainId::try_from(self.trains.len()).map_err(|_| SimError::TooManyTrains)?;

        let mut train = Train::from_config(id, &self.config);
        for car in cars {
            train.push_car(car);
        }
        train.place(position, heading);

        info!(train = %id, cars = train.cars().len(), "train added");
        self.trains.push(train);
        self.rngs.push(TrainRng::new(self.config.seed, id));
        Ok(id)
    }

    #[inline]
    pub fn trains(&self) -> &[Train] {
        &self.trains
    }

    pub fn train(&self, id: TrainId) -> SimResult<&Train> {
        self.trains.get(id.index()).ok_or(SimError::UnknownTrain(id))
    }

    pub fn train_mut(&mut self, id: TrainId) -> SimResult<&mut Train> {
        self.trains.get_mut(id.index()).ok_or(SimError::UnknownTrain(id))
    }

    pub fn set_throttle(&mut self, id: TrainId, value: f32) -> SimResult<()> {
        self.train_mut(id)?.set_throttle(value);
        Ok(())
    }

    /// Car poses of every train in world space.
    pub fn car_poses(&self) -> impl Iterator<Item = (TrainId, usize, CarPose)> + '_ {
        world_poses(&self.trains, &self.placement)
    }

    // ── Track editing ─────────────────────────────────────────────────────

    /// Plan a route from `start` to `end` around the footprints without
    /// touching the track.
    pub fn find_path(&mut self, start: HexCoordEdge, end: HexCoordEdge) -> SimResult<Route> {
        let request = PathRequest::new(start, end);
        let route = self.planner.find_path(&request, &self.footprints, &mut self.scratch)?;
        debug!(%start, %end, cost = route.cost, expansions = route.expansions, "route found");
        Ok(route)
    }

    /// Plan a route and lay it.
    ///
    /// Every cell on the route gains its piece.  The cells just beyond either
    /// end gain a buffer facing the route unless they are reserved; a buffer
    /// next to existing through track is absorbed by normalization.  Returns
    /// the non-empty diffs in the order they were applied.
    pub fn place_track(
        &mut self,
        start: HexCoordEdge,
        end:   HexCoordEdge,
    ) -> SimResult<Vec<TrackDiff>> {
        let route = self.find_path(start, end)?;
        if route.is_empty() {
            return Ok(Vec::new());
        }

        let mut diffs = Vec::with_capacity(route.len() + 2);
        for (coord, piece) in route.pieces() {
            diffs.push(self.track.place_tile(coord, piece.into()));
        }

        let caps = [route.first(), route.last().map(HexCoordEdge::opposite)];
        for cap in caps.into_iter().flatten() {
            if !self.footprints.is_blocked(cap.coord) {
                diffs.push(self.track.place_tile(cap.coord, RailPiece::buffer(cap.edge).into()));
            }
        }

        diffs.retain(|d| !d.is_empty());
        self.pending_diffs.extend_from_slice(&diffs);

        info!(%start, %end, pieces = route.len(), cost = route.cost, "track placed");
        Ok(diffs)
    }

    /// Remove every piece in `endpoint.coord` that touches `endpoint.edge`.
    pub fn delete_track(&mut self, endpoint: HexCoordEdge) -> TrackDiff {
        let touching = self.track.touching(endpoint);
        let diff = self.track.remove_tile(endpoint.coord, touching);

        if !diff.is_empty() {
            self.pending_diffs.push(diff);
            info!(%endpoint, removed = ?diff.removed, "track deleted");
        }
        diff
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// Run until `config.end_tick()`.
    pub fn run<O: WorldObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.process_tick(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: WorldObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.process_tick(observer)?;
        }
        Ok(())
    }

    /// Advance one tick without an observer, returning what each train did.
    pub fn tick(&mut self) -> SimResult<Vec<(TrainId, TickOutcome)>> {
        self.process_tick(&mut NoopObserver)
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    fn process_tick<O: WorldObserver>(
        &mut self,
        observer: &mut O,
    ) -> SimResult<Vec<(TrainId, TickOutcome)>> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        for diff in self.pending_diffs.drain(..) {
            observer.on_track_diff(now, &diff);
        }

        let outcomes = self.step_trains()?;

        let mut on_track = 0;
        for &(id, outcome) in &outcomes {
            match outcome {
                TickOutcome::OffTrack => {}
                TickOutcome::Running => on_track += 1,
                TickOutcome::Halted { at } => {
                    on_track += 1;
                    observer.on_train_halted(now, id, at);
                }
            }
        }
        observer.on_tick_end(now, on_track);

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && now.0.is_multiple_of(interval) {
            observer.on_snapshot(now, &self.trains, &self.placement);
        }

        self.clock.advance();
        Ok(outcomes)
    }

    /// Step every train against the current track.
    ///
    /// Each train owns its RNG and only reads the track, so the parallel
    /// and sequential paths produce identical results.
    fn step_trains(&mut self) -> SimResult<Vec<(TrainId, TickOutcome)>> {
        let track = &self.track;
        let config = &self.config;

        #[cfg(feature = "parallel")]
        let outcomes = {
            use rayon::prelude::*;
            self.trains
                .par_iter_mut()
                .zip(self.rngs.par_iter_mut())
                .map(|(train, rng)| step_one(train, track, config, rng))
                .collect::<SimResult<Vec<_>>>()?
        };

        #[cfg(not(feature = "parallel"))]
        let outcomes = self
            .trains
            .iter_mut()
            .zip(self.rngs.iter_mut())
            .map(|(train, rng)| step_one(train, track, config, rng))
            .collect::<SimResult<Vec<_>>>()?;

        Ok(outcomes)
    }
}

fn step_one(
    train:  &mut Train,
    track:  &TrackGraph,
    config: &RailConfig,
    rng:    &mut TrainRng,
) -> SimResult<(TrainId, TickOutcome)> {
    let id = train.id;
    let outcome = train
        .step(track, config, rng)
        .map_err(|source| SimError::Train { train: id, source })?;
    Ok((id, outcome))
}

/// Map every placed car of `trains` from plane space into world space.
pub fn world_poses<'a>(
    trains:    &'a [Train],
    placement: &'a GridPlacement,
) -> impl Iterator<Item = (TrainId, usize, CarPose)> + 'a {
    trains.iter().flat_map(move |train| {
        train.car_poses().map(move |(car, pose)| {
            let world = CarPose {
                position: placement.to_world(pose.position.truncate()),
                rotation: placement.rotate(pose.rotation),
            };
            (train.id, car, world)
        })
    })
}
