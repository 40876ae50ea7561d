//! Unit tests for hr-sim.

#[cfg(test)]
mod helpers {
    use hr_core::{GridPlacement, HexCoord, HexCoordEdge, HexEdge, RailConfig, Tick, TrainId};
    use hr_track::TrackDiff;
    use hr_train::Train;

    use crate::{World, WorldBuilder, WorldObserver};
    use hr_route::AStarPlanner;

    pub fn ep(x: i32, y: i32, edge: HexEdge) -> HexCoordEdge {
        HexCoordEdge::new(HexCoord::new(x, y), edge)
    }

    pub fn world(config: RailConfig) -> World<AStarPlanner> {
        WorldBuilder::new(config).build().unwrap()
    }

    /// Straight track from (0, 1) to (0, 5), heading up.
    pub fn strip(world: &mut World<AStarPlanner>) -> Vec<TrackDiff> {
        world.place_track(ep(0, 1, HexEdge::Bottom), ep(0, 5, HexEdge::Top)).unwrap()
    }

    #[derive(Default)]
    pub struct Recorder {
        pub starts:    u64,
        pub diffs:     Vec<(Tick, TrackDiff)>,
        pub halts:     Vec<(Tick, TrainId, HexCoordEdge)>,
        pub snapshots: Vec<Tick>,
        pub end:       Option<Tick>,
    }

    impl WorldObserver for Recorder {
        fn on_tick_start(&mut self, _tick: Tick) {
            self.starts += 1;
        }

        fn on_track_diff(&mut self, tick: Tick, diff: &TrackDiff) {
            self.diffs.push((tick, *diff));
        }

        fn on_train_halted(&mut self, tick: Tick, train: TrainId, at: HexCoordEdge) {
            self.halts.push((tick, train, at));
        }

        fn on_snapshot(&mut self, tick: Tick, _trains: &[Train], _placement: &GridPlacement) {
            self.snapshots.push(tick);
        }

        fn on_sim_end(&mut self, final_tick: Tick) {
            self.end = Some(final_tick);
        }
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use hr_core::{RailConfig, TrainId};

    use crate::{SimError, WorldBuilder};

    #[test]
    fn rejects_zero_dt() {
        let config = RailConfig { dt: 0.0, ..RailConfig::default() };
        let err = WorldBuilder::new(config).build().err().unwrap();
        assert!(matches!(err, SimError::Config(_)), "{err}");
    }

    #[test]
    fn starts_empty() {
        let world = WorldBuilder::new(RailConfig::default()).build().unwrap();
        assert!(world.track.is_empty());
        assert!(world.trains().is_empty());
        assert_eq!(world.now().0, 0);
        assert!(matches!(world.train(TrainId(0)), Err(SimError::UnknownTrain(TrainId(0)))));
    }
}

// ── Track editing ────────────────────────────────────────────────────────────

#[cfg(test)]
mod editing {
    use hr_core::{HexCoord, HexEdge, OwnerId, RailConfig};
    use hr_route::{FootprintMap, Obstacles, RouteError};
    use hr_track::{RailPiece, RailTile};

    use super::helpers::{ep, strip, world};
    use crate::{SimError, WorldBuilder};

    fn tile(piece: RailPiece) -> RailTile {
        piece.into()
    }

    #[test]
    fn strip_gets_pieces_and_buffers() {
        let mut w = world(RailConfig::default());
        let diffs = strip(&mut w);

        assert_eq!(diffs.len(), 7);
        for y in 1..=5 {
            assert_eq!(w.track.get(HexCoord::new(0, y)), tile(RailPiece::TopBottom), "y = {y}");
        }
        assert_eq!(w.track.get(HexCoord::new(0, 0)), tile(RailPiece::TopBuffer));
        assert_eq!(w.track.get(HexCoord::new(0, 6)), tile(RailPiece::BottomBuffer));
        assert_eq!(w.track.len(), 7);
    }

    #[test]
    fn extension_absorbs_buffers() {
        let mut w = world(RailConfig::default());
        strip(&mut w);
        let diffs = w.place_track(ep(0, 6, HexEdge::Bottom), ep(0, 8, HexEdge::Top)).unwrap();

        // (0, 6) loses its buffer, (0, 7) and (0, 8) are new, (0, 9) is the cap.
        // The cap at (0, 5) is swallowed by the existing straight.
        assert_eq!(diffs.len(), 4);
        assert_eq!(diffs[0].coord, HexCoord::new(0, 6));
        assert_eq!(diffs[0].removed, tile(RailPiece::BottomBuffer));

        for y in 1..=8 {
            assert_eq!(w.track.get(HexCoord::new(0, y)), tile(RailPiece::TopBottom), "y = {y}");
        }
        assert_eq!(w.track.get(HexCoord::new(0, 9)), tile(RailPiece::BottomBuffer));
    }

    #[test]
    fn reserved_cells_get_no_buffer() {
        let mut footprints = FootprintMap::new();
        footprints.claim(HexCoord::new(0, 0), OwnerId(1));
        let mut w = WorldBuilder::new(RailConfig::default()).footprints(footprints).build().unwrap();

        let diffs = strip(&mut w);
        assert_eq!(diffs.len(), 6);
        assert!(w.track.get(HexCoord::new(0, 0)).is_empty());
    }

    #[test]
    fn route_detours_around_footprint() {
        let mut footprints = FootprintMap::new();
        footprints.claim(HexCoord::new(0, 3), OwnerId(1));
        let mut w = WorldBuilder::new(RailConfig::default()).footprints(footprints).build().unwrap();

        strip(&mut w);
        assert!(w.track.get(HexCoord::new(0, 3)).is_empty());
        assert!(w.track.get(HexCoord::new(0, 5)).touches(HexEdge::Top));
        for (coord, _) in w.track.iter() {
            assert!(!w.footprints.is_blocked(coord), "track laid on {coord}");
        }
    }

    #[test]
    fn blocked_end_leaves_track_untouched() {
        let mut footprints = FootprintMap::new();
        footprints.claim(HexCoord::new(0, 5), OwnerId(1));
        let mut w = WorldBuilder::new(RailConfig::default()).footprints(footprints).build().unwrap();

        let end = ep(0, 5, HexEdge::Top);
        let err = w.place_track(ep(0, 1, HexEdge::Bottom), end).unwrap_err();
        assert!(matches!(err, SimError::Route(RouteError::Blocked(at)) if at == end), "{err}");
        assert!(w.track.is_empty());
    }

    #[test]
    fn turning_back_on_itself_is_a_no_op() {
        let mut w = world(RailConfig::default());
        let start = ep(0, 1, HexEdge::Bottom);
        let diffs = w.place_track(start, start.opposite()).unwrap();
        assert!(diffs.is_empty());
        assert!(w.track.is_empty());
    }

    #[test]
    fn delete_removes_only_touching_pieces() {
        let mut w = world(RailConfig::default());
        let c = HexCoord::new(0, 0);
        w.track.place_tile(c, tile(RailPiece::TopBottom) | tile(RailPiece::BottomTopRight));

        let diff = w.delete_track(ep(0, 0, HexEdge::Top));
        assert_eq!(diff.removed, tile(RailPiece::TopBottom));
        assert_eq!(w.track.get(c), tile(RailPiece::BottomTopRight));

        // Nothing left touches Top.
        assert!(w.delete_track(ep(0, 0, HexEdge::Top)).is_empty());
    }
}

// ── Tick loop ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod ticking {
    use hr_core::glam::Vec2;
    use hr_core::{HexEdge, RailConfig, Tick, TrainId};
    use hr_train::{TickOutcome, TrainCar};

    use super::helpers::{ep, strip, world, Recorder};
    use crate::{NoopObserver, SimError};

    #[test]
    fn run_stops_at_end_tick() {
        let config = RailConfig { total_ticks: 30, snapshot_interval_ticks: 10, ..RailConfig::default() };
        let mut w = world(config);
        let mut rec = Recorder::default();
        w.run(&mut rec).unwrap();

        assert_eq!(rec.starts, 30);
        assert_eq!(rec.snapshots, vec![Tick(0), Tick(10), Tick(20)]);
        assert_eq!(rec.end, Some(Tick(30)));
        assert_eq!(w.now(), Tick(30));
    }

    #[test]
    fn diffs_reach_observer_once() {
        let mut w = world(RailConfig::default());
        strip(&mut w);
        let mut rec = Recorder::default();
        w.run_ticks(3, &mut rec).unwrap();

        assert_eq!(rec.diffs.len(), 7);
        assert!(rec.diffs.iter().all(|(t, _)| *t == Tick(0)));

        w.delete_track(ep(0, 3, HexEdge::Top));
        w.run_ticks(1, &mut rec).unwrap();
        assert_eq!(rec.diffs.len(), 8);
        assert_eq!(rec.diffs[7].0, Tick(3));
    }

    #[test]
    fn off_track_train_reports_off_track() {
        let config = RailConfig::default();
        let mut w = world(config.clone());
        let id = w.add_train(Vec2::new(40.0, 40.0), Vec2::Y, [TrainCar::engine(&config)]).unwrap();

        let outcomes = w.tick().unwrap();
        assert_eq!(outcomes, vec![(id, TickOutcome::OffTrack)]);
        assert_eq!(w.now(), Tick(1));
    }

    #[test]
    fn train_runs_to_the_buffer_and_halts() {
        let config = RailConfig::default();
        let mut w = world(config.clone());
        strip(&mut w);

        let start = hr_core::grid::cell_center(hr_core::HexCoord::new(0, 1));
        let id = w
            .add_train(start, Vec2::Y, [TrainCar::engine(&config), TrainCar::wagon(&config)])
            .unwrap();
        w.set_throttle(id, 1.0).unwrap();

        let mut rec = Recorder::default();
        w.run_ticks(600, &mut rec).unwrap();

        assert_eq!(rec.halts.len(), 1);
        let (_, train, at) = rec.halts[0];
        assert_eq!(train, id);
        assert_eq!(at, ep(0, 5, HexEdge::Top));

        let train = w.train(id).unwrap();
        assert_eq!(train.velocity(), 0.0);
        assert_eq!(train.throttle(), 0.0);
        assert!(w.car_poses().count() >= 1);
    }

    #[test]
    fn unknown_train_is_an_error() {
        let mut w = world(RailConfig::default());
        let err = w.set_throttle(TrainId(3), 1.0).unwrap_err();
        assert!(matches!(err, SimError::UnknownTrain(TrainId(3))));
    }

    #[test]
    fn same_seed_same_motion() {
        let config = RailConfig { seed: 17, ..RailConfig::default() };

        let run = || {
            let mut w = world(config.clone());
            strip(&mut w);
            // A branch leaving the strip, so junction choices come into play.
            w.place_track(ep(0, 3, HexEdge::Bottom), ep(3, 7, HexEdge::TopRight)).unwrap();

            let start = hr_core::grid::cell_center(hr_core::HexCoord::new(0, 1));
            for _ in 0..3 {
                let id = w.add_train(start, Vec2::Y, [TrainCar::engine(&config)]).unwrap();
                w.set_throttle(id, 0.8).unwrap();
            }
            w.run_ticks(240, &mut NoopObserver).unwrap();
            w.car_poses().collect::<Vec<_>>()
        };

        let a = run();
        assert!(!a.is_empty());
        assert_eq!(a, run());
    }
}
