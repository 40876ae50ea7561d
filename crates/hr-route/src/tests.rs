//! Unit tests for hr-route.
//!
//! All maps are predicates over a handful of cells; nothing here needs a
//! `TrackGraph`.

#[cfg(test)]
mod helpers {
    use hr_core::{HexCoord, HexCoordEdge, HexEdge};

    pub fn ep(x: i32, y: i32, edge: HexEdge) -> HexCoordEdge {
        HexCoordEdge::new(HexCoord::new(x, y), edge)
    }

    /// Only cells (0, 0) ..= (0, 5) are open.
    pub fn strip(c: HexCoord) -> bool {
        !(c.x == 0 && (0..=5).contains(&c.y))
    }

    /// A 7×7 axial parallelogram with a wall and two pillars.
    ///
    /// ```text
    ///   y=6  . . . . . . .
    ///   y=5  . # . . . # .
    ///   y=4  . . . # . . .
    ///   y=3  . . . # . . .
    ///   y=2  . . . # . . .
    ///   y=1  . . . # . . .
    ///   y=0  . . . . . . .
    ///        x=0 ...   x=6
    /// ```
    pub fn walled(c: HexCoord) -> bool {
        let outside = !(0..7).contains(&c.x) || !(0..7).contains(&c.y);
        let wall = c.x == 3 && (1..=4).contains(&c.y);
        let pillar = c == HexCoord::new(1, 5) || c == HexCoord::new(5, 5);
        outside || wall || pillar
    }
}

// ── Basic requests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod requests {
    use hr_core::{HexCoord, HexEdge};
    use hr_track::{PieceKind, RailPiece};

    use super::helpers::{ep, strip};
    use crate::{AStarPlanner, NoObstacles, PathPlanner, PathRequest, RouteError, SearchScratch};

    #[test]
    fn straight_strip() {
        // Straight run up the x = 0 column. A request names the edge track
        // enters through and the edge it leaves through, so "from (0,0) Top
        // to (0,5) Bottom" is asked for as (0,1) Bottom to (0,5) Top.
        let req = PathRequest::new(ep(0, 1, HexEdge::Bottom), ep(0, 5, HexEdge::Top));
        let route = AStarPlanner::new()
            .find_path(&req, &strip, &mut SearchScratch::new())
            .unwrap();

        assert_eq!(route.endpoints.len(), 6);
        assert_eq!(route.first(), Some(ep(0, 0, HexEdge::Top)));
        assert_eq!(route.last(), Some(ep(0, 5, HexEdge::Top)));
        assert!((route.cost - 5.0).abs() < 1e-5, "cost {}", route.cost);

        let pieces: Vec<_> = route.pieces().collect();
        assert_eq!(pieces.len(), 5);
        for (i, (coord, piece)) in pieces.into_iter().enumerate() {
            assert_eq!(coord, HexCoord::new(0, i as i32 + 1));
            assert_eq!(piece, RailPiece::TopBottom);
        }
    }

    #[test]
    fn same_endpoint_is_degenerate() {
        let p = ep(2, 2, HexEdge::TopLeft);
        let err = AStarPlanner::new()
            .find_path(&PathRequest::new(p, p), &NoObstacles, &mut SearchScratch::new())
            .unwrap_err();
        assert_eq!(err, RouteError::Degenerate(p));
    }

    #[test]
    fn sharp_turns_rejected() {
        let req = PathRequest {
            allow_sharp_turns: true,
            ..PathRequest::new(ep(0, 0, HexEdge::Top), ep(0, 3, HexEdge::Top))
        };
        let err = AStarPlanner::new()
            .find_path(&req, &NoObstacles, &mut SearchScratch::new())
            .unwrap_err();
        assert_eq!(err, RouteError::SharpTurnsUnsupported);
    }

    #[test]
    fn blocked_end_vetoes_route() {
        let end = ep(0, 7, HexEdge::Top);
        let req = PathRequest::new(ep(0, 1, HexEdge::Bottom), end);
        let err = AStarPlanner::new()
            .find_path(&req, &strip, &mut SearchScratch::new())
            .unwrap_err();
        assert_eq!(err, RouteError::Blocked(end));
    }

    #[test]
    fn enclosed_start_has_no_route() {
        let start = ep(0, 0, HexEdge::Top);
        let end = ep(4, 4, HexEdge::Top);
        // Everything but the two end cells is blocked.
        let blocked = move |c: HexCoord| c != start.coord && c != end.coord;

        let err = AStarPlanner::new()
            .find_path(&PathRequest::new(start, end), &blocked, &mut SearchScratch::new())
            .unwrap_err();
        assert_eq!(err, RouteError::NoRoute { from: start, to: end });
    }

    #[test]
    fn expansion_cap_gives_up() {
        let req = PathRequest::new(ep(0, 0, HexEdge::Top), ep(20, -10, HexEdge::BottomRight));
        let err = AStarPlanner::new()
            .with_max_expansions(Some(3))
            .find_path(&req, &NoObstacles, &mut SearchScratch::new())
            .unwrap_err();
        assert_eq!(err, RouteError::SearchExhausted { expansions: 3 });
    }

    #[test]
    fn turn_uses_curves() {
        // Heading up, finish heading up-right one column over.
        let req = PathRequest::new(ep(0, 1, HexEdge::Bottom), ep(1, 3, HexEdge::TopRight));
        let route = AStarPlanner::new()
            .find_path(&req, &NoObstacles, &mut SearchScratch::new())
            .unwrap();
        let curves = route.pieces().filter(|(_, p)| p.kind() == PieceKind::Curved).count();
        assert!(curves >= 1);
        assert!(route.cost > 2.0);
    }

    #[test]
    fn scratch_reuse_matches_fresh() {
        let planner = AStarPlanner::new();
        let mut shared = SearchScratch::new();
        let a = PathRequest::new(ep(0, 0, HexEdge::Top), ep(3, 5, HexEdge::TopRight));
        let b = PathRequest::new(ep(2, -1, HexEdge::Bottom), ep(-3, -4, HexEdge::BottomLeft));

        let first = planner.find_path(&a, &NoObstacles, &mut shared).unwrap();
        let second = planner.find_path(&b, &NoObstacles, &mut shared).unwrap();

        assert_eq!(first, planner.find_path(&a, &NoObstacles, &mut SearchScratch::new()).unwrap());
        assert_eq!(second, planner.find_path(&b, &NoObstacles, &mut SearchScratch::new()).unwrap());
        assert!(shared.visited() > 0);
    }
}

// ── Route validity and optimality ────────────────────────────────────────────

#[cfg(test)]
mod optimality {
    use pathfinding::prelude::dijkstra_all;

    use hr_core::grid::{CURVE_LENGTH, STRAIGHT_LENGTH};
    use hr_core::{HexCoord, HexCoordEdge, HexEdge};

    use super::helpers::walled;
    use crate::{AStarPlanner, PathPlanner, PathRequest, RouteError, SearchScratch};

    const SCALE: f64 = 1_000_000.0;

    /// Same successor rule as the planner, with integer costs for the oracle.
    fn successors(node: &HexCoordEdge) -> Vec<(HexCoordEdge, u64)> {
        let straight = (STRAIGHT_LENGTH as f64 * SCALE).round() as u64;
        let curve = (CURVE_LENGTH as f64 * SCALE).round() as u64;
        let n = node.neighbor();
        [
            (HexCoordEdge::new(n, node.edge), straight),
            (HexCoordEdge::new(n, node.edge.next()), curve),
            (HexCoordEdge::new(n, node.edge.prev()), curve),
        ]
        .into_iter()
        .filter(|(next, _)| !walled(next.coord))
        .collect()
    }

    fn open_endpoints() -> Vec<HexCoordEdge> {
        let mut out = Vec::new();
        for x in 0..7 {
            for y in 0..7 {
                let c = HexCoord::new(x, y);
                if !walled(c) {
                    out.extend(HexEdge::ALL.map(|e| HexCoordEdge::new(c, e)));
                }
            }
        }
        out
    }

    #[test]
    fn astar_matches_exhaustive_search() {
        let planner = AStarPlanner::new();
        let mut scratch = SearchScratch::new();
        let endpoints = open_endpoints();

        let starts = endpoints.iter().filter(|p| p.coord.x % 2 == 0 && p.coord.y % 2 == 0);
        let mut checked = 0;

        for &start in starts {
            let seed = start.opposite();
            let oracle = dijkstra_all(&seed, successors);

            for &goal in &endpoints {
                if goal == start || goal == seed {
                    continue;
                }
                let result = planner.find_path(&PathRequest::new(start, goal), &walled, &mut scratch);

                match oracle.get(&goal) {
                    Some(&(_, best)) => {
                        let route = result.unwrap();
                        let best = (best as f64 / SCALE) as f32;
                        assert!(
                            (route.cost - best).abs() < 1e-3,
                            "{start} -> {goal}: astar {} vs exhaustive {best}",
                            route.cost
                        );
                        checked += 1;
                    }
                    None => {
                        assert_eq!(result.unwrap_err(), RouteError::NoRoute { from: start, to: goal });
                    }
                }
            }
        }
        assert!(checked > 1_000, "only {checked} reachable pairs");
    }

    #[test]
    fn routes_are_connected_and_avoid_obstacles() {
        let planner = AStarPlanner::new();
        let mut scratch = SearchScratch::new();
        let start = HexCoordEdge::new(HexCoord::new(0, 2), HexEdge::Bottom);
        let goal = HexCoordEdge::new(HexCoord::new(6, 3), HexEdge::TopRight);

        let route = planner.find_path(&PathRequest::new(start, goal), &walled, &mut scratch).unwrap();

        for pair in route.endpoints.windows(2) {
            assert_eq!(pair[1].coord, pair[0].neighbor());
            assert!(!walled(pair[1].coord), "route crosses {}", pair[1].coord);
        }
        assert_eq!(route.pieces().count(), route.len());
        for (coord, piece) in route.pieces() {
            assert!(piece.is_through(), "{coord}: {piece:?}");
        }
    }
}

// ── Footprints ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod footprint {
    use hr_core::{HexCoord, HexEdge, OwnerId};

    use super::helpers::ep;
    use crate::{AStarPlanner, FootprintMap, Obstacles, PathPlanner, PathRequest, SearchScratch};

    #[test]
    fn earlier_claim_wins() {
        let mut map = FootprintMap::new();
        let c = HexCoord::new(1, 1);
        assert!(map.claim(c, OwnerId(1)));
        assert!(map.claim(c, OwnerId(1)));
        assert!(!map.claim(c, OwnerId(2)));
        assert_eq!(map.owner_at(c), Some(OwnerId(1)));
    }

    #[test]
    fn claim_all_counts_conflicts() {
        let mut map = FootprintMap::new();
        map.claim(HexCoord::new(0, 2), OwnerId(7));
        let rejected = map.claim_all((0..4).map(|y| HexCoord::new(0, y)), OwnerId(8));
        assert_eq!(rejected, 1);
        assert_eq!(map.len(), 4);
    }

    #[test]
    fn release_frees_cells() {
        let mut map = FootprintMap::new();
        map.claim_all([HexCoord::new(0, 0), HexCoord::new(1, 0)], OwnerId(3));
        map.claim(HexCoord::new(5, 5), OwnerId(4));
        assert_eq!(map.release(OwnerId(3)), 2);
        assert!(!map.is_blocked(HexCoord::new(0, 0)));
        assert!(map.is_blocked(HexCoord::new(5, 5)));
    }

    #[test]
    fn planner_routes_around_footprint() {
        let mut map = FootprintMap::new();
        map.claim_all((1..=3).map(|y| HexCoord::new(0, y)), OwnerId(0));

        let req = PathRequest::new(ep(0, 0, HexEdge::TopLeft), ep(0, 5, HexEdge::Top));
        let route = AStarPlanner::new().find_path(&req, &map, &mut SearchScratch::new()).unwrap();
        assert!(route.endpoints.iter().skip(1).all(|p| !map.is_blocked(p.coord)));
        assert!(route.cost > 5.0);
    }
}
