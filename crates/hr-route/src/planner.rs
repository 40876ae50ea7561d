//! Planner trait and the default A* implementation over track endpoints.
//!
//! # Search graph
//!
//! A node is a [`HexCoordEdge`] read as "track leaves `coord` through
//! `edge`".  From `(c, e)` the track enters `n = c + e` and can leave `n`
//! three ways:
//!
//! | next node       | piece in `n` | cost              |
//! |-----------------|--------------|-------------------|
//! | `(n, e)`        | straight     | `STRAIGHT_LENGTH` |
//! | `(n, e + 1)`    | curve        | `CURVE_LENGTH`    |
//! | `(n, e - 1)`    | curve        | `CURVE_LENGTH`    |
//!
//! The search is seeded with `start.opposite()`, so the first piece of the
//! route lands in `start.coord` and the last in `end.coord`.
//!
//! # Heuristic
//!
//! Plane distance between edge midpoints.  A straight piece moves the
//! midpoint exactly its cost; a curve moves it by the chord (`√3/2`), which
//! is shorter than its cost (`π/3`).  The heuristic is therefore admissible
//! and consistent.
//!
//! # Scratch
//!
//! Open queue, best-g table and predecessor table live in a caller-owned
//! [`SearchScratch`].  Reusing one scratch across calls avoids reallocating;
//! two searches in flight at once need two scratch instances, which the
//! `&mut` borrow enforces.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;
use tracing::debug;

use hr_core::glam::Vec2;
use hr_core::grid::{endpoint_position, CURVE_LENGTH, STRAIGHT_LENGTH};
use hr_core::{HexCoord, HexCoordEdge};
use hr_track::RailPiece;

use crate::{Obstacles, RouteError, RouteResult};

// ── Route ────────────────────────────────────────────────────────────────────

/// A successful search: the node sequence from the seed to the goal.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Endpoints in travel order.  The first is `start.opposite()`, the
    /// last is the requested end.
    pub endpoints:  Vec<HexCoordEdge>,
    /// Summed piece lengths.
    pub cost:       f32,
    /// Nodes popped from the open queue.
    pub expansions: usize,
}

impl Route {
    /// The piece each step of the route lays, one per cell after the seed.
    pub fn pieces(&self) -> impl Iterator<Item = (HexCoord, RailPiece)> + '_ {
        self.endpoints.windows(2).filter_map(|pair| {
            let (prev, next) = (pair[0], pair[1]);
            RailPiece::between(prev.edge.opposite(), next.edge).map(|p| (next.coord, p))
        })
    }

    /// Number of pieces laid.
    #[inline]
    pub fn len(&self) -> usize {
        self.endpoints.len().saturating_sub(1)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The boundary the route starts from, seen from outside the route.
    #[inline]
    pub fn first(&self) -> Option<HexCoordEdge> {
        self.endpoints.first().copied()
    }

    #[inline]
    pub fn last(&self) -> Option<HexCoordEdge> {
        self.endpoints.last().copied()
    }
}

// ── PathRequest ──────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathRequest {
    pub start:             HexCoordEdge,
    pub end:               HexCoordEdge,
    /// Reversing moves.  Not implemented; `true` is rejected.
    pub allow_sharp_turns: bool,
}

impl PathRequest {
    pub fn new(start: HexCoordEdge, end: HexCoordEdge) -> Self {
        Self { start, end, allow_sharp_turns: false }
    }
}

// ── SearchScratch ────────────────────────────────────────────────────────────

/// Total order over finite costs for the open queue.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Cost(f32);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

/// Reusable buffers for one search at a time.
#[derive(Debug, Default)]
pub struct SearchScratch {
    /// Min-heap on (f, node, g).  The node breaks ties deterministically.
    open:      BinaryHeap<Reverse<(Cost, HexCoordEdge, Cost)>>,
    /// Best known g per node; doubles as the open/closed membership test.
    best_g:    FxHashMap<HexCoordEdge, f32>,
    came_from: FxHashMap<HexCoordEdge, HexCoordEdge>,
}

impl SearchScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous search but keep the allocations.
    pub fn clear(&mut self) {
        self.open.clear();
        self.best_g.clear();
        self.came_from.clear();
    }

    /// Nodes touched by the last search.
    pub fn visited(&self) -> usize {
        self.best_g.len()
    }
}

// ── PathPlanner trait ────────────────────────────────────────────────────────

/// Pluggable path planner.
///
/// Implementations must be `Send + Sync` so one planner can be shared by
/// every edit command; per-search state lives in the scratch buffer.
pub trait PathPlanner: Send + Sync {
    fn find_path(
        &self,
        request: &PathRequest,
        obstacles: &dyn Obstacles,
        scratch: &mut SearchScratch,
    ) -> RouteResult<Route>;
}

// ── AStarPlanner ─────────────────────────────────────────────────────────────

/// Optimal A* over directed endpoints.
#[derive(Copy, Clone, Debug, Default)]
pub struct AStarPlanner {
    /// Fail with `SearchExhausted` after this many expansions.
    pub max_expansions: Option<usize>,
}

impl AStarPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_expansions(mut self, cap: Option<usize>) -> Self {
        self.max_expansions = cap;
        self
    }
}

impl PathPlanner for AStarPlanner {
    fn find_path(
        &self,
        request: &PathRequest,
        obstacles: &dyn Obstacles,
        scratch: &mut SearchScratch,
    ) -> RouteResult<Route> {
        astar(request, obstacles, scratch, self.max_expansions)
    }
}

// ── A* internals ─────────────────────────────────────────────────────────────

/// The three ways track can continue past `node`, with their costs.
#[inline]
fn successors(node: HexCoordEdge) -> [(HexCoordEdge, f32); 3] {
    let next = node.neighbor();
    let e = node.edge;
    [
        (HexCoordEdge::new(next, e), STRAIGHT_LENGTH),
        (HexCoordEdge::new(next, e.next()), CURVE_LENGTH),
        (HexCoordEdge::new(next, e.prev()), CURVE_LENGTH),
    ]
}

#[inline]
fn heuristic(node: HexCoordEdge, goal_pos: Vec2) -> f32 {
    endpoint_position(node).distance(goal_pos)
}

fn astar(
    request: &PathRequest,
    obstacles: &dyn Obstacles,
    scratch: &mut SearchScratch,
    max_expansions: Option<usize>,
) -> RouteResult<Route> {
    let PathRequest { start, end: goal, allow_sharp_turns } = *request;

    if start == goal {
        return Err(RouteError::Degenerate(start));
    }
    if allow_sharp_turns {
        return Err(RouteError::SharpTurnsUnsupported);
    }
    for endpoint in [start, goal] {
        if obstacles.is_blocked(endpoint.coord) {
            return Err(RouteError::Blocked(endpoint));
        }
    }

    scratch.clear();
    let seed = start.opposite();
    let goal_pos = endpoint_position(goal);

    scratch.best_g.insert(seed, 0.0);
    scratch.open.push(Reverse((Cost(heuristic(seed, goal_pos)), seed, Cost(0.0))));

    let mut expansions = 0usize;

    while let Some(Reverse((_, node, Cost(g)))) = scratch.open.pop() {
        if node == goal {
            debug!(%start, %goal, cost = g, expansions, "path found");
            return Ok(reconstruct(scratch, seed, goal, g, expansions));
        }

        // Stale entry: a cheaper route to `node` was pushed later.
        if scratch.best_g.get(&node).is_some_and(|&best| g > best) {
            continue;
        }

        if max_expansions.is_some_and(|cap| expansions >= cap) {
            debug!(%start, %goal, expansions, "search budget exhausted");
            return Err(RouteError::SearchExhausted { expansions });
        }
        expansions += 1;

        for (next, step) in successors(node) {
            if obstacles.is_blocked(next.coord) {
                continue;
            }

            let tentative = g + step;
            let improves = scratch.best_g.get(&next).is_none_or(|&best| tentative < best);
            if improves {
                scratch.best_g.insert(next, tentative);
                scratch.came_from.insert(next, node);
                let f = tentative + heuristic(next, goal_pos);
                scratch.open.push(Reverse((Cost(f), next, Cost(tentative))));
            }
        }
    }

    debug!(%start, %goal, expansions, "no route");
    Err(RouteError::NoRoute { from: start, to: goal })
}

fn reconstruct(
    scratch: &SearchScratch,
    seed: HexCoordEdge,
    goal: HexCoordEdge,
    cost: f32,
    expansions: usize,
) -> Route {
    let mut endpoints = vec![goal];
    let mut cur = goal;
    while cur != seed {
        match scratch.came_from.get(&cur) {
            Some(&prev) => {
                endpoints.push(prev);
                cur = prev;
            }
            None => break,
        }
    }
    endpoints.reverse();
    Route { endpoints, cost, expansions }
}
