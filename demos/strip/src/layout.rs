//! Hand-placed layout for the demo: a loop drawn as three edit commands,
//! bent around a small depot.

use hr_core::{HexCoord, HexCoordEdge, HexEdge, OwnerId};
use hr_route::FootprintMap;

const DEPOT: OwnerId = OwnerId(1);

const fn ep(x: i32, y: i32, edge: HexEdge) -> HexCoordEdge {
    HexCoordEdge::new(HexCoord::new(x, y), edge)
}

/// `(start, end)` pairs, laid in order.  Each start picks up where the
/// previous route ended, and the last route closes the loop.
pub const ROUTES: [(HexCoordEdge, HexCoordEdge); 3] = [
    // North-bound main line.
    (ep(0, 1, HexEdge::Bottom), ep(0, 6, HexEdge::Top)),
    // Turn across the top and come back down east of the depot.
    (ep(0, 7, HexEdge::Bottom), ep(4, 1, HexEdge::Bottom)),
    // Turn under the bottom and rejoin the main line.
    (ep(4, 0, HexEdge::Top), ep(0, 0, HexEdge::Top)),
];

/// Cells reserved for the depot; track routes around them.
pub fn depot() -> FootprintMap {
    let mut map = FootprintMap::new();
    map.claim_all((2..=4).map(|y| HexCoord::new(2, y)), DEPOT);
    map
}

/// Where trains start: the middle of the main line.
pub fn spawn_cells() -> [HexCoord; 2] {
    [HexCoord::new(0, 1), HexCoord::new(0, 4)]
}
