//! Continuous 2-D projection of the hex grid, curve geometry, and world
//! placement.
//!
//! # Plane
//!
//! Cell `(x, y)` projects to `x * AXIS_X + y * AXIS_Y`, where `AXIS_X` points
//! 30° below the +X axis and `AXIS_Y` is +Y.  Both basis vectors are unit
//! length and 120° apart, so adjacent cell centres are exactly one distance
//! unit apart and a straight track piece (edge midpoint to opposite edge
//! midpoint) is one unit long.
//!
//! The plane is used for path costs, the A* heuristic, and train curve math.
//! Rendering converts through [`GridPlacement`].

use std::f32::consts::PI;

use glam::{Quat, Vec2, Vec3};

use crate::{HexCoord, HexCoordEdge, HexEdge};

/// `sqrt(3) / 2`.
pub const HALF_ROOT3: f32 = 0.866_025_4;

/// First basis vector, 30° below +X.
pub const AXIS_X: Vec2 = Vec2::new(HALF_ROOT3, -0.5);

/// Second basis vector, +Y.
pub const AXIS_Y: Vec2 = Vec2::new(0.0, 1.0);

/// Travel length of a straight piece.
pub const STRAIGHT_LENGTH: f32 = 1.0;

/// Travel length of a curved piece: the arc length of a 60° bend of unit
/// radius.  Used for path costs and train progress.
pub const CURVE_LENGTH: f32 = PI / 3.0;

/// Geometric radius of the arc joining two edge midpoints two edges apart.
pub const CURVE_RADIUS: f32 = HALF_ROOT3;

// ── Projection ───────────────────────────────────────────────────────────────

/// Centre of `coord` in the plane.
#[inline]
pub fn cell_center(coord: HexCoord) -> Vec2 {
    coord.x as f32 * AXIS_X + coord.y as f32 * AXIS_Y
}

/// Midpoint of the boundary `edge` of `coord`: the average of the two
/// adjacent cell centres.
#[inline]
pub fn edge_midpoint(coord: HexCoord, edge: HexEdge) -> Vec2 {
    (cell_center(coord) + cell_center(coord.neighbor(edge))) * 0.5
}

/// Plane position of an endpoint.
#[inline]
pub fn endpoint_position(endpoint: HexCoordEdge) -> Vec2 {
    edge_midpoint(endpoint.coord, endpoint.edge)
}

/// Unit vector pointing out of a cell through `edge`.
#[inline]
pub fn edge_direction(edge: HexEdge) -> Vec2 {
    cell_center(edge.offset())
}

/// Rotation about +Z that turns +X onto `dir`.
#[inline]
pub fn look_along(dir: Vec2) -> Quat {
    Quat::from_rotation_z(dir.y.atan2(dir.x))
}

/// Left-hand perpendicular of `dir` (counter-clockwise by 90°).
#[inline]
pub fn left_of(dir: Vec2) -> Vec2 {
    Vec2::new(-dir.y, dir.x)
}

/// The cell whose centre is nearest to `point`.
///
/// Solves for fractional axial coordinates, floors them, then compares the
/// four corner cells of that lattice parallelogram.  The parallelogram is
/// two equilateral triangles, so the nearest centre is always one of its
/// corners.
pub fn cell_at(point: Vec2) -> HexCoord {
    let fx = point.x / AXIS_X.x;
    let fy = point.y - AXIS_X.y * fx;

    let x0 = fx.floor() as i32;
    let y0 = fy.floor() as i32;

    let candidates = [
        HexCoord::new(x0, y0),
        HexCoord::new(x0 + 1, y0),
        HexCoord::new(x0, y0 + 1),
        HexCoord::new(x0 + 1, y0 + 1),
    ];

    let mut best = candidates[0];
    let mut best_dist = f32::INFINITY;
    for c in candidates {
        let d = cell_center(c).distance_squared(point);
        if d < best_dist {
            best = c;
            best_dist = d;
        }
    }
    best
}

/// The nearest cell to `point` and the edge of that cell facing it.
pub fn edge_at(point: Vec2) -> HexCoordEdge {
    let coord = cell_at(point);
    let offset = point - cell_center(coord);

    let edge = HexEdge::ALL
        .into_iter()
        .max_by(|a, b| {
            edge_direction(*a)
                .dot(offset)
                .total_cmp(&edge_direction(*b).dot(offset))
        })
        .unwrap_or(HexEdge::Top);

    HexCoordEdge::new(coord, edge)
}

// ── Curves ───────────────────────────────────────────────────────────────────

/// Which way a curved piece bends, seen by a train entering through `from`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Bend {
    /// Exit two edges clockwise of the entry edge; turns counter-clockwise.
    Short,
    /// Exit four edges clockwise of the entry edge; turns clockwise.
    Long,
}

/// Arc data for a track segment turning inside one cell.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Curve {
    pub bend:   Bend,
    /// Signed radius: positive when the centre lies left of the entry
    /// direction.
    pub radius: f32,
    pub center: Vec2,
}

/// Resolve the arc a train follows entering `coord` through `from` and
/// leaving through `to`.
///
/// Returns `None` for pairs that are not a bend: equal edges, opposite
/// edges (straight track), and adjacent edges (no such piece).
pub fn resolve_curve(coord: HexCoord, from: HexEdge, to: HexEdge) -> Option<Curve> {
    let (bend, radius) = match from.steps_to(to) {
        2 => (Bend::Short, CURVE_RADIUS),
        4 => (Bend::Long, -CURVE_RADIUS),
        _ => return None,
    };

    let entry_pos = edge_midpoint(coord, from);
    let entry_dir = edge_direction(from.opposite());
    let center = entry_pos + left_of(entry_dir) * radius;

    Some(Curve { bend, radius, center })
}

// ── World placement ──────────────────────────────────────────────────────────

/// Maps plane coordinates into a 3-D world.
///
/// The plane's +Z is the placement's up axis.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPlacement {
    pub origin:   Vec3,
    pub rotation: Quat,
    /// World units per plane unit (cell-centre spacing).
    pub scale:    f32,
}

impl Default for GridPlacement {
    fn default() -> Self {
        Self { origin: Vec3::ZERO, rotation: Quat::IDENTITY, scale: 1.0 }
    }
}

impl GridPlacement {
    pub fn new(origin: Vec3, rotation: Quat, scale: f32) -> Self {
        Self { origin, rotation, scale }
    }

    #[inline]
    pub fn to_world(&self, local: Vec2) -> Vec3 {
        self.origin + self.rotation * (local.extend(0.0) * self.scale)
    }

    /// Project a world point onto the plane.  The out-of-plane component is
    /// discarded.
    #[inline]
    pub fn to_local(&self, world: Vec3) -> Vec2 {
        (self.rotation.inverse() * (world - self.origin) / self.scale).truncate()
    }

    pub fn cell_position(&self, coord: HexCoord) -> Vec3 {
        self.to_world(cell_center(coord))
    }

    pub fn endpoint_position(&self, endpoint: HexCoordEdge) -> Vec3 {
        self.to_world(endpoint_position(endpoint))
    }

    pub fn world_direction(&self, edge: HexEdge) -> Vec3 {
        self.rotation * edge_direction(edge).extend(0.0)
    }

    /// Orientation looking out through `edge`.
    pub fn edge_rotation(&self, edge: HexEdge) -> Quat {
        self.rotation * look_along(edge_direction(edge))
    }

    /// Convert a plane-space orientation into world space.
    pub fn rotate(&self, local: Quat) -> Quat {
        self.rotation * local
    }

    pub fn cell_at(&self, world: Vec3) -> HexCoord {
        cell_at(self.to_local(world))
    }

    pub fn edge_at(&self, world: Vec3) -> HexCoordEdge {
        edge_at(self.to_local(world))
    }
}
