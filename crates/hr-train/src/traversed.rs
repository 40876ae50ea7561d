//! Tiles a train has committed to, and the bounded queue holding them.
//!
//! Geometry is precomputed when a tile is pushed so that sampling a car
//! position every tick is a lerp or a slerp plus one rotation.  Everything
//! is in the grid plane (z = 0); world placement happens downstream.

use std::collections::VecDeque;

use glam::{Quat, Vec3};

use hr_core::grid::{
    edge_direction, edge_midpoint, look_along, resolve_curve, Curve, CURVE_LENGTH, STRAIGHT_LENGTH,
};
use hr_core::{HexCoord, HexCoordEdge, HexEdge};

// ── TraversedTile ────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TraversedTile {
    pub coord:    HexCoord,
    pub from:     HexEdge,
    pub to:       HexEdge,
    pub from_pos: Vec3,
    pub to_pos:   Vec3,
    /// Heading on entry: pointing into the cell.
    pub from_rot: Quat,
    /// Heading on exit: pointing out through `to`.
    pub to_rot:   Quat,
    pub length:   f32,
    pub curve:    Option<Curve>,
}

impl TraversedTile {
    pub fn new(coord: HexCoord, from: HexEdge, to: HexEdge) -> Self {
        let curve = resolve_curve(coord, from, to);
        Self {
            coord,
            from,
            to,
            from_pos: edge_midpoint(coord, from).extend(0.0),
            to_pos: edge_midpoint(coord, to).extend(0.0),
            from_rot: look_along(edge_direction(from.opposite())),
            to_rot: look_along(edge_direction(to)),
            length: if curve.is_some() { CURVE_LENGTH } else { STRAIGHT_LENGTH },
            curve,
        }
    }

    #[inline]
    pub fn is_curved(&self) -> bool {
        self.curve.is_some()
    }

    /// The boundary this tile leads out through.
    #[inline]
    pub fn exit(&self) -> HexCoordEdge {
        HexCoordEdge::new(self.coord, self.to)
    }

    /// Position and heading at `progress` in `[0, 1]` along the tile.
    ///
    /// Curved tiles place the point on the arc by rotating the radius vector
    /// with the interpolated heading.
    pub fn sample(&self, progress: f32) -> (Vec3, Quat) {
        let rot = self.from_rot.slerp(self.to_rot, progress);
        let pos = match self.curve {
            Some(c) => c.center.extend(0.0) + rot * Vec3::NEG_Y * c.radius,
            None => self.from_pos.lerp(self.to_pos, progress),
        };
        (pos, rot)
    }
}

// ── TileQueue ────────────────────────────────────────────────────────────────

/// Tiles ordered oldest → newest, plus their summed length.
#[derive(Clone, Debug, Default)]
pub struct TileQueue {
    tiles:  VecDeque<TraversedTile>,
    length: f32,
}

impl TileQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
        self.length = 0.0;
    }

    /// Append `tile` as the new head, then drop tiles from the tail while
    /// more than `consist_length` plus the two end tiles is retained.
    pub fn push(&mut self, tile: TraversedTile, consist_length: f32) {
        self.length += tile.length;
        self.tiles.push_back(tile);

        while self.tiles.len() > 1 {
            let (Some(oldest), Some(newest)) = (self.tiles.front(), self.tiles.back()) else {
                break;
            };
            if self.length <= consist_length + oldest.length + newest.length {
                break;
            }
            self.length -= oldest.length;
            self.tiles.pop_front();
        }
    }

    /// The newest tile: the one the head of the train is on.
    #[inline]
    pub fn head(&self) -> Option<&TraversedTile> {
        self.tiles.back()
    }

    /// Tile covering a point `distance_from_head` behind the front of the
    /// train, and that tile's offset back from the head tile.
    ///
    /// Walks newest to oldest; the head tile contributes no offset.  `None`
    /// when the queue does not reach back that far yet.
    pub fn lookup(&self, head_travel: f32, distance_from_head: f32) -> Option<(&TraversedTile, f32)> {
        let distance = head_travel - distance_from_head;
        let mut offset = 0.0;

        for (i, tile) in self.tiles.iter().rev().enumerate() {
            if i > 0 {
                offset += tile.length;
            }
            if distance > -offset {
                return Some((tile, offset));
            }
        }
        None
    }

    /// Position and heading `distance_from_head` behind the front.
    pub fn sample(&self, head_travel: f32, distance_from_head: f32) -> Option<(Vec3, Quat)> {
        let (tile, offset) = self.lookup(head_travel, distance_from_head)?;
        let progress = (head_travel - distance_from_head + offset) / tile.length;
        Some(tile.sample(progress))
    }

    /// Summed length of every retained tile.
    #[inline]
    pub fn total_length(&self) -> f32 {
        self.length
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TraversedTile> {
        self.tiles.iter()
    }
}
