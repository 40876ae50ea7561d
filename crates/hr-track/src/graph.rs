//! `TrackGraph`: the authoritative map from cell to rail tile.
//!
//! # Ownership
//!
//! The graph has a single writer: the sim tick or an explicit edit command.
//! Every mutation funnels through [`TrackGraph::set_tile`], which normalizes
//! the new tile and returns a [`TrackDiff`] describing which pieces appeared
//! and which vanished.  Renderers consume the diff; they never read the map
//! to work out what changed.
//!
//! Cells whose tile becomes empty are pruned, so `len()` counts cells that
//! actually hold track.

use rustc_hash::FxHashMap;
use tracing::debug;

use hr_core::{HexCoord, HexCoordEdge};

use crate::RailTile;

// ── TrackDiff ────────────────────────────────────────────────────────────────

/// Pieces added to and removed from one cell by a single mutation.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TrackDiff {
    pub coord:   HexCoord,
    pub added:   RailTile,
    pub removed: RailTile,
}

impl TrackDiff {
    /// `true` if the mutation left the cell unchanged.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

// ── TrackGraph ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct TrackGraph {
    tiles: FxHashMap<HexCoord, RailTile>,
}

impl TrackGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// The tile at `coord`; `RailTile::NONE` when the cell is empty.
    #[inline]
    pub fn get(&self, coord: HexCoord) -> RailTile {
        self.tiles.get(&coord).copied().unwrap_or(RailTile::NONE)
    }

    /// Pieces in `endpoint.coord` that touch `endpoint.edge`.
    #[inline]
    pub fn touching(&self, endpoint: HexCoordEdge) -> RailTile {
        self.get(endpoint.coord).filter_by_edge(endpoint.edge)
    }

    /// Merge `to_add` into the existing tile.
    pub fn place_tile(&mut self, coord: HexCoord, to_add: RailTile) -> TrackDiff {
        let tile = self.get(coord).combine(to_add);
        self.set_tile(coord, tile)
    }

    /// Strip `to_remove` from the existing tile.
    pub fn remove_tile(&mut self, coord: HexCoord, to_remove: RailTile) -> TrackDiff {
        let tile = self.get(coord).without(to_remove);
        self.set_tile(coord, tile)
    }

    /// Replace the tile at `coord` outright.
    ///
    /// The new tile is normalized before it is stored.
    pub fn set_tile(&mut self, coord: HexCoord, tile: RailTile) -> TrackDiff {
        let new = tile.normalize();
        let old = self.get(coord);

        let diff = TrackDiff {
            coord,
            added:   new.without(old),
            removed: old.without(new),
        };

        if new.is_empty() {
            self.tiles.remove(&coord);
        } else {
            self.tiles.insert(coord, new);
        }

        if !diff.is_empty() {
            debug!(%coord, added = ?diff.added, removed = ?diff.removed, "tile updated");
        }
        diff
    }

    /// Non-empty cells in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (HexCoord, RailTile)> + '_ {
        self.tiles.iter().map(|(c, t)| (*c, *t))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}

impl FromIterator<(HexCoord, RailTile)> for TrackGraph {
    fn from_iter<I: IntoIterator<Item = (HexCoord, RailTile)>>(iter: I) -> Self {
        let mut graph = TrackGraph::new();
        for (coord, tile) in iter {
            graph.place_tile(coord, tile);
        }
        graph
    }
}
