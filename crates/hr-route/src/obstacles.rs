//! Obstacle predicates consulted by the planner.
//!
//! The planner only ever asks "is this cell blocked?".  Anything that can
//! answer that (a closure, a facility footprint map, a test fixture) can be
//! passed in.

use rustc_hash::FxHashMap;
use tracing::{debug, error};

use hr_core::{HexCoord, OwnerId};

/// Answers whether track may be laid in a cell.
pub trait Obstacles {
    fn is_blocked(&self, coord: HexCoord) -> bool;
}

impl<F> Obstacles for F
where
    F: Fn(HexCoord) -> bool,
{
    #[inline]
    fn is_blocked(&self, coord: HexCoord) -> bool {
        self(coord)
    }
}

/// Nothing is ever blocked.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoObstacles;

impl Obstacles for NoObstacles {
    #[inline]
    fn is_blocked(&self, _coord: HexCoord) -> bool {
        false
    }
}

// ── FootprintMap ─────────────────────────────────────────────────────────────

/// Cells claimed by owners such as facilities.
///
/// A claimed cell is an obstacle.  The first claim on a cell is
/// authoritative: a later claim by a different owner is logged as a data
/// inconsistency and ignored for that cell.
#[derive(Clone, Debug, Default)]
pub struct FootprintMap {
    owners: FxHashMap<HexCoord, OwnerId>,
}

impl FootprintMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `coord` for `owner`.  Returns `false` if another owner already
    /// holds it.
    pub fn claim(&mut self, coord: HexCoord, owner: OwnerId) -> bool {
        match self.owners.get(&coord) {
            Some(&existing) if existing != owner => {
                error!(%coord, %existing, rejected = %owner, "conflicting footprint claim");
                false
            }
            Some(_) => true,
            None => {
                self.owners.insert(coord, owner);
                true
            }
        }
    }

    /// Claim every cell in `cells`.  Returns how many claims were rejected.
    pub fn claim_all(&mut self, cells: impl IntoIterator<Item = HexCoord>, owner: OwnerId) -> usize {
        cells.into_iter().filter(|c| !self.claim(*c, owner)).count()
    }

    /// Drop every claim held by `owner`.
    pub fn release(&mut self, owner: OwnerId) -> usize {
        let before = self.owners.len();
        self.owners.retain(|_, o| *o != owner);
        let released = before - self.owners.len();
        debug!(%owner, released, "footprint released");
        released
    }

    #[inline]
    pub fn owner_at(&self, coord: HexCoord) -> Option<OwnerId> {
        self.owners.get(&coord).copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl Obstacles for FootprintMap {
    #[inline]
    fn is_blocked(&self, coord: HexCoord) -> bool {
        self.owners.contains_key(&coord)
    }
}
