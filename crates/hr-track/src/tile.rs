//! The set of pieces present in one cell.
//!
//! Stored as a 16-bit bitset indexed by piece id.  Call sites go through the
//! named helpers (`touches`, `filter_by_edge`, `pieces`, …) rather than
//! doing bit arithmetic themselves.
//!
//! # Buffer rule
//!
//! A buffer on edge E means "track ends here, nothing crosses E yet".  Once
//! any through piece in the same tile touches E the buffer is meaningless,
//! so [`RailTile::normalize`] clears it.  [`RailTile::combine`] always
//! normalizes its result.

use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

use rand::Rng;

use hr_core::HexEdge;

use crate::{RailPiece, TrackError, TrackResult};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RailTile(u16);

/// Pieces touching each edge: one straight, two curves, one buffer.
const EDGE_MASKS: [RailTile; 6] = [
    // Top
    RailTile::from_bits(1 << 0 | 1 << 4 | 1 << 6 | 1 << 9),
    // TopRight
    RailTile::from_bits(1 << 1 | 1 << 5 | 1 << 7 | 1 << 10),
    // BottomRight
    RailTile::from_bits(1 << 2 | 1 << 6 | 1 << 8 | 1 << 11),
    // Bottom
    RailTile::from_bits(1 << 0 | 1 << 3 | 1 << 7 | 1 << 12),
    // BottomLeft
    RailTile::from_bits(1 << 1 | 1 << 4 | 1 << 8 | 1 << 13),
    // TopLeft
    RailTile::from_bits(1 << 2 | 1 << 3 | 1 << 5 | 1 << 14),
];

impl RailTile {
    pub const NONE: RailTile = RailTile(0);

    /// All straight pieces.
    pub const STRAIGHT: RailTile = RailTile(0b0000_0000_0000_0111);

    /// All curved pieces.
    pub const CURVED: RailTile = RailTile(0b0000_0001_1111_1000);

    /// All buffer pieces.
    pub const BUFFER: RailTile = RailTile(0b0111_1110_0000_0000);

    /// Straight and curved pieces.
    pub const THROUGH: RailTile = RailTile(Self::STRAIGHT.0 | Self::CURVED.0);

    pub const PLATFORM: RailTile = RailTile(1 << 15);

    #[inline]
    pub const fn from_bits(bits: u16) -> RailTile {
        RailTile(bits)
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of pieces present, platform marker included.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn contains(self, piece: RailPiece) -> bool {
        self.0 & piece.to_tile().0 != 0
    }

    #[inline]
    pub const fn intersects(self, other: RailTile) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub const fn is_platform(self) -> bool {
        self.intersects(RailTile::PLATFORM)
    }

    #[inline]
    pub const fn without(self, other: RailTile) -> RailTile {
        RailTile(self.0 & !other.0)
    }

    #[inline]
    pub const fn without_buffers(self) -> RailTile {
        self.without(RailTile::BUFFER)
    }

    /// Mask of every piece that touches `edge`.
    #[inline]
    pub const fn edge_mask(edge: HexEdge) -> RailTile {
        EDGE_MASKS[edge as usize]
    }

    /// The subset of this tile touching `edge`, buffer included.
    #[inline]
    pub const fn filter_by_edge(self, edge: HexEdge) -> RailTile {
        RailTile(self.0 & Self::edge_mask(edge).0)
    }

    #[inline]
    pub const fn touches(self, edge: HexEdge) -> bool {
        !self.filter_by_edge(edge).is_empty()
    }

    /// Physical pieces present, in id order.  The platform marker is not a
    /// physical piece and is skipped.
    pub fn pieces(self) -> impl Iterator<Item = RailPiece> {
        RailPiece::SHAPES.into_iter().filter(move |p| self.contains(*p))
    }

    /// The piece, if exactly one physical piece is present.
    pub fn single_piece(self) -> Option<RailPiece> {
        let mut pieces = self.pieces();
        match (pieces.next(), pieces.next()) {
            (Some(p), None) => Some(p),
            _ => None,
        }
    }

    /// Clear the buffer on every edge that a through piece already touches.
    pub fn normalize(self) -> RailTile {
        let buffers = self.0 & RailTile::BUFFER.0;
        if buffers == 0 {
            return self;
        }

        let through = self.without_buffers();
        let mut out = self;
        for edge in HexEdge::ALL {
            if through.touches(edge) {
                out = out.without(RailPiece::buffer(edge).to_tile());
            }
        }
        out
    }

    /// Union with `addition`, then normalize.
    #[inline]
    pub fn combine(self, addition: RailTile) -> RailTile {
        RailTile(self.0 | addition.0).normalize()
    }

    /// Pick one physical piece uniformly at random.
    ///
    /// Used when a junction leaves several candidates and the caller has to
    /// commit to one.
    pub fn random_piece<R: Rng + ?Sized>(self, rng: &mut R) -> TrackResult<RailPiece> {
        let count = self.pieces().count();
        if count == 0 {
            return Err(TrackError::EmptyTile);
        }
        let pick = rng.gen_range(0..count);
        self.pieces().nth(pick).ok_or(TrackError::EmptyTile)
    }
}

impl From<RailPiece> for RailTile {
    #[inline]
    fn from(piece: RailPiece) -> Self {
        piece.to_tile()
    }
}

impl FromIterator<RailPiece> for RailTile {
    fn from_iter<I: IntoIterator<Item = RailPiece>>(iter: I) -> Self {
        iter.into_iter().fold(RailTile::NONE, |t, p| t | p.to_tile())
    }
}

impl BitOr for RailTile {
    type Output = RailTile;
    #[inline]
    fn bitor(self, rhs: RailTile) -> RailTile {
        RailTile(self.0 | rhs.0)
    }
}

impl BitAnd for RailTile {
    type Output = RailTile;
    #[inline]
    fn bitand(self, rhs: RailTile) -> RailTile {
        RailTile(self.0 & rhs.0)
    }
}

impl Not for RailTile {
    type Output = RailTile;
    #[inline]
    fn not(self) -> RailTile {
        RailTile(!self.0)
    }
}

impl fmt::Debug for RailTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        set.entries(self.pieces());
        if self.is_platform() {
            set.entry(&RailPiece::Platform);
        }
        set.finish()
    }
}

impl fmt::Display for RailTile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}
