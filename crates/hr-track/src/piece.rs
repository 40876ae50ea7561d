//! Individual track shapes.
//!
//! A cell can hold 15 distinct shapes:
//!
//! | ids     | kind     | edges touched                          |
//! |---------|----------|----------------------------------------|
//! | 0..=2   | straight | two opposite edges                     |
//! | 3..=8   | curved   | two edges two apart (a 60° bend)       |
//! | 9..=14  | buffer   | exactly one edge (dead end marker)     |
//!
//! Id 15 is the platform marker.  It rides along in a tile's bitset but
//! touches no edge and is never chosen as a physical piece.

use hr_core::HexEdge;

use crate::{RailTile, TrackError, TrackResult};

/// What a piece is, independent of its orientation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Straight,
    Curved,
    Buffer,
    Platform,
}

/// One track shape occupying a cell.  The discriminant is the piece id.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum RailPiece {
    TopBottom             = 0,
    TopRightBottomLeft    = 1,
    BottomRightTopLeft    = 2,
    BottomTopLeft         = 3,
    TopBottomLeft         = 4,
    TopLeftTopRight       = 5,
    TopBottomRight        = 6,
    BottomTopRight        = 7,
    BottomLeftBottomRight = 8,
    TopBuffer             = 9,
    TopRightBuffer        = 10,
    BottomRightBuffer     = 11,
    BottomBuffer          = 12,
    BottomLeftBuffer      = 13,
    TopLeftBuffer         = 14,
    Platform              = 15,
}

use HexEdge::{Bottom, BottomLeft, BottomRight, Top, TopLeft, TopRight};

/// Edges touched by each piece, indexed by id.
const PIECE_EDGES: [&[HexEdge]; 16] = [
    &[Top, Bottom],
    &[TopRight, BottomLeft],
    &[BottomRight, TopLeft],
    &[Bottom, TopLeft],
    &[Top, BottomLeft],
    &[TopLeft, TopRight],
    &[Top, BottomRight],
    &[Bottom, TopRight],
    &[BottomLeft, BottomRight],
    &[Top],
    &[TopRight],
    &[BottomRight],
    &[Bottom],
    &[BottomLeft],
    &[TopLeft],
    &[],
];

impl RailPiece {
    /// Number of physical track shapes (excludes the platform marker).
    pub const SHAPE_COUNT: usize = 15;

    /// Every physical shape in id order.
    pub const SHAPES: [RailPiece; 15] = [
        RailPiece::TopBottom,
        RailPiece::TopRightBottomLeft,
        RailPiece::BottomRightTopLeft,
        RailPiece::BottomTopLeft,
        RailPiece::TopBottomLeft,
        RailPiece::TopLeftTopRight,
        RailPiece::TopBottomRight,
        RailPiece::BottomTopRight,
        RailPiece::BottomLeftBottomRight,
        RailPiece::TopBuffer,
        RailPiece::TopRightBuffer,
        RailPiece::BottomRightBuffer,
        RailPiece::BottomBuffer,
        RailPiece::BottomLeftBuffer,
        RailPiece::TopLeftBuffer,
    ];

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<RailPiece> {
        match id {
            15 => Some(RailPiece::Platform),
            _ => RailPiece::SHAPES.get(id as usize).copied(),
        }
    }

    pub const fn kind(self) -> PieceKind {
        match self as u8 {
            0..=2 => PieceKind::Straight,
            3..=8 => PieceKind::Curved,
            9..=14 => PieceKind::Buffer,
            _ => PieceKind::Platform,
        }
    }

    #[inline]
    pub const fn is_buffer(self) -> bool {
        matches!(self.kind(), PieceKind::Buffer)
    }

    /// Straight or curved: a piece a train can run through.
    #[inline]
    pub const fn is_through(self) -> bool {
        matches!(self.kind(), PieceKind::Straight | PieceKind::Curved)
    }

    #[inline]
    pub const fn to_tile(self) -> RailTile {
        RailTile::from_bits(1 << self as u16)
    }

    /// The edges this piece touches: two for through pieces, one for
    /// buffers, none for the platform marker.
    #[inline]
    pub fn edges(self) -> &'static [HexEdge] {
        PIECE_EDGES[self as usize]
    }

    #[inline]
    pub fn first_edge(self) -> Option<HexEdge> {
        self.edges().first().copied()
    }

    #[inline]
    pub fn touches(self, edge: HexEdge) -> bool {
        self.edges().contains(&edge)
    }

    /// The other edge a through piece connects `edge` to.
    pub fn connected_edge(self, edge: HexEdge) -> TrackResult<HexEdge> {
        match self.edges() {
            [a, b] if *a == edge => Ok(*b),
            [a, b] if *b == edge => Ok(*a),
            [_, _] => Err(TrackError::PieceDoesNotTouch { piece: self, edge }),
            _ => Err(TrackError::NoConnection(self)),
        }
    }

    /// The through piece joining `a` and `b`, in either order.
    ///
    /// `None` for equal or adjacent edges; those have no shape.
    pub fn between(a: HexEdge, b: HexEdge) -> Option<RailPiece> {
        RailPiece::SHAPES[..9]
            .iter()
            .copied()
            .find(|p| p.touches(a) && p.touches(b) && a != b)
    }

    /// The buffer (dead end) piece sitting on `edge`.
    pub const fn buffer(edge: HexEdge) -> RailPiece {
        match edge {
            Top         => RailPiece::TopBuffer,
            TopRight    => RailPiece::TopRightBuffer,
            BottomRight => RailPiece::BottomRightBuffer,
            Bottom      => RailPiece::BottomBuffer,
            BottomLeft  => RailPiece::BottomLeftBuffer,
            TopLeft     => RailPiece::TopLeftBuffer,
        }
    }
}
