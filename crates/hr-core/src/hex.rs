//! Axial hex coordinates, edge directions, and oriented cell boundaries.
//!
//! # Axes
//!
//! A cell is addressed by two integers `(x, y)`.  The third cube axis is
//! derived as `z = x - y`, so `x - y - z == 0` holds by construction and is
//! never stored.  The six neighbour offsets are:
//!
//! ```text
//!             Top (0, 1)
//!  TopLeft (-1, 0)     TopRight (1, 1)
//!  BottomLeft (-1,-1)  BottomRight (1, 0)
//!            Bottom (0,-1)
//! ```
//!
//! Edges are numbered clockwise from `Top`, so `edge + 3 (mod 6)` is always
//! the opposite edge.

use std::fmt;
use std::ops::{Add, Neg, Sub};

// ── HexCoord ─────────────────────────────────────────────────────────────────

/// Axial integer coordinate of one hexagonal cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    pub x: i32,
    pub y: i32,
}

impl HexCoord {
    pub const ZERO: HexCoord = HexCoord { x: 0, y: 0 };

    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The derived third axis.
    #[inline]
    pub const fn z(self) -> i32 {
        self.x - self.y
    }

    /// Hex distance from the origin, in cell steps.
    ///
    /// Smallest of the three axis-pair L1 sums; equal to
    /// `max(|x|, |y|, |z|)`.
    pub fn length(self) -> u32 {
        let (x, y, z) = (self.x.unsigned_abs(), self.y.unsigned_abs(), self.z().unsigned_abs());
        (x + y).min(x + z).min(y + z)
    }

    /// Hex distance between two cells.
    #[inline]
    pub fn distance(self, other: HexCoord) -> u32 {
        (other - self).length()
    }

    /// The cell across `edge`.
    #[inline]
    pub fn neighbor(self, edge: HexEdge) -> HexCoord {
        self + edge.offset()
    }

    /// All six neighbours, in edge order starting at `Top`.
    pub fn neighbors(self) -> [HexCoord; 6] {
        HexEdge::ALL.map(|e| self.neighbor(e))
    }
}

impl Add for HexCoord {
    type Output = HexCoord;
    #[inline]
    fn add(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for HexCoord {
    type Output = HexCoord;
    #[inline]
    fn sub(self, rhs: HexCoord) -> HexCoord {
        HexCoord::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for HexCoord {
    type Output = HexCoord;
    #[inline]
    fn neg(self) -> HexCoord {
        HexCoord::new(-self.x, -self.y)
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z())
    }
}

// ── HexEdge ──────────────────────────────────────────────────────────────────

/// One of the six boundary directions of a cell, clockwise from `Top`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum HexEdge {
    Top         = 0,
    TopRight    = 1,
    BottomRight = 2,
    Bottom      = 3,
    BottomLeft  = 4,
    TopLeft     = 5,
}

impl HexEdge {
    pub const ALL: [HexEdge; 6] = [
        HexEdge::Top,
        HexEdge::TopRight,
        HexEdge::BottomRight,
        HexEdge::Bottom,
        HexEdge::BottomLeft,
        HexEdge::TopLeft,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Edge for any integer index, wrapping modulo 6.
    #[inline]
    pub const fn from_index(i: i32) -> HexEdge {
        HexEdge::ALL[i.rem_euclid(6) as usize]
    }

    /// Rotate clockwise by `steps` edges (negative rotates counter-clockwise).
    #[inline]
    pub const fn rotate(self, steps: i32) -> HexEdge {
        HexEdge::from_index(self as i32 + steps)
    }

    /// `edge + 1 (mod 6)`.
    #[inline]
    pub const fn next(self) -> HexEdge {
        self.rotate(1)
    }

    /// `edge - 1 (mod 6)`.
    #[inline]
    pub const fn prev(self) -> HexEdge {
        self.rotate(-1)
    }

    /// `edge + 3 (mod 6)`.  An involution.
    #[inline]
    pub const fn opposite(self) -> HexEdge {
        self.rotate(3)
    }

    /// Clockwise distance from `self` to `other`, in `0..6`.
    #[inline]
    pub const fn steps_to(self, other: HexEdge) -> u8 {
        (other as i32 - self as i32).rem_euclid(6) as u8
    }

    /// Unit axial offset of the neighbour across this edge.
    pub const fn offset(self) -> HexCoord {
        match self {
            HexEdge::Top         => HexCoord::new(0, 1),
            HexEdge::TopRight    => HexCoord::new(1, 1),
            HexEdge::BottomRight => HexCoord::new(1, 0),
            HexEdge::Bottom      => HexCoord::new(0, -1),
            HexEdge::BottomLeft  => HexCoord::new(-1, -1),
            HexEdge::TopLeft     => HexCoord::new(-1, 0),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HexEdge::Top         => "top",
            HexEdge::TopRight    => "top-right",
            HexEdge::BottomRight => "bottom-right",
            HexEdge::Bottom      => "bottom",
            HexEdge::BottomLeft  => "bottom-left",
            HexEdge::TopLeft     => "top-left",
        }
    }
}

impl fmt::Display for HexEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── HexCoordEdge ─────────────────────────────────────────────────────────────

/// A specific boundary of a specific cell: an oriented track endpoint.
///
/// The same physical boundary has two names, one from each side;
/// [`opposite`](Self::opposite) converts between them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoordEdge {
    pub coord: HexCoord,
    pub edge:  HexEdge,
}

impl HexCoordEdge {
    #[inline]
    pub const fn new(coord: HexCoord, edge: HexEdge) -> Self {
        Self { coord, edge }
    }

    /// The cell on the far side of this boundary.
    #[inline]
    pub fn neighbor(self) -> HexCoord {
        self.coord.neighbor(self.edge)
    }

    /// The same boundary named from the neighbouring cell.
    #[inline]
    pub fn opposite(self) -> HexCoordEdge {
        HexCoordEdge::new(self.neighbor(), self.edge.opposite())
    }
}

impl fmt::Display for HexCoordEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.coord, self.edge)
    }
}
