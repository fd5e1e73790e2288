//! Hex coordinate system using axial coordinates (q, r).
//!
//! This module provides the addressing scheme for the bubble grid:
//! - `HexCoord`: integer address of a single cell
//! - `HexDirection`: the six neighbor directions
//! - `FractionalHex`: a not-yet-rounded cube coordinate, produced by
//!   pixel-to-hex conversion
//!
//! We use axial coordinates because they make neighbor calculations elegant and
//! avoid the wasted space of offset coordinates. The third cube component `s`
//! is derived (`s = -q - r`) rather than stored.

use serde::{Deserialize, Serialize};

/// Direction to one of the six neighbors of a hex cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HexDirection {
    /// Right
    East,
    /// Top-right
    NorthEast,
    /// Top-left
    NorthWest,
    /// Left
    West,
    /// Bottom-left
    SouthWest,
    /// Bottom-right
    SouthEast,
}

impl HexDirection {
    /// All directions in the fixed order used by [`HexCoord::neighbors`]
    pub const ALL: [HexDirection; 6] = [
        HexDirection::East,
        HexDirection::NorthEast,
        HexDirection::NorthWest,
        HexDirection::West,
        HexDirection::SouthWest,
        HexDirection::SouthEast,
    ];
}

/// Axial coordinate for the hex grid.
///
/// In axial coordinates:
/// - `q` increases going east (right)
/// - `r` increases going southeast
/// - The third coordinate `s` (not stored) satisfies: q + r + s = 0
///
/// Ordering is lexicographic by (q, r), which gives every iteration over
/// addresses a single deterministic order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub struct HexCoord {
    /// Column (increases going east)
    pub q: i32,
    /// Row (increases going southeast)
    pub r: i32,
}

impl HexCoord {
    /// Create a new hex coordinate
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// The implicit third cube coordinate (s = -q - r)
    pub const fn s(&self) -> i32 {
        -self.q - self.r
    }

    /// The six neighboring cells, in the fixed order of [`HexDirection::ALL`]
    pub fn neighbors(&self) -> [HexCoord; 6] {
        HexDirection::ALL.map(|dir| self.neighbor(dir))
    }

    /// Get the neighbor in a specific direction
    pub fn neighbor(&self, direction: HexDirection) -> HexCoord {
        match direction {
            HexDirection::East => HexCoord::new(self.q + 1, self.r),
            HexDirection::NorthEast => HexCoord::new(self.q + 1, self.r - 1),
            HexDirection::NorthWest => HexCoord::new(self.q, self.r - 1),
            HexDirection::West => HexCoord::new(self.q - 1, self.r),
            HexDirection::SouthWest => HexCoord::new(self.q - 1, self.r + 1),
            HexDirection::SouthEast => HexCoord::new(self.q, self.r + 1),
        }
    }

    /// Distance to another cell (in hex steps)
    pub fn distance_to(&self, other: &HexCoord) -> u32 {
        let dq = (self.q - other.q).abs();
        let dr = (self.r - other.r).abs();
        let ds = (self.s() - other.s()).abs();
        ((dq + dr + ds) / 2) as u32
    }

    /// This address shifted sideways along its row.
    ///
    /// Used by placement recovery to walk a snapped address out of a map void.
    pub const fn shifted_column(&self, delta: i32) -> HexCoord {
        HexCoord::new(self.q + delta, self.r)
    }
}

/// A fractional cube coordinate, as produced by pixel-to-hex conversion
/// before rounding. `s` is derived, so q + r + s = 0 holds exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FractionalHex {
    /// Fractional column
    pub q: f64,
    /// Fractional row
    pub r: f64,
}

impl FractionalHex {
    /// Create a fractional hex coordinate
    pub const fn new(q: f64, r: f64) -> Self {
        Self { q, r }
    }

    /// The implicit third cube coordinate
    pub fn s(&self) -> f64 {
        -self.q - self.r
    }

    /// Round to the nearest cell.
    ///
    /// Rounds q, r, s independently, then recomputes the component with the
    /// largest rounding error from the other two so that q + r + s = 0 still
    /// holds. Independent rounding alone breaks the invariant near cell
    /// boundaries and produces wrong neighbor sets.
    pub fn round(&self) -> HexCoord {
        let s = self.s();

        let mut rq = self.q.round();
        let mut rr = self.r.round();
        let rs = s.round();

        let q_diff = (rq - self.q).abs();
        let r_diff = (rr - self.r).abs();
        let s_diff = (rs - s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            rq = -rr - rs;
        } else if r_diff > s_diff {
            rr = -rq - rs;
        }
        // otherwise s had the largest error; it is derived, so nothing to fix

        HexCoord::new(rq as i32, rr as i32)
    }
}
