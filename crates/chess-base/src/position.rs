//! Board coordinate representation.

use std::fmt;

/// A 0-based (row, column) coordinate on the 8x8 board.
///
/// Row 0 is rank 8 (Black's back rank) and row 7 is rank 1, matching the
/// convention used by the surrounding notation layer: file letters a-h map
/// to columns 0-7, rank digits 1-8 map to row `8 - rank`.
///
/// Any `i8` pair is representable; [`Position::in_bounds`] reports whether
/// the coordinate names a real square. Equality is structural.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub row: i8,
    pub col: i8,
}

impl Position {
    /// Creates a position. Out-of-range coordinates are allowed; they simply
    /// fail [`in_bounds`](Position::in_bounds).
    #[inline]
    pub const fn new(row: i8, col: i8) -> Self {
        Position { row, col }
    }

    /// Returns true if this position names a square on the board.
    #[inline]
    pub const fn in_bounds(self) -> bool {
        self.row >= 0 && self.row < 8 && self.col >= 0 && self.col < 8
    }

    /// Returns this position shifted by the given row/column deltas.
    #[inline]
    pub const fn offset(self, dr: i8, dc: i8) -> Self {
        Position {
            row: self.row + dr,
            col: self.col + dc,
        }
    }

    /// Returns true if this square is a light square.
    ///
    /// Used by the insufficient-material rule for same-colored bishops.
    #[inline]
    pub const fn is_light_square(self) -> bool {
        (self.row + self.col) % 2 == 0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            let file = (b'a' + self.col as u8) as char;
            let rank = 8 - self.row;
            write!(f, "{}{}", file, rank)
        } else {
            write!(f, "({},{})", self.row, self.col)
        }
    }
}
