//! The value stored in an occupied board square.

use crate::{Color, PieceKind};

/// A piece: a kind plus the color it plays for.
///
/// Pieces are plain values. Occupancy lives in the board grid and the
/// castling/double-step eligibility that older designs hang off a per-piece
/// "has moved" flag is centralized on the board state instead, so cloning a
/// board can never alias or go stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    /// Creates a piece of the given color and kind.
    #[inline]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Piece { color, kind }
    }

    /// Returns the one-letter symbol, uppercase for White.
    #[inline]
    pub const fn symbol(self) -> char {
        self.kind.symbol(self.color)
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.color, self.kind)
    }
}
