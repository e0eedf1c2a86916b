//! Castling rights flags.

use crate::Color;

/// The four independent castling rights, packed into one byte.
///
/// A right being present means neither the king nor the relevant rook has
/// moved from its home square (and the rook has not been captured there).
/// It says nothing about whether castling is legal right now; path and
/// check conditions are evaluated by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    const WHITE_KINGSIDE: u8 = 0b0001;
    const WHITE_QUEENSIDE: u8 = 0b0010;
    const BLACK_KINGSIDE: u8 = 0b0100;
    const BLACK_QUEENSIDE: u8 = 0b1000;

    /// No castling rights.
    pub const NONE: CastlingRights = CastlingRights(0);
    /// All four castling rights.
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    #[inline]
    const fn flag(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => Self::WHITE_KINGSIDE,
            (Color::White, false) => Self::WHITE_QUEENSIDE,
            (Color::Black, true) => Self::BLACK_KINGSIDE,
            (Color::Black, false) => Self::BLACK_QUEENSIDE,
        }
    }

    /// Returns true if the given side retains the given castling right.
    #[inline]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        (self.0 & Self::flag(color, kingside)) != 0
    }

    /// Removes one castling right.
    #[inline]
    pub fn clear(&mut self, color: Color, kingside: bool) {
        self.0 &= !Self::flag(color, kingside);
    }

    /// Removes both castling rights for a color (the king moved).
    #[inline]
    pub fn clear_color(&mut self, color: Color) {
        self.0 &= !(Self::flag(color, true) | Self::flag(color, false));
    }

    /// Returns the raw flag byte. The bit layout is stable.
    #[inline]
    pub const fn raw(self) -> u8 {
        self.0
    }
}
