//! Move records.

use crate::{CastlingRights, Piece, PieceKind, Position};
use std::fmt;

/// The record of one applied board transition.
///
/// A `Move` snapshots everything needed to render the move and to undo it
/// exactly: the piece that moved, the piece it captured (if any), the
/// special-move flags, and the bookkeeping state that the move overwrote
/// (castling rights, en passant target, halfmove clock). The engine creates
/// records when a move is validated, keeps them in history, and consumes
/// them on undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Move {
    /// Origin square.
    pub from: Position,
    /// Destination square.
    pub to: Position,
    /// The piece that moved. For a promotion this is still the pawn.
    pub moved: Piece,
    /// The piece removed from the board, if any. For an en passant capture
    /// this is the pawn behind the destination square.
    pub captured: Option<Piece>,
    /// The kind the pawn was promoted to, if the move was a promotion.
    pub promotion: Option<PieceKind>,
    /// True if the move was a castle (king moved two columns).
    pub is_castle: bool,
    /// True if the move was an en passant capture.
    pub is_en_passant: bool,
    /// Castling rights before the move was applied.
    pub castling_before: CastlingRights,
    /// En passant target before the move was applied.
    pub en_passant_before: Option<Position>,
    /// Halfmove clock before the move was applied.
    pub halfmove_clock_before: u32,
}

impl Move {
    /// Returns true if the move removed an opposing piece from the board.
    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.symbol(crate::Color::Black))?;
        }
        Ok(())
    }
}
