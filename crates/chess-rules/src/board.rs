//! The board: grid, bookkeeping, legality filtering, and draw detection.

use std::collections::HashMap;
use std::fmt;

use chess_base::{CastlingRights, Color, Move, Piece, PieceKind, Position};

use crate::movegen;
use crate::signature::KEYS;

/// The full rules-engine state for one game.
///
/// Owns the 8x8 grid of optional pieces, the move history, the castling
/// rights, the en passant target, the halfmove/fullmove clocks, and the
/// repetition table. All rules queries and mutations go through this type.
///
/// What-if legality checks work on a [`Clone`] of the whole board. The
/// clone shares no mutable state with the original: the grid is a value
/// array, and history and repetition table are owned collections, so a
/// failed simulation can never corrupt the live board.
#[derive(Debug, Clone)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    history: Vec<Move>,
    castling: CastlingRights,
    en_passant: Option<Position>,
    halfmove_clock: u32,
    fullmove_number: u32,
    side_to_move: Color,
    repetitions: HashMap<u64, u32>,
}

impl Board {
    /// Creates a board with the standard starting setup and records the
    /// starting position in the repetition table.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.castling = CastlingRights::ALL;

        for col in 0..8 {
            board.grid[1][col] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            board.grid[6][col] = Some(Piece::new(Color::White, PieceKind::Pawn));
        }
        let back_rank = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back_rank.iter().enumerate() {
            board.grid[0][col] = Some(Piece::new(Color::Black, kind));
            board.grid[7][col] = Some(Piece::new(Color::White, kind));
        }

        board.record_position();
        board
    }

    /// Creates a board with no pieces, no history, and no castling rights.
    ///
    /// Intended for assembling custom positions with [`set_piece`] and the
    /// bookkeeping setters; call [`record_position`] once the position is
    /// complete if repetition counting matters for it.
    ///
    /// [`set_piece`]: Board::set_piece
    /// [`record_position`]: Board::record_position
    pub fn empty() -> Self {
        Board {
            grid: [[None; 8]; 8],
            history: Vec::new(),
            castling: CastlingRights::NONE,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
            side_to_move: Color::White,
            repetitions: HashMap::new(),
        }
    }

    // --- grid primitives ---

    /// Returns the piece on the given square, or `None` for an empty or
    /// out-of-bounds square.
    #[inline]
    pub fn piece_at(&self, pos: Position) -> Option<Piece> {
        if !pos.in_bounds() {
            return None;
        }
        self.grid[pos.row as usize][pos.col as usize]
    }

    /// Overwrites the given square. No-op if out of bounds.
    #[inline]
    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        if pos.in_bounds() {
            self.grid[pos.row as usize][pos.col as usize] = piece;
        }
    }

    /// Returns true if the square is on the board and unoccupied.
    #[inline]
    pub fn is_empty(&self, pos: Position) -> bool {
        pos.in_bounds() && self.grid[pos.row as usize][pos.col as usize].is_none()
    }

    /// Returns true if the coordinate names a square on the board.
    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.in_bounds()
    }

    /// Returns the square of the king of the given color.
    ///
    /// `None` means the king is absent, which cannot arise through the
    /// public move interface; callers should treat it as a broken
    /// precondition on custom setups.
    pub fn find_king(&self, color: Color) -> Option<Position> {
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = self.grid[row as usize][col as usize] {
                    if piece.color == color && piece.kind == PieceKind::King {
                        return Some(Position::new(row, col));
                    }
                }
            }
        }
        None
    }

    // --- bookkeeping accessors ---

    /// Returns the side to move.
    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Sets the side to move. For custom setups.
    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Returns the current castling rights.
    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Sets the castling rights. For custom setups.
    pub fn set_castling(&mut self, rights: CastlingRights) {
        self.castling = rights;
    }

    /// Returns the en passant target: the square a capturing pawn would
    /// land on, set only for the single ply after a double pawn advance.
    #[inline]
    pub fn en_passant(&self) -> Option<Position> {
        self.en_passant
    }

    /// Sets the en passant target. For custom setups. An out-of-bounds
    /// target is treated as no target, like [`set_piece`](Board::set_piece).
    pub fn set_en_passant(&mut self, target: Option<Position>) {
        self.en_passant = target.filter(|t| t.in_bounds());
    }

    /// Returns the number of halfmoves since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Sets the halfmove clock. For custom setups.
    pub fn set_halfmove_clock(&mut self, clock: u32) {
        self.halfmove_clock = clock;
    }

    /// Returns the fullmove number (starts at 1, increments after Black).
    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the applied moves, oldest first.
    #[inline]
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    // --- position signature and repetition table ---

    /// Returns the structural signature of the current position: piece
    /// placement, side to move, castling rights, and en passant file. Two
    /// boards with equal signatures are the same position for repetition
    /// purposes regardless of their move-count metadata.
    pub fn signature(&self) -> u64 {
        let mut hash = 0u64;
        for row in 0..8 {
            for col in 0..8 {
                let pos = Position::new(row, col);
                if let Some(piece) = self.grid[row as usize][col as usize] {
                    hash ^= KEYS.piece_key(piece, pos);
                }
            }
        }
        if self.side_to_move == Color::Black {
            hash ^= KEYS.side_key();
        }
        let sides = [
            (Color::White, true),
            (Color::White, false),
            (Color::Black, true),
            (Color::Black, false),
        ];
        for (i, &(color, kingside)) in sides.iter().enumerate() {
            if self.castling.has(color, kingside) {
                hash ^= KEYS.castling_key(i);
            }
        }
        if let Some(target) = self.en_passant {
            hash ^= KEYS.en_passant_key(target.col as usize);
        }
        hash
    }

    /// Records the current position in the repetition table.
    ///
    /// [`new`](Board::new) and [`make_move`](Board::make_move) call this
    /// automatically; custom setups call it once after assembly.
    pub fn record_position(&mut self) {
        let sig = self.signature();
        *self.repetitions.entry(sig).or_insert(0) += 1;
    }

    fn unrecord_position(&mut self) {
        let sig = self.signature();
        if let Some(count) = self.repetitions.get_mut(&sig) {
            if *count > 1 {
                *count -= 1;
            } else {
                self.repetitions.remove(&sig);
            }
        }
    }

    /// Returns how many times the current position has been recorded.
    pub fn repetition_count(&self) -> u32 {
        self.repetitions
            .get(&self.signature())
            .copied()
            .unwrap_or(0)
    }

    // --- check and legality ---

    /// Returns true if the king of the given color is attacked.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king) => movegen::is_square_attacked(self, king, color.opposite()),
            None => false,
        }
    }

    /// Returns true if the given side may castle on the given wing right
    /// now: rights intact, the squares between king and rook empty, the
    /// king not in check, and every square the king traverses (including
    /// the destination) safe.
    pub fn can_castle(&self, color: Color, kingside: bool) -> bool {
        if !self.castling.has(color, kingside) {
            return false;
        }

        let row = color.back_rank();
        let king_from = Position::new(row, 4);
        let rook_from = Position::new(row, if kingside { 7 } else { 0 });
        if self.piece_at(king_from) != Some(Piece::new(color, PieceKind::King)) {
            return false;
        }
        if self.piece_at(rook_from) != Some(Piece::new(color, PieceKind::Rook)) {
            return false;
        }

        let between = if kingside { 5..7 } else { 1..4 };
        for col in between {
            if !self.is_empty(Position::new(row, col)) {
                return false;
            }
        }

        if self.is_in_check(color) {
            return false;
        }

        // The king steps through two squares; neither may be attacked.
        let step = if kingside { 1 } else { -1 };
        for i in 1..=2 {
            let via = Position::new(row, 4 + step * i);
            let mut probe = self.clone();
            probe.set_piece(king_from, None);
            probe.set_piece(via, Some(Piece::new(color, PieceKind::King)));
            if probe.is_in_check(color) {
                return false;
            }
        }

        true
    }

    /// Returns true if moving the piece of `color` from `from` to `to`
    /// would be legal. Pure: the live board is never mutated.
    pub fn is_valid_move(&self, from: Position, to: Position, color: Color) -> bool {
        let piece = match self.piece_at(from) {
            Some(piece) => piece,
            None => return false,
        };
        if piece.color != color {
            return false;
        }
        if let Some(target) = self.piece_at(to) {
            if target.color == color {
                return false;
            }
        }
        if !movegen::pseudo_legal(self, from).contains(&to) {
            return false;
        }

        // Simulate on an independent copy; the applied move carries the
        // full bookkeeping transition forward.
        let mut probe = self.clone();
        if probe.apply_move(from, to, None).is_none() {
            return false;
        }
        !probe.is_in_check(color)
    }

    // --- move application and undo ---

    /// Validates and applies a move, promoting to Queen when a pawn reaches
    /// the far rank. Returns false (and mutates nothing) if the move is
    /// illegal.
    pub fn make_move(&mut self, from: Position, to: Position, color: Color) -> bool {
        self.make_move_promoting(from, to, color, None)
    }

    /// Like [`make_move`](Board::make_move), but promotes to the given kind
    /// instead of Queen. Only Queen, Rook, Bishop, and Knight are accepted
    /// choices; the choice is ignored for non-promoting moves.
    pub fn make_move_promoting(
        &mut self,
        from: Position,
        to: Position,
        color: Color,
        choice: Option<PieceKind>,
    ) -> bool {
        if matches!(choice, Some(PieceKind::King) | Some(PieceKind::Pawn)) {
            return false;
        }
        if !self.is_valid_move(from, to, color) {
            return false;
        }
        let record = match self.apply_move(from, to, choice) {
            Some(record) => record,
            None => return false,
        };
        self.history.push(record);
        self.record_position();
        true
    }

    /// Applies a move that already passed validation and returns its
    /// record. Performs every side effect except history and repetition
    /// bookkeeping, so the same path serves both real moves and what-if
    /// probes.
    fn apply_move(
        &mut self,
        from: Position,
        to: Position,
        choice: Option<PieceKind>,
    ) -> Option<Move> {
        let moved = self.piece_at(from)?;

        let is_en_passant = moved.kind == PieceKind::Pawn
            && from.col != to.col
            && self.piece_at(to).is_none()
            && self.en_passant == Some(to);
        let victim_square = if is_en_passant {
            // The captured pawn sits one row behind the destination.
            Position::new(from.row, to.col)
        } else {
            to
        };
        let captured = self.piece_at(victim_square);

        let is_castle = moved.kind == PieceKind::King && (to.col - from.col).abs() == 2;
        let promotion = if moved.kind == PieceKind::Pawn && to.row == moved.color.promotion_row() {
            Some(choice.unwrap_or(PieceKind::Queen))
        } else {
            None
        };

        let record = Move {
            from,
            to,
            moved,
            captured,
            promotion,
            is_castle,
            is_en_passant,
            castling_before: self.castling,
            en_passant_before: self.en_passant,
            halfmove_clock_before: self.halfmove_clock,
        };

        // Relocate (and possibly replace) the moving piece.
        let arriving = match promotion {
            Some(kind) => Piece::new(moved.color, kind),
            None => moved,
        };
        self.set_piece(to, Some(arriving));
        self.set_piece(from, None);
        if is_en_passant {
            self.set_piece(victim_square, None);
        }
        if is_castle {
            let (rook_from_col, rook_to_col) = if to.col == 6 { (7, 5) } else { (0, 3) };
            let rook = self.piece_at(Position::new(from.row, rook_from_col));
            self.set_piece(Position::new(from.row, rook_to_col), rook);
            self.set_piece(Position::new(from.row, rook_from_col), None);
        }

        // Castling rights: a king move forfeits both wings, a rook leaving
        // its home square forfeits that wing, and a capture landing on a
        // rook home square forfeits the victim's wing.
        match moved.kind {
            PieceKind::King => self.castling.clear_color(moved.color),
            PieceKind::Rook => {
                if from == Position::new(moved.color.back_rank(), 7) {
                    self.castling.clear(moved.color, true);
                } else if from == Position::new(moved.color.back_rank(), 0) {
                    self.castling.clear(moved.color, false);
                }
            }
            _ => {}
        }
        for color in [Color::White, Color::Black] {
            if to == Position::new(color.back_rank(), 7) {
                self.castling.clear(color, true);
            } else if to == Position::new(color.back_rank(), 0) {
                self.castling.clear(color, false);
            }
        }

        // A double pawn advance opens en passant for exactly one ply; any
        // other move closes it.
        self.en_passant = if moved.kind == PieceKind::Pawn && (to.row - from.row).abs() == 2 {
            Some(Position::new((from.row + to.row) / 2, from.col))
        } else {
            None
        };

        // Clocks. En passant removes a piece, so it resets the halfmove
        // clock like any other capture.
        if moved.kind == PieceKind::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }
        if moved.color == Color::Black {
            self.fullmove_number += 1;
        }
        self.side_to_move = moved.color.opposite();

        Some(record)
    }

    /// Undoes the most recent move, restoring placement, bookkeeping, and
    /// the repetition table exactly. Returns false if the history is empty.
    pub fn undo_last_move(&mut self) -> bool {
        let record = match self.history.pop() {
            Some(record) => record,
            None => return false,
        };

        // Forget the position being left before touching the grid.
        self.unrecord_position();

        // A promotion record's `moved` is still the pawn, so putting it
        // back also reverts the promotion.
        self.set_piece(record.from, Some(record.moved));
        if record.is_en_passant {
            self.set_piece(record.to, None);
            self.set_piece(Position::new(record.from.row, record.to.col), record.captured);
        } else {
            self.set_piece(record.to, record.captured);
        }
        if record.is_castle {
            let (rook_home_col, rook_castled_col) = if record.to.col == 6 { (7, 5) } else { (0, 3) };
            let rook = self.piece_at(Position::new(record.from.row, rook_castled_col));
            self.set_piece(Position::new(record.from.row, rook_home_col), rook);
            self.set_piece(Position::new(record.from.row, rook_castled_col), None);
        }

        self.castling = record.castling_before;
        self.en_passant = record.en_passant_before;
        self.halfmove_clock = record.halfmove_clock_before;
        if record.moved.color == Color::Black {
            self.fullmove_number -= 1;
        }
        self.side_to_move = record.moved.color;

        true
    }

    /// Replaces the pawn on the given square with a piece of the chosen
    /// kind. Returns false if the square does not hold a pawn or the kind
    /// is not a legal promotion target.
    pub fn promote_pawn(&mut self, pos: Position, kind: PieceKind) -> bool {
        if matches!(kind, PieceKind::King | PieceKind::Pawn) {
            return false;
        }
        match self.piece_at(pos) {
            Some(piece) if piece.kind == PieceKind::Pawn => {
                self.set_piece(pos, Some(Piece::new(piece.color, kind)));
                true
            }
            _ => false,
        }
    }

    // --- terminal and draw detection ---

    /// Returns every legal move for the given color as materialized
    /// records, regenerated on each call.
    pub fn legal_moves(&self, color: Color) -> Vec<Move> {
        let mut moves = Vec::new();
        for row in 0..8 {
            for col in 0..8 {
                let from = Position::new(row, col);
                match self.piece_at(from) {
                    Some(piece) if piece.color == color => {}
                    _ => continue,
                }
                for to in movegen::pseudo_legal(self, from) {
                    let mut probe = self.clone();
                    let record = match probe.apply_move(from, to, None) {
                        Some(record) => record,
                        None => continue,
                    };
                    if !probe.is_in_check(color) {
                        moves.push(record);
                    }
                }
            }
        }
        moves
    }

    /// Checkmate: in check with no legal moves.
    pub fn is_checkmate(&self, color: Color) -> bool {
        self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    /// Stalemate: not in check but no legal moves.
    pub fn is_stalemate(&self, color: Color) -> bool {
        !self.is_in_check(color) && self.legal_moves(color).is_empty()
    }

    /// Returns true if the current position has been recorded three or
    /// more times.
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    /// Returns true if neither side can ever force checkmate with the
    /// material on the board: bare kings, a lone minor piece, or bishops
    /// confined to same-colored squares.
    pub fn is_insufficient_material(&self) -> bool {
        let mut white: Vec<(Piece, Position)> = Vec::new();
        let mut black: Vec<(Piece, Position)> = Vec::new();
        for row in 0..8 {
            for col in 0..8 {
                let pos = Position::new(row, col);
                if let Some(piece) = self.piece_at(pos) {
                    match piece.color {
                        Color::White => white.push((piece, pos)),
                        Color::Black => black.push((piece, pos)),
                    }
                }
            }
        }

        let is_minor = |kind: PieceKind| matches!(kind, PieceKind::Bishop | PieceKind::Knight);
        let lone_bishop = |pieces: &[(Piece, Position)]| -> Option<Position> {
            pieces
                .iter()
                .find(|(piece, _)| piece.kind == PieceKind::Bishop)
                .map(|&(_, pos)| pos)
        };

        match (white.len(), black.len()) {
            // King vs king.
            (1, 1) => true,
            // King vs king plus one minor piece.
            (1, 2) => black.iter().any(|(piece, _)| is_minor(piece.kind)),
            (2, 1) => white.iter().any(|(piece, _)| is_minor(piece.kind)),
            // King and bishop each, bishops on same-colored squares.
            (2, 2) => match (lone_bishop(&white), lone_bishop(&black)) {
                (Some(a), Some(b)) => a.is_light_square() == b.is_light_square(),
                _ => false,
            },
            _ => false,
        }
    }

    /// Returns true if the game is drawn: stalemate for either side, fifty
    /// full moves without capture or pawn move, insufficient material, or
    /// threefold repetition.
    pub fn is_draw(&self) -> bool {
        if self.is_stalemate(Color::White) || self.is_stalemate(Color::Black) {
            return true;
        }
        if self.halfmove_clock >= 100 {
            return true;
        }
        if self.is_insufficient_material() {
            return true;
        }
        self.is_threefold_repetition()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  a b c d e f g h")?;
        for row in 0..8i8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8i8 {
                match self.grid[row as usize][col as usize] {
                    Some(piece) => write!(f, "{} ", piece.symbol())?,
                    None => write!(f, ". ")?,
                }
            }
            writeln!(f, "{}", 8 - row)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
