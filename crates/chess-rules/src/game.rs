//! Game session management on top of [`Board`].
//!
//! [`Board`] is deliberately query-only about game flow: it validates and
//! applies individual moves but accepts them for either color at any time.
//! [`Game`] adds the session rules a frontend needs: turn order, a terminal
//! status after every move, and refusal of further moves once the game has
//! ended.

use crate::Board;
use chess_base::{Color, PieceKind, Position};
use thiserror::Error;

/// Why a finished game is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawReason {
    /// 100 halfmoves without a capture or pawn move.
    FiftyMoveRule,
    /// The same position occurred three times.
    ThreefoldRepetition,
    /// Neither side can force checkmate.
    InsufficientMaterial,
}

/// The state of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    /// The game continues.
    Ongoing,
    /// The side to move is checkmated.
    Checkmate { winner: Color },
    /// The side to move has no legal moves but is not in check.
    Stalemate,
    /// Drawn for the given reason.
    Draw(DrawReason),
}

impl GameStatus {
    /// Returns true for any state other than [`GameStatus::Ongoing`].
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GameStatus::Ongoing)
    }
}

/// Error type for game session operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("it is not {0}'s turn")]
    NotYourTurn(Color),
    #[error("illegal move: {from} to {to}")]
    IllegalMove { from: Position, to: Position },
    #[error("the game has already ended")]
    GameOver,
    #[error("no moves to undo")]
    NothingToUndo,
}

/// A chess game session: a board plus turn order and terminal-state
/// enforcement.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    status: GameStatus,
}

impl Game {
    /// Starts a game from the standard position.
    pub fn new() -> Self {
        Game {
            board: Board::new(),
            status: GameStatus::Ongoing,
        }
    }

    /// Starts a game from a prepared board, evaluating its status
    /// immediately (the position may already be terminal).
    pub fn from_board(board: Board) -> Self {
        let status = Self::evaluate(&board);
        Game { board, status }
    }

    /// Returns the underlying board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current session status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Returns true once the session has reached a terminal state.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }

    /// Plays a move for `color`, promoting to Queen if the move promotes.
    pub fn play(
        &mut self,
        color: Color,
        from: Position,
        to: Position,
    ) -> Result<GameStatus, GameError> {
        self.play_promoting(color, from, to, None)
    }

    /// Plays a move for `color` with an explicit promotion choice.
    pub fn play_promoting(
        &mut self,
        color: Color,
        from: Position,
        to: Position,
        choice: Option<PieceKind>,
    ) -> Result<GameStatus, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }
        if color != self.board.side_to_move() {
            return Err(GameError::NotYourTurn(color));
        }
        if !self.board.make_move_promoting(from, to, color, choice) {
            return Err(GameError::IllegalMove { from, to });
        }
        self.status = Self::evaluate(&self.board);
        Ok(self.status)
    }

    /// Undoes the last move and re-evaluates the status, reopening a
    /// finished game if the undone move was the terminal one.
    pub fn undo(&mut self) -> Result<(), GameError> {
        if !self.board.undo_last_move() {
            return Err(GameError::NothingToUndo);
        }
        self.status = Self::evaluate(&self.board);
        Ok(())
    }

    fn evaluate(board: &Board) -> GameStatus {
        let side = board.side_to_move();
        if board.is_checkmate(side) {
            return GameStatus::Checkmate {
                winner: side.opposite(),
            };
        }
        if board.is_stalemate(side) {
            return GameStatus::Stalemate;
        }
        if board.is_threefold_repetition() {
            return GameStatus::Draw(DrawReason::ThreefoldRepetition);
        }
        if board.halfmove_clock() >= 100 {
            return GameStatus::Draw(DrawReason::FiftyMoveRule);
        }
        if board.is_insufficient_material() {
            return GameStatus::Draw(DrawReason::InsufficientMaterial);
        }
        GameStatus::Ongoing
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_base::Piece;

    fn pos(row: i8, col: i8) -> Position {
        Position::new(row, col)
    }

    #[test]
    fn new_game_is_ongoing() {
        let game = Game::new();
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert!(!game.is_over());
    }

    #[test]
    fn enforces_turn_order() {
        let mut game = Game::new();
        game.play(Color::White, pos(6, 4), pos(4, 4)).unwrap();
        let err = game.play(Color::White, pos(6, 3), pos(4, 3)).unwrap_err();
        assert_eq!(err, GameError::NotYourTurn(Color::White));
        game.play(Color::Black, pos(1, 4), pos(3, 4)).unwrap();
    }

    #[test]
    fn rejects_illegal_move_and_keeps_turn() {
        let mut game = Game::new();
        let err = game.play(Color::White, pos(6, 4), pos(3, 4)).unwrap_err();
        assert_eq!(
            err,
            GameError::IllegalMove {
                from: pos(6, 4),
                to: pos(3, 4)
            }
        );
        assert_eq!(game.board().side_to_move(), Color::White);
    }

    #[test]
    fn scholars_mate_ends_the_session() {
        let mut game = Game::new();
        game.play(Color::White, pos(6, 4), pos(4, 4)).unwrap(); // e4
        game.play(Color::Black, pos(1, 4), pos(3, 4)).unwrap(); // e5
        game.play(Color::White, pos(7, 3), pos(3, 7)).unwrap(); // Qh5
        game.play(Color::Black, pos(0, 1), pos(2, 2)).unwrap(); // Nc6
        game.play(Color::White, pos(7, 5), pos(4, 2)).unwrap(); // Bc4
        game.play(Color::Black, pos(0, 6), pos(2, 5)).unwrap(); // Nf6
        let status = game.play(Color::White, pos(3, 7), pos(1, 5)).unwrap(); // Qxf7#

        assert_eq!(
            status,
            GameStatus::Checkmate {
                winner: Color::White
            }
        );
        assert!(game.is_over());
        assert_eq!(
            game.play(Color::Black, pos(0, 4), pos(1, 4)),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn undo_reopens_a_finished_game() {
        let mut game = Game::new();
        game.play(Color::White, pos(6, 4), pos(4, 4)).unwrap();
        game.play(Color::Black, pos(1, 4), pos(3, 4)).unwrap();
        game.play(Color::White, pos(7, 3), pos(3, 7)).unwrap();
        game.play(Color::Black, pos(0, 1), pos(2, 2)).unwrap();
        game.play(Color::White, pos(7, 5), pos(4, 2)).unwrap();
        game.play(Color::Black, pos(0, 6), pos(2, 5)).unwrap();
        game.play(Color::White, pos(3, 7), pos(1, 5)).unwrap();
        assert!(game.is_over());

        game.undo().unwrap();
        assert_eq!(game.status(), GameStatus::Ongoing);
        assert_eq!(game.board().side_to_move(), Color::White);
    }

    #[test]
    fn undo_with_no_history_fails() {
        let mut game = Game::new();
        assert_eq!(game.undo(), Err(GameError::NothingToUndo));
    }

    #[test]
    fn insufficient_material_is_detected_on_construction() {
        let mut board = Board::empty();
        board.set_piece(pos(7, 4), Some(Piece::new(Color::White, PieceKind::King)));
        board.set_piece(pos(0, 4), Some(Piece::new(Color::Black, PieceKind::King)));
        board.record_position();

        let game = Game::from_board(board);
        assert_eq!(
            game.status(),
            GameStatus::Draw(DrawReason::InsufficientMaterial)
        );
        assert!(game.is_over());
    }

    #[test]
    fn stalemate_status() {
        // Black king h8, White queen f7, White king g6; Black to move.
        let mut board = Board::empty();
        board.set_piece(pos(0, 7), Some(Piece::new(Color::Black, PieceKind::King)));
        board.set_piece(pos(1, 5), Some(Piece::new(Color::White, PieceKind::Queen)));
        board.set_piece(pos(2, 6), Some(Piece::new(Color::White, PieceKind::King)));
        board.set_side_to_move(Color::Black);
        board.record_position();

        let game = Game::from_board(board);
        assert_eq!(game.status(), GameStatus::Stalemate);
    }

    #[test]
    fn fifty_move_rule_status() {
        let mut board = Board::empty();
        board.set_piece(pos(7, 4), Some(Piece::new(Color::White, PieceKind::King)));
        board.set_piece(pos(7, 0), Some(Piece::new(Color::White, PieceKind::Rook)));
        board.set_piece(pos(0, 7), Some(Piece::new(Color::Black, PieceKind::King)));
        board.set_halfmove_clock(100);
        board.record_position();

        let game = Game::from_board(board);
        assert_eq!(game.status(), GameStatus::Draw(DrawReason::FiftyMoveRule));
    }
}
