//! Chess rules engine on a mailbox board.
//!
//! This crate provides:
//! - [`Board`] - the 8x8 grid of optional pieces plus all rules
//!   bookkeeping: move history, castling rights, en passant target,
//!   halfmove/fullmove clocks, and the repetition table
//! - [`movegen`] - per-kind pseudo-legal move generation
//! - [`Game`] - a session wrapper adding turn order and terminal states
//!
//! # Architecture
//!
//! Move generation produces pseudo-legal candidates; [`Board`] filters
//! them by simulating each candidate on an independent clone and
//! rejecting any that leave the mover's king attacked. Terminal queries
//! (checkmate, stalemate, draws) compose check detection with legal move
//! generation. Draw detection covers stalemate, the fifty-move rule,
//! insufficient material, and threefold repetition via structural
//! position signatures.
//!
//! # Example
//!
//! ```
//! use chess_base::{Color, Position};
//! use chess_rules::{Board, Game, GameStatus};
//!
//! // Using Board directly (no turn enforcement).
//! let mut board = Board::new();
//! assert_eq!(board.legal_moves(Color::White).len(), 20);
//! assert!(board.make_move(Position::new(6, 4), Position::new(4, 4), Color::White));
//!
//! // Using Game for a full session.
//! let mut game = Game::new();
//! game.play(Color::White, Position::new(6, 4), Position::new(4, 4)).unwrap();
//! assert_eq!(game.status(), GameStatus::Ongoing);
//! ```

mod board;
mod game;
pub mod movegen;
mod signature;

pub use board::Board;
pub use game::{DrawReason, Game, GameError, GameStatus};
