//! Core value types for chess.
//!
//! This crate provides the fundamental types used across the rules engine:
//! - [`Color`] and [`PieceKind`] for piece identity
//! - [`Piece`] as the value stored in a board square
//! - [`Position`] for 0-based (row, column) board coordinates
//! - [`CastlingRights`] for the per-color, per-side castling flags
//! - [`Move`] as the record of one applied board transition

mod castling;
mod color;
mod kind;
mod mov;
mod piece;
mod position;

pub use castling::CastlingRights;
pub use color::Color;
pub use kind::PieceKind;
pub use mov::Move;
pub use piece::Piece;
pub use position::Position;
