//! Key tables for position signatures.
//!
//! A position signature is a structural hash of piece placement, side to
//! move, castling rights, and en passant file. It is built by XORing fixed
//! pseudo-random keys, one per (kind, color, square) plus a handful of state
//! keys, so two boards with the same placement and bookkeeping hash alike
//! regardless of how they were reached. The repetition table is keyed on it.

use chess_base::{Piece, Position};

/// Fixed key tables, generated at compile time.
pub(crate) struct SignatureKeys {
    /// Keys for pieces: [kind][color][square].
    pieces: [[[u64; 64]; 2]; 6],
    /// Key XORed in when Black is to move.
    black_to_move: u64,
    /// Keys for the four castling rights, in flag-bit order.
    castling: [u64; 4],
    /// Keys for the en passant file.
    en_passant_file: [u64; 8],
}

impl SignatureKeys {
    /// Generates the key tables with a xorshift64 PRNG from a fixed seed,
    /// so signatures are reproducible across runs.
    const fn new() -> Self {
        const fn next_random(state: u64) -> u64 {
            let mut x = state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        }

        let mut state = 0x9E37_79B9_7F4A_7C15u64;
        let mut pieces = [[[0u64; 64]; 2]; 6];
        let mut castling = [0u64; 4];
        let mut en_passant_file = [0u64; 8];

        let mut kind = 0;
        while kind < 6 {
            let mut color = 0;
            while color < 2 {
                let mut square = 0;
                while square < 64 {
                    state = next_random(state);
                    pieces[kind][color][square] = state;
                    square += 1;
                }
                color += 1;
            }
            kind += 1;
        }

        state = next_random(state);
        let black_to_move = state;

        let mut i = 0;
        while i < 4 {
            state = next_random(state);
            castling[i] = state;
            i += 1;
        }

        let mut i = 0;
        while i < 8 {
            state = next_random(state);
            en_passant_file[i] = state;
            i += 1;
        }

        SignatureKeys {
            pieces,
            black_to_move,
            castling,
            en_passant_file,
        }
    }

    /// Returns the key for a piece standing on an in-bounds square.
    #[inline]
    pub(crate) fn piece_key(&self, piece: Piece, pos: Position) -> u64 {
        let square = (pos.row * 8 + pos.col) as usize;
        self.pieces[piece.kind.index()][piece.color.index()][square]
    }

    /// Returns the key for Black being on move.
    #[inline]
    pub(crate) fn side_key(&self) -> u64 {
        self.black_to_move
    }

    /// Returns the key for one castling right (0-3, flag-bit order).
    #[inline]
    pub(crate) fn castling_key(&self, right: usize) -> u64 {
        self.castling[right]
    }

    /// Returns the key for an en passant target on the given file.
    #[inline]
    pub(crate) fn en_passant_key(&self, file: usize) -> u64 {
        self.en_passant_file[file]
    }
}

/// Global key tables.
pub(crate) static KEYS: SignatureKeys = SignatureKeys::new();
