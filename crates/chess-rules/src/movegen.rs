//! Pseudo-legal move generation.
//!
//! Each generator maps (board, origin) to an ordered list of destination
//! squares that respect board boundaries and occupancy, but not king
//! safety. Legality filtering on top of these candidates lives on
//! [`Board`].

use crate::Board;
use chess_base::{Color, PieceKind, Position};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const BISHOP_RAYS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
const ROOK_RAYS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Returns the pseudo-legal destinations of the piece standing on `from`,
/// including the king's castling candidates. Empty if the square is empty
/// or out of bounds.
pub fn pseudo_legal(board: &Board, from: Position) -> Vec<Position> {
    match board.piece_at(from) {
        Some(piece) => targets(board, from, piece.color, piece.kind, true),
        None => Vec::new(),
    }
}

/// Same as [`pseudo_legal`] but without the king's castling candidates.
///
/// This is the destination set used for attack computation: castling can
/// never capture, and including it when probing attacks against the other
/// king would recurse through the castling safety checks.
pub fn attack_targets(board: &Board, from: Position) -> Vec<Position> {
    match board.piece_at(from) {
        Some(piece) => targets(board, from, piece.color, piece.kind, false),
        None => Vec::new(),
    }
}

/// Returns true if any piece of `by` attacks `target`.
pub fn is_square_attacked(board: &Board, target: Position, by: Color) -> bool {
    for row in 0..8 {
        for col in 0..8 {
            let from = Position::new(row, col);
            match board.piece_at(from) {
                Some(piece) if piece.color == by => {
                    if attack_targets(board, from).contains(&target) {
                        return true;
                    }
                }
                _ => {}
            }
        }
    }
    false
}

fn targets(
    board: &Board,
    from: Position,
    color: Color,
    kind: PieceKind,
    with_castling: bool,
) -> Vec<Position> {
    match kind {
        PieceKind::Pawn => pawn_targets(board, from, color),
        PieceKind::Knight => leaper_targets(board, from, color, &KNIGHT_OFFSETS),
        PieceKind::Bishop => slider_targets(board, from, color, &BISHOP_RAYS),
        PieceKind::Rook => slider_targets(board, from, color, &ROOK_RAYS),
        PieceKind::Queen => {
            let mut moves = slider_targets(board, from, color, &BISHOP_RAYS);
            moves.extend(slider_targets(board, from, color, &ROOK_RAYS));
            moves
        }
        PieceKind::King => king_targets(board, from, color, with_castling),
    }
}

fn pawn_targets(board: &Board, from: Position, color: Color) -> Vec<Position> {
    let mut moves = Vec::new();
    let dir = color.pawn_direction();

    // Single push, then double push from the starting row.
    let one = from.offset(dir, 0);
    if one.in_bounds() && board.is_empty(one) {
        moves.push(one);
        let two = from.offset(2 * dir, 0);
        if from.row == color.pawn_start_row() && board.is_empty(two) {
            moves.push(two);
        }
    }

    // Diagonal captures, ordinary or en passant.
    for dc in [-1, 1] {
        let diag = from.offset(dir, dc);
        if !diag.in_bounds() {
            continue;
        }
        match board.piece_at(diag) {
            Some(target) if target.color != color => moves.push(diag),
            None if board.en_passant() == Some(diag) => moves.push(diag),
            _ => {}
        }
    }

    moves
}

fn leaper_targets(
    board: &Board,
    from: Position,
    color: Color,
    offsets: &[(i8, i8)],
) -> Vec<Position> {
    let mut moves = Vec::new();
    for &(dr, dc) in offsets {
        let to = from.offset(dr, dc);
        if !to.in_bounds() {
            continue;
        }
        match board.piece_at(to) {
            Some(target) if target.color == color => {}
            _ => moves.push(to),
        }
    }
    moves
}

fn slider_targets(board: &Board, from: Position, color: Color, rays: &[(i8, i8)]) -> Vec<Position> {
    let mut moves = Vec::new();
    for &(dr, dc) in rays {
        let mut to = from.offset(dr, dc);
        while to.in_bounds() {
            match board.piece_at(to) {
                None => moves.push(to),
                Some(target) => {
                    if target.color != color {
                        moves.push(to);
                    }
                    break;
                }
            }
            to = to.offset(dr, dc);
        }
    }
    moves
}

fn king_targets(board: &Board, from: Position, color: Color, with_castling: bool) -> Vec<Position> {
    let mut moves = leaper_targets(board, from, color, &KING_OFFSETS);

    // Castling candidates, only from the home square.
    if with_castling && from == Position::new(color.back_rank(), 4) {
        if board.can_castle(color, true) {
            moves.push(from.offset(0, 2));
        }
        if board.can_castle(color, false) {
            moves.push(from.offset(0, -2));
        }
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_base::Piece;

    fn place(board: &mut Board, row: i8, col: i8, color: Color, kind: PieceKind) {
        board.set_piece(Position::new(row, col), Some(Piece::new(color, kind)));
    }

    #[test]
    fn pawn_single_and_double_from_start() {
        let board = Board::new();
        let moves = pseudo_legal(&board, Position::new(6, 4));
        assert_eq!(
            moves,
            vec![Position::new(5, 4), Position::new(4, 4)]
        );
    }

    #[test]
    fn pawn_blocked_cannot_push() {
        let mut board = Board::empty();
        place(&mut board, 6, 4, Color::White, PieceKind::Pawn);
        place(&mut board, 5, 4, Color::Black, PieceKind::Rook);
        assert!(pseudo_legal(&board, Position::new(6, 4)).is_empty());
    }

    #[test]
    fn pawn_double_blocked_by_far_square() {
        let mut board = Board::empty();
        place(&mut board, 6, 4, Color::White, PieceKind::Pawn);
        place(&mut board, 4, 4, Color::Black, PieceKind::Rook);
        let moves = pseudo_legal(&board, Position::new(6, 4));
        assert_eq!(moves, vec![Position::new(5, 4)]);
    }

    #[test]
    fn pawn_captures_diagonally_only() {
        let mut board = Board::empty();
        place(&mut board, 4, 4, Color::White, PieceKind::Pawn);
        place(&mut board, 3, 3, Color::Black, PieceKind::Knight);
        place(&mut board, 3, 5, Color::White, PieceKind::Knight);
        let moves = pseudo_legal(&board, Position::new(4, 4));
        assert!(moves.contains(&Position::new(3, 4)));
        assert!(moves.contains(&Position::new(3, 3)));
        assert!(!moves.contains(&Position::new(3, 5)));
    }

    #[test]
    fn pawn_en_passant_target_is_a_candidate() {
        let mut board = Board::empty();
        place(&mut board, 3, 4, Color::White, PieceKind::Pawn);
        place(&mut board, 3, 5, Color::Black, PieceKind::Pawn);
        board.set_en_passant(Some(Position::new(2, 5)));
        let moves = pseudo_legal(&board, Position::new(3, 4));
        assert!(moves.contains(&Position::new(2, 5)));
    }

    #[test]
    fn knight_jumps_from_corner() {
        let mut board = Board::empty();
        place(&mut board, 7, 0, Color::White, PieceKind::Knight);
        let moves = pseudo_legal(&board, Position::new(7, 0));
        assert_eq!(moves.len(), 2);
        assert!(moves.contains(&Position::new(5, 1)));
        assert!(moves.contains(&Position::new(6, 2)));
    }

    #[test]
    fn knight_cannot_land_on_own_piece() {
        let board = Board::new();
        let moves = pseudo_legal(&board, Position::new(7, 1));
        // d2 and pawns block nothing for a knight, but own pawns occupy row 6.
        assert_eq!(
            moves,
            vec![Position::new(5, 0), Position::new(5, 2)]
        );
    }

    #[test]
    fn bishop_ray_stops_at_blockers() {
        let mut board = Board::empty();
        place(&mut board, 4, 4, Color::White, PieceKind::Bishop);
        place(&mut board, 2, 2, Color::Black, PieceKind::Pawn);
        place(&mut board, 6, 6, Color::White, PieceKind::Pawn);
        let moves = pseudo_legal(&board, Position::new(4, 4));
        // Capture square included, own blocker excluded, rays stop there.
        assert!(moves.contains(&Position::new(2, 2)));
        assert!(!moves.contains(&Position::new(1, 1)));
        assert!(moves.contains(&Position::new(5, 5)));
        assert!(!moves.contains(&Position::new(6, 6)));
    }

    #[test]
    fn rook_rays_from_open_board() {
        let mut board = Board::empty();
        place(&mut board, 4, 4, Color::Black, PieceKind::Rook);
        let moves = pseudo_legal(&board, Position::new(4, 4));
        assert_eq!(moves.len(), 14);
    }

    #[test]
    fn queen_is_union_of_bishop_and_rook() {
        let mut board = Board::empty();
        place(&mut board, 4, 4, Color::White, PieceKind::Queen);
        let moves = pseudo_legal(&board, Position::new(4, 4));
        assert_eq!(moves.len(), 27);
    }

    #[test]
    fn king_ring_respects_occupancy() {
        let mut board = Board::empty();
        place(&mut board, 4, 4, Color::White, PieceKind::King);
        place(&mut board, 3, 4, Color::White, PieceKind::Pawn);
        place(&mut board, 5, 4, Color::Black, PieceKind::Pawn);
        let moves = pseudo_legal(&board, Position::new(4, 4));
        assert_eq!(moves.len(), 7);
        assert!(!moves.contains(&Position::new(3, 4)));
        assert!(moves.contains(&Position::new(5, 4)));
    }

    #[test]
    fn attack_targets_exclude_castling_candidates() {
        let mut board = Board::empty();
        place(&mut board, 7, 4, Color::White, PieceKind::King);
        place(&mut board, 7, 7, Color::White, PieceKind::Rook);
        place(&mut board, 0, 4, Color::Black, PieceKind::King);
        board.set_castling(chess_base::CastlingRights::ALL);
        let from = Position::new(7, 4);
        assert!(pseudo_legal(&board, from).contains(&Position::new(7, 6)));
        assert!(!attack_targets(&board, from).contains(&Position::new(7, 6)));
    }

    #[test]
    fn square_attacked_by_slider_through_empty_ray() {
        let mut board = Board::empty();
        place(&mut board, 0, 0, Color::Black, PieceKind::Rook);
        assert!(is_square_attacked(&board, Position::new(0, 7), Color::Black));
        assert!(is_square_attacked(&board, Position::new(7, 0), Color::Black));
        assert!(!is_square_attacked(&board, Position::new(7, 7), Color::Black));
    }

    #[test]
    fn pawn_threatens_diagonals_but_not_its_push_square() {
        let mut board = Board::empty();
        place(&mut board, 4, 4, Color::Black, PieceKind::Pawn);
        place(&mut board, 5, 3, Color::White, PieceKind::Knight);
        place(&mut board, 5, 5, Color::White, PieceKind::Knight);
        place(&mut board, 5, 4, Color::White, PieceKind::Knight);
        // A black pawn on e4 attacks the occupants of d3 and f3; the piece
        // straight ahead on e3 blocks the push and is never attacked.
        assert!(is_square_attacked(&board, Position::new(5, 3), Color::Black));
        assert!(is_square_attacked(&board, Position::new(5, 5), Color::Black));
        assert!(!is_square_attacked(&board, Position::new(5, 4), Color::Black));
    }
}
