/* =======================================================================
Rustic is a chess playing engine.
Copyright (C) 2019-2021, Marcel Vanthoor
https://rustic-chess.org/

Rustic is written in the Rust programming language. It is an original
work, not derived from any engine that came before it. However, it does
use a lot of concepts which are well-known and are in use by most if not
all classical alpha/beta-based chess engines.

Rustic is free software: you can redistribute it and/or modify it under
the terms of the GNU General Public License version 3 as published by
the Free Software Foundation.

Rustic is distributed in the hope that it will be useful, but WITHOUT
ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or
FITNESS FOR A PARTICULAR PURPOSE.  See the GNU General Public License
for more details.

You should have received a copy of the GNU General Public License along
with this program.  If not, see <http://www.gnu.org/licenses/>.
======================================================================= */

use crate::board::Board;
use crate::defs::{Color, Piece, PieceKind, Square};

use super::attacks::{
    blocking_squares, compute_pins_and_checks, square_attacked, ALL_DIRECTIONS,
    DIAGONAL_DIRECTIONS, KNIGHT_OFFSETS, ORTHOGONAL_DIRECTIONS,
};
use super::defs::{Move, MoveFlag, MoveList, MoveType};

fn on_ray(direction: (i8, i8), other: (i8, i8)) -> bool {
    // A move is "along" a pin direction if it's parallel to either the
    // direction or its negation.
    direction == other || direction == (-other.0, -other.1)
}

/// Generates the fully legal moves for the side to move, filtering
/// pseudo-legal candidates through pin and check detection. Returns the
/// move list and whether the side to move is currently in check (the
/// caller derives checkmate vs. stalemate from `list.is_empty()`
/// together with this flag).
pub fn generate_legal_moves(board: &Board, move_type: MoveType) -> (MoveList, bool) {
    let color = board.us();
    let info = compute_pins_and_checks(board, color);
    let mut moves = MoveList::new();

    generate_king_moves(board, color, &mut moves, move_type);

    if !info.in_double_check() {
        let (checker_sq, checker_ray) = info.checkers.first().copied().unzip();
        let block_squares = match checker_sq {
            Some(checker) => Some(blocking_squares(board.king_square(color), checker, checker_ray.flatten())),
            None => None,
        };

        for row in 0..8u8 {
            for col in 0..8u8 {
                let square = Square::new(row, col);
                let piece = match board.piece_at(square) {
                    Some(p) if p.color == color && p.kind != PieceKind::King => p,
                    _ => continue,
                };

                let pin_direction = info.pin_direction_of(square);
                let mut candidates = MoveList::new();
                match piece.kind {
                    PieceKind::Pawn => generate_pawn_moves(board, square, piece, &mut candidates, move_type),
                    PieceKind::Knight => generate_knight_moves(board, square, piece, &mut candidates, move_type),
                    PieceKind::Bishop => generate_sliding_moves(board, square, piece, &DIAGONAL_DIRECTIONS, &mut candidates, move_type),
                    PieceKind::Rook => generate_sliding_moves(board, square, piece, &ORTHOGONAL_DIRECTIONS, &mut candidates, move_type),
                    PieceKind::Queen => generate_sliding_moves(board, square, piece, &ALL_DIRECTIONS, &mut candidates, move_type),
                    PieceKind::King => unreachable!(),
                }

                for i in 0..candidates.len() {
                    let m = candidates.get_move(i);
                    let delta = (m.to.row as i8 - square.row as i8, m.to.col as i8 - square.col as i8);
                    if let Some(dir) = pin_direction {
                        if !on_ray(dir, delta) {
                            continue;
                        }
                    }
                    if let Some(allowed) = &block_squares {
                        // En-passant captures the checking pawn on a different
                        // square than the destination; treat it as blocking
                        // only when the captured pawn's square is the checker.
                        let blocks = allowed.contains(&m.to)
                            || (m.flag == MoveFlag::EnPassant
                                && checker_sq == Some(Square::new(square.row, m.to.col)));
                        if !blocks {
                            continue;
                        }
                    }
                    moves.push(m);
                }
            }
        }
    }

    (moves, info.in_check())
}

fn generate_king_moves(board: &Board, color: Color, out: &mut MoveList, move_type: MoveType) {
    let square = board.king_square(color);
    let piece = Piece::new(color, PieceKind::King);

    for &(dr, dc) in &ALL_DIRECTIONS {
        let r = square.row as i8 + dr;
        let c = square.col as i8 + dc;
        if !Square::is_on_board(r, c) {
            continue;
        }
        let to = Square::new(r as u8, c as u8);
        let captured = board.piece_at(to);
        if let Some(c) = captured {
            if c.color == color {
                continue;
            }
        }
        if matches!(move_type, MoveType::Quiet) && captured.is_some() {
            continue;
        }
        if matches!(move_type, MoveType::Capture) && captured.is_none() {
            continue;
        }
        if king_destination_is_safe(board, color, to) {
            out.push(Move::new(square, to, piece, captured, MoveFlag::None, board.castle_rights, board.en_passant));
        }
    }

    if matches!(move_type, MoveType::Capture) {
        return;
    }
    generate_castling_moves(board, color, square, out);
}

// Tests whether the king would be safe on `to`, by checking attacks
// against the destination square with the king notionally lifted (so a
// slider "through" the king's old square is correctly seen as attacking
// the destination too).
fn king_destination_is_safe(board: &Board, color: Color, to: Square) -> bool {
    let mut probe = board.clone();
    probe.remove_piece(board.king_square(color));
    !square_attacked(&probe, to, color.opponent())
}

fn generate_castling_moves(board: &Board, color: Color, king_square: Square, out: &mut MoveList) {
    let enemy = color.opponent();
    let rights = board.castle_rights;
    let back_rank = king_square.row;
    let (kingside, queenside) = match color {
        Color::White => (rights.wks, rights.wqs),
        Color::Black => (rights.bks, rights.bqs),
    };
    let piece = Piece::new(color, PieceKind::King);

    if square_attacked(board, king_square, enemy) {
        return; // can't castle out of check
    }

    if kingside {
        let f = Square::new(back_rank, 5);
        let g = Square::new(back_rank, 6);
        if board.piece_at(f).is_none()
            && board.piece_at(g).is_none()
            && !square_attacked(board, f, enemy)
            && !square_attacked(board, g, enemy)
        {
            out.push(Move::new(king_square, g, piece, None, MoveFlag::CastleKingside, rights, board.en_passant));
        }
    }

    if queenside {
        let d = Square::new(back_rank, 3);
        let c = Square::new(back_rank, 2);
        let b = Square::new(back_rank, 1);
        if board.piece_at(d).is_none()
            && board.piece_at(c).is_none()
            && board.piece_at(b).is_none()
            && !square_attacked(board, d, enemy)
            && !square_attacked(board, c, enemy)
        {
            out.push(Move::new(king_square, c, piece, None, MoveFlag::CastleQueenside, rights, board.en_passant));
        }
    }
}

fn push_normal_or_capture(board: &Board, from: Square, to: Square, piece: Piece, out: &mut MoveList, move_type: MoveType) -> bool {
    let captured = board.piece_at(to);
    if let Some(c) = captured {
        if c.color == piece.color {
            return false;
        }
    }
    let is_capture = captured.is_some();
    let keep = match move_type {
        MoveType::Quiet => !is_capture,
        MoveType::Capture => is_capture,
        MoveType::All => true,
    };
    if keep {
        out.push(Move::new(from, to, piece, captured, MoveFlag::None, board.castle_rights, board.en_passant));
    }
    true // true = square was empty or held an enemy; caller should stop ray here only if occupied
}

fn generate_sliding_moves(board: &Board, from: Square, piece: Piece, directions: &[(i8, i8)], out: &mut MoveList, move_type: MoveType) {
    for &(dr, dc) in directions {
        let mut r = from.row as i8 + dr;
        let mut c = from.col as i8 + dc;
        while Square::is_on_board(r, c) {
            let to = Square::new(r as u8, c as u8);
            let occupied = board.piece_at(to).is_some();
            push_normal_or_capture(board, from, to, piece, out, move_type);
            if occupied {
                break;
            }
            r += dr;
            c += dc;
        }
    }
}

fn generate_knight_moves(board: &Board, from: Square, piece: Piece, out: &mut MoveList, move_type: MoveType) {
    for &(dr, dc) in &KNIGHT_OFFSETS {
        let r = from.row as i8 + dr;
        let c = from.col as i8 + dc;
        if Square::is_on_board(r, c) {
            push_normal_or_capture(board, from, Square::new(r as u8, c as u8), piece, out, move_type);
        }
    }
}

fn push_pawn_move(board: &Board, from: Square, to: Square, piece: Piece, flag: MoveFlag, captured: Option<Piece>, out: &mut MoveList, move_type: MoveType) {
    let is_capture = captured.is_some() || flag == MoveFlag::EnPassant;
    let keep = match move_type {
        MoveType::Quiet => !is_capture,
        MoveType::Capture => is_capture,
        MoveType::All => true,
    };
    if !keep {
        return;
    }
    if to.row == piece.color.promotion_row() {
        for kind in [PieceKind::Queen, PieceKind::Rook, PieceKind::Bishop, PieceKind::Knight] {
            out.push(Move::new(from, to, piece, captured, MoveFlag::Promotion(kind), board.castle_rights, board.en_passant));
        }
    } else {
        out.push(Move::new(from, to, piece, captured, flag, board.castle_rights, board.en_passant));
    }
}

fn generate_pawn_moves(board: &Board, from: Square, piece: Piece, out: &mut MoveList, move_type: MoveType) {
    let dir = piece.color.pawn_direction();
    let one_row = from.row as i8 + dir;

    if Square::is_on_board(one_row, from.col as i8) {
        let one = Square::new(one_row as u8, from.col);
        if board.piece_at(one).is_none() {
            push_pawn_move(board, from, one, piece, MoveFlag::None, None, out, move_type);
            if from.row == piece.color.start_pawn_row() {
                let two_row = from.row as i8 + 2 * dir;
                let two = Square::new(two_row as u8, from.col);
                if board.piece_at(two).is_none() {
                    push_pawn_move(board, from, two, piece, MoveFlag::DoubleStep, None, out, move_type);
                }
            }
        }
    }

    for &dc in &[-1i8, 1] {
        let col = from.col as i8 + dc;
        if !Square::is_on_board(one_row, col) {
            continue;
        }
        let to = Square::new(one_row as u8, col as u8);
        if let Some(target) = board.piece_at(to) {
            if target.color != piece.color {
                push_pawn_move(board, from, to, piece, MoveFlag::None, Some(target), out, move_type);
            }
        } else if board.en_passant == Some(to) {
            push_pawn_move(board, from, to, piece, MoveFlag::EnPassant, None, out, move_type);
        }
    }
}

/// Pseudo-legal move count ignoring pins/checks, for the evaluator's
/// mobility term (spec explicitly calls for speed over legality there).
pub fn pseudo_legal_move_count(board: &Board, color: Color) -> usize {
    let mut total = 0usize;
    for row in 0..8u8 {
        for col in 0..8u8 {
            let square = Square::new(row, col);
            let piece = match board.piece_at(square) {
                Some(p) if p.color == color => p,
                _ => continue,
            };
            let mut list = MoveList::new();
            match piece.kind {
                PieceKind::Pawn => generate_pawn_moves(board, square, piece, &mut list, MoveType::All),
                PieceKind::Knight => generate_knight_moves(board, square, piece, &mut list, MoveType::All),
                PieceKind::Bishop => generate_sliding_moves(board, square, piece, &DIAGONAL_DIRECTIONS, &mut list, MoveType::All),
                PieceKind::Rook => generate_sliding_moves(board, square, piece, &ORTHOGONAL_DIRECTIONS, &mut list, MoveType::All),
                PieceKind::Queen => generate_sliding_moves(board, square, piece, &ALL_DIRECTIONS, &mut list, MoveType::All),
                PieceKind::King => {
                    for &(dr, dc) in &ALL_DIRECTIONS {
                        let r = square.row as i8 + dr;
                        let c = square.col as i8 + dc;
                        if Square::is_on_board(r, c) {
                            push_normal_or_capture(board, square, Square::new(r as u8, c as u8), piece, &mut list, MoveType::All);
                        }
                    }
                }
            }
            total += list.len();
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen;

    #[test]
    fn start_position_has_twenty_legal_moves() {
        let board = Board::start_position();
        let (moves, in_check) = generate_legal_moves(&board, MoveType::All);
        assert!(!in_check);
        assert_eq!(moves.len(), 20);
    }

    #[test]
    fn double_check_allows_only_king_moves() {
        let mut board = Board::empty();
        // White king on e1, attacked by a rook on e8 (along the file) and
        // a knight on d3 (a double check) simultaneously.
        fen::read("4r3/8/8/8/8/3n4/8/4K3 w - -", &mut board).unwrap();
        let (moves, in_check) = generate_legal_moves(&board, MoveType::All);
        assert!(in_check);
        for i in 0..moves.len() {
            assert_eq!(moves.get_move(i).piece_moved.kind, PieceKind::King);
        }
    }

    #[test]
    fn pinned_bishop_cannot_leave_the_pin_ray() {
        let mut board = Board::empty();
        fen::read("8/8/8/8/8/8/8/r2BK3 w - -", &mut board).unwrap();
        let (moves, _) = generate_legal_moves(&board, MoveType::All);
        for i in 0..moves.len() {
            let m = moves.get_move(i);
            if m.piece_moved.kind == PieceKind::Bishop {
                panic!("pinned bishop must not be able to move off the pin ray");
            }
        }
    }
}
