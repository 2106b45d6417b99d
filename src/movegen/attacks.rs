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

// Pin and check detection by ray-scanning outward from the king, plus the
// knight-offset check: the same eight directions as `check_for_pins_and_checks`,
// treating the first friendly piece found on a ray as a pin candidate.

use crate::board::Board;
use crate::defs::{Color, PieceKind, Square};

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0), (1, 0), (0, -1), (0, 1),
    (-1, -1), (-1, 1), (1, -1), (1, 1),
];
pub const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1), (-2, 1), (2, -1), (2, 1),
    (-1, -2), (-1, 2), (1, -2), (1, 2),
];

fn slider_attacks_along(kind: PieceKind, direction: (i8, i8)) -> bool {
    let is_orthogonal = direction.0 == 0 || direction.1 == 0;
    match kind {
        PieceKind::Queen => true,
        PieceKind::Rook => is_orthogonal,
        PieceKind::Bishop => !is_orthogonal,
        _ => false,
    }
}

/// True if `square` is attacked by any piece of `by_color`. Used for king
/// move legality and for testing whether a castling king's path is safe.
pub fn square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    // Pawns: a pawn on a square one row "behind" (from the pawn's own
    // direction of travel) and one column over attacks `square`.
    let pawn_row_offset = by_color.opponent().pawn_direction();
    for &dc in &[-1i8, 1] {
        let r = square.row as i8 + pawn_row_offset;
        let c = square.col as i8 + dc;
        if Square::is_on_board(r, c) {
            if let Some(p) = board.piece_at(Square::new(r as u8, c as u8)) {
                if p.color == by_color && p.kind == PieceKind::Pawn {
                    return true;
                }
            }
        }
    }

    // Knights.
    for &(dr, dc) in &KNIGHT_OFFSETS {
        let r = square.row as i8 + dr;
        let c = square.col as i8 + dc;
        if Square::is_on_board(r, c) {
            if let Some(p) = board.piece_at(Square::new(r as u8, c as u8)) {
                if p.color == by_color && p.kind == PieceKind::Knight {
                    return true;
                }
            }
        }
    }

    // King (adjacency only — used when testing squares the king itself
    // traverses; an enemy king a single square away is always relevant).
    for &(dr, dc) in &ALL_DIRECTIONS {
        let r = square.row as i8 + dr;
        let c = square.col as i8 + dc;
        if Square::is_on_board(r, c) {
            if let Some(p) = board.piece_at(Square::new(r as u8, c as u8)) {
                if p.color == by_color && p.kind == PieceKind::King {
                    return true;
                }
            }
        }
    }

    // Sliders (rook/bishop/queen) along each of the eight rays.
    for &(dr, dc) in &ALL_DIRECTIONS {
        let mut r = square.row as i8 + dr;
        let mut c = square.col as i8 + dc;
        while Square::is_on_board(r, c) {
            if let Some(p) = board.piece_at(Square::new(r as u8, c as u8)) {
                if p.color == by_color && slider_attacks_along(p.kind, (dr, dc)) {
                    return true;
                }
                break;
            }
            r += dr;
            c += dc;
        }
    }

    false
}

/// A pin: `pinned` may only move along `direction` (or its negation).
#[derive(Copy, Clone, Debug)]
pub struct Pin {
    pub pinned: Square,
    pub direction: (i8, i8),
}

/// Result of scanning for pins and checks from `color`'s king: the set
/// of squares giving check (each paired with the ray direction from the
/// king, if the checker is a slider, so interposing squares can be
/// computed), and the set of pins along with the direction the pinned
/// piece may still move in.
pub struct PinsAndChecks {
    pub checkers: Vec<(Square, Option<(i8, i8)>)>,
    pub pins: Vec<Pin>,
}

impl PinsAndChecks {
    pub fn in_check(&self) -> bool {
        !self.checkers.is_empty()
    }

    pub fn in_double_check(&self) -> bool {
        self.checkers.len() >= 2
    }

    pub fn pin_direction_of(&self, square: Square) -> Option<(i8, i8)> {
        self.pins.iter().find(|p| p.pinned == square).map(|p| p.direction)
    }
}

pub fn compute_pins_and_checks(board: &Board, color: Color) -> PinsAndChecks {
    let king = board.king_square(color);
    let enemy = color.opponent();
    let mut checkers = Vec::new();
    let mut pins = Vec::new();

    for &(dr, dc) in &ALL_DIRECTIONS {
        let mut r = king.row as i8 + dr;
        let mut c = king.col as i8 + dc;
        let mut friendly_candidate: Option<Square> = None;
        while Square::is_on_board(r, c) {
            let sq = Square::new(r as u8, c as u8);
            if let Some(p) = board.piece_at(sq) {
                if p.color == color {
                    if friendly_candidate.is_some() {
                        // A second friendly piece on the ray blocks it entirely.
                        break;
                    }
                    friendly_candidate = Some(sq);
                } else {
                    let attacks = slider_attacks_along(p.kind, (dr, dc));
                    if attacks {
                        match friendly_candidate {
                            None => checkers.push((sq, Some((dr, dc)))),
                            Some(pinned) => pins.push(Pin { pinned, direction: (dr, dc) }),
                        }
                    }
                    break;
                }
            }
            r += dr;
            c += dc;
        }
    }

    // Pawn checks (adjacent diagonal, direction-specific).
    let pawn_dir = color.pawn_direction();
    for &dc in &[-1i8, 1] {
        let r = king.row as i8 + pawn_dir;
        let c = king.col as i8 + dc;
        if Square::is_on_board(r, c) {
            let sq = Square::new(r as u8, c as u8);
            if let Some(p) = board.piece_at(sq) {
                if p.color == enemy && p.kind == PieceKind::Pawn {
                    checkers.push((sq, None));
                }
            }
        }
    }

    // Knight checks.
    for &(dr, dc) in &KNIGHT_OFFSETS {
        let r = king.row as i8 + dr;
        let c = king.col as i8 + dc;
        if Square::is_on_board(r, c) {
            let sq = Square::new(r as u8, c as u8);
            if let Some(p) = board.piece_at(sq) {
                if p.color == enemy && p.kind == PieceKind::Knight {
                    checkers.push((sq, None));
                }
            }
        }
    }

    PinsAndChecks { checkers, pins }
}

/// Squares that block (or capture) a single check, i.e. the legal
/// destinations for any non-king move while in single check.
pub fn blocking_squares(king: Square, checker: Square, ray: Option<(i8, i8)>) -> Vec<Square> {
    let mut squares = vec![checker];
    if let Some((dr, dc)) = ray {
        let mut r = king.row as i8 + dr;
        let mut c = king.col as i8 + dc;
        while Square::is_on_board(r, c) {
            let sq = Square::new(r as u8, c as u8);
            if sq == checker {
                break;
            }
            squares.push(sq);
            r += dr;
            c += dc;
        }
    }
    squares
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen;

    #[test]
    fn detects_check_from_a_rook() {
        let mut board = Board::empty();
        fen::read("8/8/8/8/8/8/4r3/4K3 w - -", &mut board).unwrap();
        let info = compute_pins_and_checks(&board, Color::White);
        assert!(info.in_check());
        assert_eq!(info.checkers.len(), 1);
    }

    #[test]
    fn detects_a_pin_along_a_rank() {
        let mut board = Board::empty();
        fen::read("8/8/8/8/8/8/r2NK3/8 w - -", &mut board).unwrap();
        let info = compute_pins_and_checks(&board, Color::White);
        assert!(!info.in_check());
        assert_eq!(info.pins.len(), 1);
        assert_eq!(info.pins[0].pinned, Square::new(6, 3));
    }

    #[test]
    fn square_attacked_detects_knight() {
        let mut board = Board::empty();
        fen::read("8/8/8/8/8/2n5/8/4K3 w - -", &mut board).unwrap();
        assert!(square_attacked(&board, Square::new(6, 2), Color::Black));
    }
}
