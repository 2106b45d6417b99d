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

pub fn evaluate(board: &Board) -> i32 {
    pawn_shield(board, Color::White) - pawn_shield(board, Color::Black)
}

fn pawn_shield(board: &Board, color: Color) -> i32 {
    let king = board.king_square(color);
    let direction = color.pawn_direction();
    let shield_row = king.row as i8 + direction;
    if !Square::is_on_board(shield_row, 0) {
        return 0;
    }

    let mut score = 0;
    for dc in [-1i8, 0, 1] {
        let col = king.col as i8 + dc;
        if !(0..8).contains(&col) {
            continue;
        }
        let square = Square::new(shield_row as u8, col as u8);
        match board.piece_at(square) {
            Some(Piece { color: c, kind: PieceKind::Pawn }) if c == color => score += 10,
            _ => score -= 15,
        }
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_king_safety_is_symmetric() {
        let board = Board::start_position();
        assert_eq!(evaluate(&board), 0);
    }

    #[test]
    fn exposed_king_scores_worse_than_a_sheltered_one() {
        let mut board = Board::empty();
        crate::board::fen::read("4k3/3ppp2/8/8/8/8/8/4K3 w - -", &mut board).unwrap();
        assert_eq!(evaluate(&board), -75);
    }
}
