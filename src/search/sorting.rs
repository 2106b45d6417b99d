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

// Move ordering: score every move once, then use a selection-sort
// `pick_move` pattern (find the best-scoring remaining move, swap it to
// the front) instead of sorting the whole list up front — most cutoffs
// happen on the first move or two, so the tail of the list is often
// never sorted at all.

use crate::evaluation::defs::material_value;
use crate::movegen::defs::{Move, MoveList};

use super::defs::{SearchTables, MAX_KILLER_MOVES};

const TT_MOVE_SCORE: i32 = 10_000_000;
const CAPTURE_BASE_SCORE: i32 = 1_000_000;
const KILLER_BASE_SCORE: i32 = 900_000;
const KILLER_STEP: i32 = 1_000;

pub fn score_moves(moves: &mut MoveList, tt_move: Option<Move>, tables: &SearchTables, ply: usize) {
    for i in 0..moves.len() {
        let m = moves.get_move(i);
        let score = if Some(m) == tt_move {
            TT_MOVE_SCORE
        } else if let Some(captured) = m.piece_captured {
            CAPTURE_BASE_SCORE + 10 * material_value(captured.kind) - material_value(m.piece_moved.kind)
        } else if m.flag == crate::movegen::defs::MoveFlag::EnPassant {
            CAPTURE_BASE_SCORE + 10 * material_value(crate::defs::PieceKind::Pawn) - material_value(m.piece_moved.kind)
        } else if let Some(killer_index) = killer_index_of(tables, ply, m) {
            KILLER_BASE_SCORE - killer_index as i32 * KILLER_STEP
        } else {
            tables.history.get(m.piece_moved, m.to)
        };
        moves.get_mut_move(i).set_sort_score(score);
    }
}

fn killer_index_of(tables: &SearchTables, ply: usize, m: Move) -> Option<usize> {
    if ply >= tables.killers.len() {
        return None;
    }
    (0..MAX_KILLER_MOVES).find(|&i| tables.killers[ply][i] == Some(m))
}

/// Selection-sort step: finds the highest-scoring move at or after
/// `from`, swaps it into position `from`, and returns it.
pub fn pick_move(moves: &mut MoveList, from: usize) -> Move {
    let mut best_index = from;
    let mut best_score = moves.get_move(from).sort_score();
    for i in (from + 1)..moves.len() {
        let score = moves.get_move(i).sort_score();
        if score > best_score {
            best_score = score;
            best_index = i;
        }
    }
    if best_index != from {
        moves.swap(from, best_index);
    }
    moves.get_move(from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CastleRights;
    use crate::defs::{Color, Piece, PieceKind, Square};
    use crate::movegen::defs::MoveFlag;

    fn mv(piece: PieceKind, captured: Option<PieceKind>, to_col: u8) -> Move {
        Move::new(
            Square::new(6, 0),
            Square::new(4, to_col),
            Piece::new(Color::White, piece),
            captured.map(|k| Piece::new(Color::Black, k)),
            MoveFlag::None,
            CastleRights::all(),
            None,
        )
    }

    #[test]
    fn tt_move_sorts_ahead_of_a_capture() {
        let tables = SearchTables::new();
        let tt_move = mv(PieceKind::Pawn, None, 1);
        let mut moves = MoveList::new();
        moves.push(mv(PieceKind::Queen, Some(PieceKind::Rook), 2));
        moves.push(tt_move);
        score_moves(&mut moves, Some(tt_move), &tables, 0);
        let picked = pick_move(&mut moves, 0);
        assert_eq!(picked, tt_move);
    }

    #[test]
    fn mvv_lva_prefers_capturing_with_the_least_valuable_attacker() {
        let tables = SearchTables::new();
        let mut moves = MoveList::new();
        let queen_takes_rook = Move::new(
            Square::new(6, 3),
            Square::new(4, 2),
            Piece::new(Color::White, PieceKind::Queen),
            Some(Piece::new(Color::Black, PieceKind::Rook)),
            MoveFlag::None,
            CastleRights::all(),
            None,
        );
        let pawn_takes_rook = Move::new(
            Square::new(6, 1),
            Square::new(4, 2),
            Piece::new(Color::White, PieceKind::Pawn),
            Some(Piece::new(Color::Black, PieceKind::Rook)),
            MoveFlag::None,
            CastleRights::all(),
            None,
        );
        moves.push(queen_takes_rook);
        moves.push(pawn_takes_rook);
        score_moves(&mut moves, None, &tables, 0);
        let picked = pick_move(&mut moves, 0);
        assert_eq!(picked, pawn_takes_rook);
    }

    #[test]
    fn killer_move_outranks_a_plain_quiet_move() {
        let mut tables = SearchTables::new();
        let killer = mv(PieceKind::Knight, None, 2);
        tables.store_killer(0, killer);
        let other = mv(PieceKind::Knight, None, 3);

        let mut moves = MoveList::new();
        moves.push(other);
        moves.push(killer);
        score_moves(&mut moves, None, &tables, 0);
        let picked = pick_move(&mut moves, 0);
        assert_eq!(picked, killer);
    }
}
