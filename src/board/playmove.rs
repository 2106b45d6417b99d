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

// playmove.rs contains make() and unmake() for move execution and reversal.
//
// The `Move` passed in here already carries its own undo payload (pre-move
// castling rights and en-passant target), so unmake only needs that move
// plus the halfmove clock and Zobrist key stashed in the history record,
// rather than a separately snapshotted game-state stack.

use super::history::HistoryRecord;
use super::Board;
use crate::defs::{Color, Piece, PieceKind, Square};
use crate::movegen::attacks::square_attacked;
use crate::movegen::defs::{Move, MoveFlag};

// Revokes castling rights touching the four corner rook squares and the
// two king squares.
fn revoke_rights_touching(mut rights: super::CastleRights, square: Square) -> super::CastleRights {
    match (square.row, square.col) {
        (7, 0) => rights.wqs = false,
        (7, 4) => {
            rights.wks = false;
            rights.wqs = false;
        }
        (7, 7) => rights.wks = false,
        (0, 0) => rights.bqs = false,
        (0, 4) => {
            rights.bks = false;
            rights.bqs = false;
        }
        (0, 7) => rights.bks = false,
        _ => (),
    }
    rights
}

impl Board {
    /// Plays `m` and reports whether it was legal (the mover's own king is
    /// not left in check). Illegal moves are rolled back before
    /// returning, so the board is never left in a played-but-illegal
    /// state.
    pub fn make(&mut self, m: Move) -> bool {
        let moving_color = self.us();

        self.history.push(HistoryRecord {
            mv: m,
            zobrist_key: self.zobrist_key,
            halfmove_clock: self.halfmove_clock,
        });

        self.set_en_passant(None);

        match m.flag {
            MoveFlag::EnPassant => {
                self.remove_piece(m.from);
                let captured_square = Square::new(m.from.row, m.to.col);
                self.remove_piece(captured_square);
                self.put_piece(m.to, m.piece_moved);
            }
            MoveFlag::CastleKingside => {
                self.remove_piece(m.from);
                self.put_piece(m.to, m.piece_moved);
                let row = m.from.row;
                let rook = self
                    .remove_piece(Square::new(row, 7))
                    .expect("rook missing for kingside castle");
                self.put_piece(Square::new(row, 5), rook);
            }
            MoveFlag::CastleQueenside => {
                self.remove_piece(m.from);
                self.put_piece(m.to, m.piece_moved);
                let row = m.from.row;
                let rook = self
                    .remove_piece(Square::new(row, 0))
                    .expect("rook missing for queenside castle");
                self.put_piece(Square::new(row, 3), rook);
            }
            MoveFlag::Promotion(kind) => {
                self.remove_piece(m.from);
                self.remove_piece(m.to);
                self.put_piece(m.to, Piece::new(moving_color, kind));
            }
            MoveFlag::DoubleStep => {
                self.remove_piece(m.from);
                self.put_piece(m.to, m.piece_moved);
                let ep_row = (m.from.row as i8 + moving_color.pawn_direction()) as u8;
                self.set_en_passant(Some(Square::new(ep_row, m.from.col)));
            }
            MoveFlag::None => {
                self.remove_piece(m.from);
                self.remove_piece(m.to);
                self.put_piece(m.to, m.piece_moved);
            }
        }

        let mut rights = revoke_rights_touching(self.castle_rights, m.from);
        rights = revoke_rights_touching(rights, m.to);
        self.set_castle_rights(rights);

        if m.piece_moved.kind == PieceKind::Pawn || m.is_capture() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock += 1;
        }

        self.swap_side();
        if moving_color == Color::Black {
            self.fullmove_number += 1;
        }

        let is_legal = !square_attacked(self, self.king_square(moving_color), self.us());
        if !is_legal {
            self.unmake();
        }
        is_legal
    }

    /// Reverses the most recently made move, including one rejected by
    /// `make` for leaving its own king in check.
    pub fn unmake(&mut self) {
        let record = self.history.pop().expect("unmake called with empty history");
        let m = record.mv;

        self.swap_side();
        let moving_color = self.us();
        if moving_color == Color::Black {
            self.fullmove_number -= 1;
        }

        match m.flag {
            MoveFlag::EnPassant => {
                self.remove_piece(m.to);
                self.put_piece(m.from, m.piece_moved);
                let captured_square = Square::new(m.from.row, m.to.col);
                self.put_piece(captured_square, Piece::new(moving_color.opponent(), PieceKind::Pawn));
            }
            MoveFlag::CastleKingside => {
                self.remove_piece(m.to);
                self.put_piece(m.from, m.piece_moved);
                let row = m.from.row;
                let rook = self
                    .remove_piece(Square::new(row, 5))
                    .expect("rook missing when unmaking kingside castle");
                self.put_piece(Square::new(row, 7), rook);
            }
            MoveFlag::CastleQueenside => {
                self.remove_piece(m.to);
                self.put_piece(m.from, m.piece_moved);
                let row = m.from.row;
                let rook = self
                    .remove_piece(Square::new(row, 3))
                    .expect("rook missing when unmaking queenside castle");
                self.put_piece(Square::new(row, 0), rook);
            }
            MoveFlag::Promotion(_) => {
                self.remove_piece(m.to);
                self.put_piece(m.from, m.piece_moved);
                if let Some(captured) = m.piece_captured {
                    self.put_piece(m.to, captured);
                }
            }
            MoveFlag::DoubleStep | MoveFlag::None => {
                self.remove_piece(m.to);
                self.put_piece(m.from, m.piece_moved);
                if let Some(captured) = m.piece_captured {
                    self.put_piece(m.to, captured);
                }
            }
        }

        self.set_castle_rights(m.undo_castle_rights);
        self.set_en_passant(m.undo_en_passant);
        self.halfmove_clock = record.halfmove_clock;
        self.zobrist_key = record.zobrist_key;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen;
    use crate::movegen::defs::MoveFlag;

    #[test]
    fn make_then_unmake_restores_start_position() {
        let mut board = Board::start_position();
        let before = board.clone();
        let m = Move::new(
            Square::new(6, 4),
            Square::new(4, 4),
            Piece::new(Color::White, PieceKind::Pawn),
            None,
            MoveFlag::DoubleStep,
            board.castle_rights,
            board.en_passant,
        );
        assert!(board.make(m));
        assert_eq!(board.en_passant, Some(Square::new(5, 4)));
        board.unmake();
        assert_eq!(board.zobrist_key, before.zobrist_key);
        assert_eq!(board.piece_at(Square::new(6, 4)), Some(Piece::new(Color::White, PieceKind::Pawn)));
        assert_eq!(board.en_passant, None);
    }

    #[test]
    fn en_passant_capture_removes_the_captured_pawn() {
        let mut board = Board::empty();
        // Row 4: black pawn on col 3, white pawn on col 4 (just advanced
        // two squares, so the en-passant target behind it is row 3, col 3).
        fen::read("8/8/8/8/3pP3/8/8/4K2k w - -", &mut board).unwrap();
        board.set_en_passant(Some(Square::new(3, 3)));
        let m = Move::new(
            Square::new(4, 4),
            Square::new(3, 3),
            Piece::new(Color::White, PieceKind::Pawn),
            None,
            MoveFlag::EnPassant,
            board.castle_rights,
            board.en_passant,
        );
        assert!(board.make(m));
        assert_eq!(board.piece_at(Square::new(4, 3)), None);
        assert_eq!(board.piece_at(Square::new(3, 3)), Some(Piece::new(Color::White, PieceKind::Pawn)));
        board.unmake();
        assert_eq!(board.piece_at(Square::new(4, 3)), Some(Piece::new(Color::Black, PieceKind::Pawn)));
    }

    #[test]
    fn illegal_move_leaving_king_in_check_is_rolled_back() {
        let mut board = Board::empty();
        fen::read("8/8/8/8/8/8/8/r3K3 w - -", &mut board).unwrap();
        let before = board.clone();
        // King steps sideways but stays on the rook's rank, still in check.
        let m = Move::new(
            Square::new(7, 4),
            Square::new(7, 5),
            Piece::new(Color::White, PieceKind::King),
            None,
            MoveFlag::None,
            board.castle_rights,
            board.en_passant,
        );
        assert!(!board.make(m));
        assert_eq!(board.zobrist_key, before.zobrist_key);
        assert_eq!(board.piece_at(Square::new(7, 4)), Some(Piece::new(Color::White, PieceKind::King)));
    }
}
