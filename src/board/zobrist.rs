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

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::board::CastleRights;
use crate::defs::{Color, Piece, PieceKind, Square, NR_OF_SQUARES};

const NR_OF_PIECE_KINDS: usize = 6;
const NR_OF_SIDES: usize = 2;
const NR_OF_CASTLING_PERMISSIONS: usize = 16; // 4 independent bits

/* Random numbers for all sides, all piece kinds, on all squares. */
type PieceRandoms = [[[u64; NR_OF_SQUARES]; NR_OF_PIECE_KINDS]; NR_OF_SIDES];
type CastlingRandoms = [u64; NR_OF_CASTLING_PERMISSIONS];
type SideRandoms = [u64; NR_OF_SIDES];
type EpRandoms = [u64; NR_OF_SQUARES + 1];

/// Generates and stores the random keys used to incrementally maintain a
/// position's Zobrist fingerprint. The seed is fixed so the fingerprint
/// is deterministic across runs and shareable between threads, per the
/// "global mutable config"/fingerprint design note.
#[derive(Clone)]
pub struct ZobristRandoms {
    rnd_pieces: PieceRandoms,
    rnd_castling: CastlingRandoms,
    rnd_side: SideRandoms,
    rnd_en_passant: EpRandoms,
}

fn color_index(color: Color) -> usize {
    match color {
        Color::White => 0,
        Color::Black => 1,
    }
}

fn kind_index(kind: PieceKind) -> usize {
    match kind {
        PieceKind::Pawn => 0,
        PieceKind::Knight => 1,
        PieceKind::Bishop => 2,
        PieceKind::Rook => 3,
        PieceKind::Queen => 4,
        PieceKind::King => 5,
    }
}

fn castle_rights_index(rights: CastleRights) -> usize {
    (rights.wks as usize) | (rights.wqs as usize) << 1 | (rights.bks as usize) << 2 | (rights.bqs as usize) << 3
}

impl ZobristRandoms {
    pub fn new() -> Self {
        let mut random = SmallRng::from_seed([125; 32]);
        let mut z = Self {
            rnd_pieces: [[[0; NR_OF_SQUARES]; NR_OF_PIECE_KINDS]; NR_OF_SIDES],
            rnd_castling: [0; NR_OF_CASTLING_PERMISSIONS],
            rnd_side: [0; NR_OF_SIDES],
            rnd_en_passant: [0; NR_OF_SQUARES + 1],
        };

        z.rnd_pieces.iter_mut().for_each(|side| {
            side.iter_mut()
                .for_each(|kind| kind.iter_mut().for_each(|square| *square = random.gen::<u64>()))
        });
        z.rnd_castling.iter_mut().for_each(|p| *p = random.gen::<u64>());
        z.rnd_side.iter_mut().for_each(|s| *s = random.gen::<u64>());
        z.rnd_en_passant.iter_mut().for_each(|e| *e = random.gen::<u64>());

        z
    }

    pub fn piece(&self, piece: Piece, square: Square) -> u64 {
        let index = square.row as usize * 8 + square.col as usize;
        self.rnd_pieces[color_index(piece.color)][kind_index(piece.kind)][index]
    }

    pub fn castling(&self, rights: CastleRights) -> u64 {
        self.rnd_castling[castle_rights_index(rights)]
    }

    pub fn side(&self) -> u64 {
        // Only Black's contribution is ever toggled in; White is the
        // baseline, so a single key suffices (see `rnd_side[1]`).
        self.rnd_side[1]
    }

    pub fn en_passant(&self, square: Square) -> u64 {
        self.rnd_en_passant[square.row as usize * 8 + square.col as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_deterministic_across_instances() {
        let a = ZobristRandoms::new();
        let b = ZobristRandoms::new();
        let square = Square::new(3, 3);
        let piece = Piece::new(Color::White, PieceKind::Queen);
        assert_eq!(a.piece(piece, square), b.piece(piece, square));
        assert_eq!(a.side(), b.side());
    }

    #[test]
    fn distinct_pieces_and_squares_get_distinct_keys() {
        let z = ZobristRandoms::new();
        let wq = Piece::new(Color::White, PieceKind::Queen);
        let bq = Piece::new(Color::Black, PieceKind::Queen);
        let sq = Square::new(0, 0);
        assert_ne!(z.piece(wq, sq), z.piece(bq, sq));
        assert_ne!(z.piece(wq, sq), z.piece(wq, Square::new(0, 1)));
    }
}
