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

// Save/load format compatible with existing saves: an 8x8 grid of
// two-character piece tags ("wp", "bK", "--"), plus the metadata needed
// to resume a game, serialized with `serde`/`serde_json`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{Board, CastleRights};
use crate::defs::{Color, Piece, PieceKind, Square, EMPTY_TAG};
use crate::error::{Error, Result};
use crate::movegen::defs::Move;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SavedMove {
    pub from: (u8, u8),
    pub to: (u8, u8),
}

impl From<&Move> for SavedMove {
    fn from(m: &Move) -> Self {
        Self { from: (m.from.row, m.from.col), to: (m.to.row, m.to.col) }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AiSettings {
    pub ai_depth: i8,
    pub ai_time_limit: f64,
    pub player_one: String,
    pub player_two: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub board: [[String; 8]; 8],
    pub side_to_move_is_white: bool,
    pub castle_rights: (bool, bool, bool, bool), // wks, wqs, bks, bqs
    pub en_passant: Option<(u8, u8)>,
    pub move_history: Vec<SavedMove>,
    pub turn_number: u32,
    pub ai_settings: AiSettings,
}

impl SaveFile {
    pub fn from_board(board: &Board, ai_settings: AiSettings) -> Self {
        let mut tags: [[String; 8]; 8] = Default::default();
        for row in 0..8u8 {
            for col in 0..8u8 {
                tags[row as usize][col as usize] = match board.piece_at(Square::new(row, col)) {
                    Some(p) => p.tag(),
                    None => EMPTY_TAG.to_string(),
                };
            }
        }

        Self {
            board: tags,
            side_to_move_is_white: board.side_to_move == Color::White,
            castle_rights: (
                board.castle_rights.wks,
                board.castle_rights.wqs,
                board.castle_rights.bks,
                board.castle_rights.bqs,
            ),
            en_passant: board.en_passant.map(|sq| (sq.row, sq.col)),
            move_history: board.history.moves().map(SavedMove::from).collect(),
            turn_number: board.fullmove_number,
            ai_settings,
        }
    }

    /// Reconstructs the board's current position (pieces, side to move,
    /// castling rights, en-passant target, turn number). Move history is
    /// preserved on disk for replay/display but is not required to
    /// reconstruct the live position, since every `Move` already carries
    /// its own undo payload.
    pub fn to_board(&self) -> Result<Board> {
        let mut board = Board::empty();
        let mut white_kings = 0u32;
        let mut black_kings = 0u32;
        for row in 0..8u8 {
            for col in 0..8u8 {
                let tag = &self.board[row as usize][col as usize];
                if tag == EMPTY_TAG {
                    continue;
                }
                let piece = Piece::from_tag(tag).ok_or_else(|| Error::InvalidSave(format!("bad tag '{tag}'")))?;
                if piece.kind == PieceKind::King {
                    match piece.color {
                        Color::White => white_kings += 1,
                        Color::Black => black_kings += 1,
                    }
                }
                board.put_piece(Square::new(row, col), piece);
            }
        }
        if white_kings != 1 || black_kings != 1 {
            return Err(Error::InvalidSave("expected exactly one king per color".into()));
        }
        board.side_to_move = if self.side_to_move_is_white { Color::White } else { Color::Black };
        board.castle_rights = CastleRights {
            wks: self.castle_rights.0,
            wqs: self.castle_rights.1,
            bks: self.castle_rights.2,
            bqs: self.castle_rights.3,
        };
        board.en_passant = self.en_passant.map(|(row, col)| Square::new(row, col));
        board.fullmove_number = self.turn_number;
        board.zobrist_key = board.recompute_zobrist_key();
        Ok(board)
    }
}

pub fn save(path: impl AsRef<Path>, save_file: &SaveFile) -> Result<()> {
    let json = serde_json::to_string_pretty(save_file)?;
    fs::write(path, json)?;
    Ok(())
}

pub fn load(path: impl AsRef<Path>) -> Result<SaveFile> {
    let json = fs::read_to_string(path)?;
    let save_file = serde_json::from_str(&json)?;
    Ok(save_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defs::PieceKind;

    fn settings() -> AiSettings {
        AiSettings { ai_depth: 6, ai_time_limit: 5.0, player_one: "human".into(), player_two: "ai".into() }
    }

    #[test]
    fn round_trips_the_start_position() {
        let board = Board::start_position();
        let save_file = SaveFile::from_board(&board, settings());
        let restored = save_file.to_board().unwrap();
        assert_eq!(restored.piece_at(Square::new(7, 4)), Some(Piece::new(Color::White, PieceKind::King)));
        assert_eq!(restored.castle_rights, board.castle_rights);
        assert_eq!(restored.side_to_move, Color::White);
        assert_eq!(restored.zobrist_key, board.recompute_zobrist_key());
    }

    #[test]
    fn empty_squares_use_the_dash_dash_tag() {
        let board = Board::start_position();
        let save_file = SaveFile::from_board(&board, settings());
        assert_eq!(save_file.board[3][3], "--");
        assert_eq!(save_file.board[7][4], "wK");
    }

    #[test]
    fn rejects_an_unknown_tag_on_load() {
        let mut save_file = SaveFile::from_board(&Board::start_position(), settings());
        save_file.board[3][3] = "zz".to_string();
        assert!(save_file.to_board().is_err());
    }

    #[test]
    fn rejects_a_missing_king_on_load() {
        let mut save_file = SaveFile::from_board(&Board::start_position(), settings());
        save_file.board[7][4] = "--".to_string();
        assert!(save_file.to_board().is_err());
    }

    #[test]
    fn rejects_a_second_king_of_the_same_color_on_load() {
        let mut save_file = SaveFile::from_board(&Board::start_position(), settings());
        save_file.board[4][4] = "wK".to_string();
        assert!(save_file.to_board().is_err());
    }

    #[test]
    fn save_then_load_round_trips_through_a_temp_file() {
        let board = Board::start_position();
        let save_file = SaveFile::from_board(&board, settings());
        let path = std::env::temp_dir().join("zugzwang_persistence_test.json");
        save(&path, &save_file).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded.turn_number, save_file.turn_number);
        let _ = std::fs::remove_file(&path);
    }
}
