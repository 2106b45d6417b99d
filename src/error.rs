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

use thiserror::Error;

/// Boundary-facing failures. Search and evaluation never raise: they
/// return sentinel scores and fall back gracefully. This enum only covers
/// the seams where a caller can pass bad input or I/O can fail.
#[derive(Error, Debug)]
pub enum Error {
    #[error("FEN string must have four space-separated parts: {0}")]
    FenPartCount(String),

    #[error("FEN: illegal character '{0}' in piece placement")]
    FenIllegalPiece(char),

    #[error("FEN: side to move must be 'w' or 'b', got '{0}'")]
    FenSideToMove(String),

    #[error("FEN: castling rights field is invalid: '{0}'")]
    FenCastlingRights(String),

    #[error("FEN: en-passant target square is invalid: '{0}'")]
    FenEnPassant(String),

    #[error("move {from:?}-{to:?} is not in the current legal move list")]
    IllegalMove { from: crate::defs::Square, to: crate::defs::Square },

    #[error("save file is invalid: {0}")]
    InvalidSave(String),

    #[error("save/load I/O failure")]
    Io(#[from] std::io::Error),

    #[error("save/load (de)serialization failure")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
