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

// The driver: owns the position and a transposition table, consults the
// book before dispatching to search, and applies whatever move comes
// back. No UCI/XBoard dispatch here; this repo has no protocol surface.

pub mod defs;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::book::{BookOracle, NoBook};
use crate::config::{AiConfig, Difficulty};
use crate::board::Board;
use crate::movegen::defs::{Move, MoveType};
use crate::movegen::{generate_legal_moves, MoveList};
use crate::search::defs::SearchParams;
use crate::search::Search;
use crate::transposition::TranspositionTable;

use defs::{ErrFatal, MoveSource};

pub struct Driver {
    board: Board,
    config: AiConfig,
    book: Box<dyn BookOracle + Send>,
    tt: TranspositionTable,
    last_opening_name: Option<String>,
    cancel: Arc<AtomicBool>,
}

impl Driver {
    pub fn new(board: Board, config: AiConfig) -> Self {
        let tt = TranspositionTable::with_megabytes(config.tt_megabytes);
        Self {
            board,
            config,
            book: Box::new(NoBook),
            tt,
            last_opening_name: None,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_book(mut self, book: Box<dyn BookOracle + Send>) -> Self {
        self.book = book;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Rebuilds the search configuration for a new difficulty. The AI
    /// config is an immutable value per search; changing difficulty
    /// replaces it rather than mutating fields in place.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.config = AiConfig::for_difficulty(difficulty);
    }

    /// A handle the caller can flip to cancel a search in progress.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Finds and plays the engine's next move. Returns `None` only when
    /// the side to move has no legal moves at all (checkmate or
    /// stalemate); the caller distinguishes the two by inspecting
    /// whether the side to move was in check.
    pub fn play_next_move(&mut self) -> Option<(Move, MoveSource)> {
        let (legal_moves, in_check) = generate_legal_moves(&self.board, MoveType::All);
        if legal_moves.is_empty() {
            tracing::info!(in_check, "no legal moves; game over");
            return None;
        }

        let chosen = self
            .consult_book(&legal_moves)
            .unwrap_or_else(|| (self.search(&legal_moves), MoveSource::Search));

        self.board.make(chosen.0);
        Some(chosen)
    }

    fn consult_book(&mut self, legal_moves: &MoveList) -> Option<(Move, MoveSource)> {
        if !self.config.use_opening_book {
            return None;
        }

        let book_move = self.book.probe(&self.board)?;
        let matched = (0..legal_moves.len())
            .map(|i| legal_moves.get_move(i))
            .find(|m| m.from == book_move.from && m.to == book_move.to)?;

        if self.last_opening_name.as_deref() != Some(book_move.name.as_str()) {
            tracing::info!(opening = %book_move.name, "now in opening book line");
            self.last_opening_name = Some(book_move.name.clone());
        }

        Some((matched, MoveSource::Book(book_move.name)))
    }

    fn search(&mut self, legal_moves: &MoveList) -> Move {
        let params = SearchParams::from(&self.config);
        let tt = std::mem::replace(&mut self.tt, TranspositionTable::with_megabytes(1));
        let cancel = Arc::clone(&self.cancel);
        let (reports, handle) = Search::go(self.board.clone(), params, tt, cancel);

        for summary in reports.iter() {
            tracing::info!(
                depth = summary.depth,
                score = summary.score,
                nodes = summary.nodes,
                nps = Self::nodes_per_second(summary.nodes, summary.time),
                "completed search depth"
            );
        }

        let (result, tt) = handle.join().expect(ErrFatal::THREAD);
        self.tt = tt;

        result.best_move.unwrap_or_else(|| Self::random_legal_move(legal_moves))
    }

    /// Last resort when a search is cancelled before completing even its
    /// first depth: the engine must still return some legal move.
    fn random_legal_move(legal_moves: &MoveList) -> Move {
        let index = rand::thread_rng().gen_range(0..legal_moves.len());
        legal_moves.get_move(index)
    }

    fn nodes_per_second(nodes: u64, elapsed: Duration) -> u64 {
        let seconds = elapsed.as_secs_f64();
        if seconds > 0.0 {
            (nodes as f64 / seconds) as u64
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen;

    #[test]
    fn plays_the_only_mating_move() {
        let mut board = Board::empty();
        fen::read("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - -", &mut board).unwrap();

        let config = AiConfig { max_depth: 4, use_opening_book: false, ..AiConfig::default() };
        let mut driver = Driver::new(board, config);
        let (mv, source) = driver.play_next_move().expect("a legal move exists");

        assert_eq!(source, MoveSource::Search);
        assert_eq!(mv.from, crate::defs::Square::new(7, 4));
        assert_eq!(mv.to, crate::defs::Square::new(0, 4));
    }

    #[test]
    fn stalemate_position_has_no_legal_moves() {
        let mut board = Board::empty();
        fen::read("7k/5Q2/6K1/8/8/8/8/8 b - -", &mut board).unwrap();
        let config = AiConfig { max_depth: 2, use_opening_book: false, ..AiConfig::default() };
        let mut driver = Driver::new(board, config);
        assert!(driver.play_next_move().is_none());
    }
}
