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

// Iterative-deepening driver. Runs on a background thread, reporting one
// `SearchSummary` per completed depth over a crossbeam channel while the
// caller waits on the join handle for the final result. There is no
// long-lived control channel here (no UCI `stop`/`ponderhit` traffic to
// answer) — a single search either runs to `max_depth`, finds a mate, or
// is cut short by the shared cancellation flag, then the thread exits.

mod alpha_beta;
pub mod defs;
mod qsearch;
mod sorting;
mod utils;

use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Instant;

use crossbeam_channel::{Receiver, Sender};

use crate::board::Board;
use crate::transposition::TranspositionTable;

use alpha_beta::root_search;
use defs::{
    is_mate_score, SearchClock, SearchParams, SearchRefs, SearchResult, SearchStats,
    SearchSummary, SearchTables, SearchTerminate,
};

pub use utils::is_draw;

pub struct Search;

impl Search {
    /// Spawns the search thread and returns immediately with a summary
    /// receiver (one message per completed depth) and a join handle that
    /// yields the final result plus the transposition table, handed
    /// back so the driver can keep reusing it across moves.
    pub fn go(
        mut board: Board,
        params: SearchParams,
        mut tt: TranspositionTable,
        cancel: Arc<AtomicBool>,
    ) -> (Receiver<SearchSummary>, JoinHandle<(SearchResult, TranspositionTable)>) {
        let (report_tx, report_rx): (Sender<SearchSummary>, Receiver<SearchSummary>) =
            crossbeam_channel::unbounded();

        let handle = thread::spawn(move || {
            let mut tables = SearchTables::new();
            let mut stats = SearchStats::default();
            let clock = SearchClock::new(params.time_limit, cancel);
            let start = Instant::now();

            tt.new_search();

            let mut best_move = None;
            let mut best_score = 0;
            let mut depth_completed = 0;
            let mut depth = 1;

            while depth <= params.max_depth && !clock.should_stop() {
                let (root_move, score) = {
                    let mut refs = SearchRefs {
                        params: &params,
                        tt: &mut tt,
                        tables: &mut tables,
                        stats: &mut stats,
                        clock: &clock,
                    };
                    root_search(depth, &mut board, &mut refs)
                };

                // A depth cut short by the clock produces a score that
                // doesn't reflect a full search; only the root move found
                // by a completed depth is trustworthy.
                if clock.should_stop() && depth > 1 {
                    break;
                }

                best_move = root_move.or(best_move);
                best_score = score;
                depth_completed = depth;

                let summary = SearchSummary {
                    depth,
                    score,
                    nodes: stats.nodes,
                    time: start.elapsed(),
                    best_move,
                };
                let _ = report_tx.send(summary);

                if is_mate_score(score) {
                    break;
                }
                depth += 1;
            }

            let terminate = if clock.should_stop() {
                SearchTerminate::Cancelled
            } else {
                SearchTerminate::Completed
            };

            let result = SearchResult {
                best_move,
                score: best_score,
                depth_completed,
                nodes: stats.nodes,
                terminate,
            };

            (result, tt)
        });

        (report_rx, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fen;
    use crate::config::AiConfig;

    #[test]
    fn finds_the_only_legal_mating_move() {
        let mut board = Board::empty();
        fen::read("6k1/5ppp/8/8/8/8/5PPP/4R1K1 w - -", &mut board).unwrap();

        let config = AiConfig { max_depth: 4, ..AiConfig::default() };
        let params = SearchParams::from(&config);
        let tt = TranspositionTable::with_megabytes(1);
        let cancel = Arc::new(AtomicBool::new(false));

        let (reports, handle) = Search::go(board, params, tt, cancel);
        while reports.recv().is_ok() {}
        let (result, _tt) = handle.join().unwrap();

        assert!(result.best_move.is_some());
        assert_eq!(result.terminate, SearchTerminate::Completed);
        assert!(is_mate_score(result.score));
    }
}
