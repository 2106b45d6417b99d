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

// Thin example binary: a perft benchmark and a self-play demo that lets
// the engine play both sides to the first terminal position. There is no
// UCI/XBoard surface here; this repo carries no protocol layer at all.

use clap::{Parser, Subcommand};
use zugzwang::board::{fen, Board};
use zugzwang::config::{AiConfig, Difficulty};
use zugzwang::engine::Driver;
use zugzwang::misc;

#[derive(Parser)]
#[command(name = "zugzwang", about = "A chess engine core: move generation, evaluation, and search.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Count legal-move leaf nodes from the starting position (or a FEN) to verify the generator.
    Perft {
        /// Maximum depth to benchmark, inclusive.
        #[arg(default_value_t = 5)]
        depth: u8,
        /// Starting position; defaults to the standard opening position.
        #[arg(long)]
        fen: Option<String>,
    },
    /// Let the engine play itself from the starting position until the game ends.
    SelfPlay {
        /// Difficulty level: 1 = easy, 2 = normal, 3 = hard.
        #[arg(default_value_t = 2)]
        difficulty: u8,
        /// Maximum number of plies before giving up.
        #[arg(long, default_value_t = 200)]
        max_plies: u32,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Command::Perft { depth, fen: fen_string } => run_perft(depth, fen_string),
        Command::SelfPlay { difficulty, max_plies } => run_self_play(difficulty, max_plies),
    }
}

fn run_perft(depth: u8, fen_string: Option<String>) {
    let board = match fen_string {
        Some(s) => {
            let mut board = Board::empty();
            if let Err(e) = fen::read(&s, &mut board) {
                eprintln!("invalid FEN: {e}");
                std::process::exit(1);
            }
            board
        }
        None => Board::start_position(),
    };

    misc::perft::run(&board, depth);
}

fn run_self_play(difficulty: u8, max_plies: u32) {
    let config = AiConfig::for_difficulty(Difficulty::from_level(difficulty));
    let mut driver = Driver::new(Board::start_position(), config);

    for ply in 1..=max_plies {
        match driver.play_next_move() {
            Some((mv, source)) => {
                println!("{ply}: {} ({source:?})", mv.as_string());
            }
            None => {
                println!("game over after {} plies", ply - 1);
                return;
            }
        }
    }

    println!("stopped after reaching the ply limit ({max_plies})");
}
