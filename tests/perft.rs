// Integration-level perft check: the generator must reproduce the
// well-known node counts from the standard starting position. These live
// here rather than alongside `src/misc/perft.rs` because depth 4-5 take
// long enough that they don't belong in every unit-test run, and because
// exercising the crate through its public surface is what `tests/` is for.

use zugzwang::board::Board;
use zugzwang::misc::perft::perft;

#[test]
fn perft_depth_1_matches_known_count() {
    let mut board = Board::start_position();
    assert_eq!(perft(&mut board, 1), 20);
}

#[test]
fn perft_depth_2_matches_known_count() {
    let mut board = Board::start_position();
    assert_eq!(perft(&mut board, 2), 400);
}

#[test]
fn perft_depth_3_matches_known_count() {
    let mut board = Board::start_position();
    assert_eq!(perft(&mut board, 3), 8_902);
}

#[test]
fn perft_depth_4_matches_known_count() {
    let mut board = Board::start_position();
    assert_eq!(perft(&mut board, 4), 197_281);
}

#[test]
#[ignore = "several seconds; run explicitly with `cargo test -- --ignored`"]
fn perft_depth_5_matches_known_count() {
    let mut board = Board::start_position();
    assert_eq!(perft(&mut board, 5), 4_865_609);
}
