use revbot::perft::{perft, perft_parallel};
use revbot::{Side, Snapshot};

#[test]
fn perft_startpos_small_depths() {
    let b = Snapshot::start().to_board(Side::Black);
    assert_eq!(perft(&b, 1), 4);
    assert_eq!(perft(&b, 2), 12);
    assert_eq!(perft(&b, 3), 56);
    assert_eq!(perft(&b, 4), 244);
    assert_eq!(perft(&b, 5), 1396);
    assert_eq!(perft(&b, 6), 8200);
}

#[test]
fn perft_root_split_matches_serial() {
    let b = Snapshot::start().to_board(Side::Black);
    assert_eq!(perft_parallel(&b, 7), 55092);
    assert_eq!(perft_parallel(&b, 5), perft(&b, 5));
}

#[test]
fn perft_counts_pass_as_a_ply() {
    // White cannot flank the edge disc on a1; black closes b1 with c1.
    let mut s = Snapshot::empty();
    s.set("a1".parse().unwrap(), revbot::Cell::Black);
    s.set("b1".parse().unwrap(), revbot::Cell::White);
    let b = s.to_board(Side::White);
    assert_eq!(perft(&b, 1), 1);
    assert_eq!(perft(&b, 2), 1);
    // After c1 the board is all black and the game is over.
    assert_eq!(perft(&b, 3), 1);
    assert_eq!(perft(&b, 6), 1);
}
