use pretty_assertions::assert_eq;
use revbot::{Cell, Engine, EngineConfig, Side, Snapshot};

fn opening_squares() -> Vec<String> {
    ["d3", "c4", "f5", "e6"].iter().map(|s| s.to_string()).collect()
}

#[test]
fn opening_move_is_one_of_four() {
    let mut e = Engine::new(EngineConfig::default().with_seed(1));
    let mv = e.compute_move(&Snapshot::start(), Side::Black).unwrap().unwrap();
    assert!(opening_squares().contains(&mv.to_string()));
    let stats = e.last_stats().unwrap();
    assert_eq!(stats.requested_depth, 3);
    assert!(!stats.truncated);
}

#[test]
fn finished_game_returns_no_move() {
    let mut s = Snapshot::empty();
    s.set("a1".parse().unwrap(), Cell::Black);
    s.set("h8".parse().unwrap(), Cell::White);
    let mut e = Engine::new(EngineConfig::fixed_depth(3, None).with_seed(2));
    assert_eq!(e.compute_move(&s, Side::Black).unwrap(), None);
    assert_eq!(e.compute_move(&s, Side::White).unwrap(), None);
}

#[test]
fn default_schedule_deepens_late() {
    let cfg = EngineConfig::default();
    assert_eq!(cfg.schedule.plan(5).depth, 3);
    assert_eq!(cfg.schedule.plan(5).fan_out, None);
    assert_eq!(cfg.schedule.plan(50).depth, 8);
    assert_eq!(cfg.schedule.plan(64).depth, 8);
}

#[test]
fn reset_then_search_again() {
    let mut e = Engine::new(EngineConfig::default().with_seed(3));
    e.compute_move(&Snapshot::start(), Side::Black).unwrap();
    e.reset();
    assert_eq!(e.tiles_placed(), 0);
    assert!(!e.root().is_expanded());
    let mv = e.compute_move(&Snapshot::start(), Side::Black).unwrap().unwrap();
    assert!(opening_squares().contains(&mv.to_string()));
}

#[test]
fn tree_follows_the_game_across_turns() {
    let mut e = Engine::new(EngineConfig::fixed_depth(3, None).with_seed(4));
    let mut snap = Snapshot::start();
    let mine = e.compute_move(&snap, Side::Black).unwrap().unwrap();
    snap = snap.play(Side::Black, mine).unwrap();
    assert_eq!(*e.root().board(), snap.to_board(Side::White));
    // The search left the new root expanded with white's replies.
    assert!(e.root().is_expanded());

    let reply = snap.legal_moves(Side::White)[0];
    snap = snap.play(Side::White, reply).unwrap();
    let mine = e.compute_move(&snap, Side::Black).unwrap().unwrap();
    assert_eq!(e.tiles_placed(), 7);
    snap = snap.play(Side::Black, mine).unwrap();
    assert_eq!(*e.root().board(), snap.to_board(Side::White));
}

#[test]
fn forced_pass_advances_through_the_pass_node() {
    // White cannot move; black's only move c1 ends the game.
    let mut s = Snapshot::empty();
    s.set("a1".parse().unwrap(), Cell::Black);
    s.set("b1".parse().unwrap(), Cell::White);
    let mut e = Engine::new(EngineConfig::fixed_depth(2, None).with_seed(5));
    assert_eq!(e.compute_move(&s, Side::White).unwrap(), None);
    assert_eq!(*e.root().board(), s.to_board(Side::Black));

    let s = s.play(Side::Black, "c1".parse().unwrap()).unwrap();
    assert_eq!(e.compute_move(&s, Side::White).unwrap(), None);
}

#[test]
fn serial_config_never_splits() {
    let mut cfg = EngineConfig::fixed_depth(4, Some(1)).with_seed(6);
    cfg.parallel = false;
    let mut e = Engine::new(cfg);
    assert!(e.compute_move(&Snapshot::start(), Side::Black).unwrap().is_some());
}
