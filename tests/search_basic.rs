use revbot::board::movegen::{generate, has_legal_move};
use revbot::search::alphabeta::{SearchParams, Searcher};
use revbot::search::eval::terminal_worst_branch;
use revbot::search::tree::{Node, Ply};
use revbot::{Board, Side, Snapshot};

fn is_over(b: &Board) -> bool {
    !has_legal_move(b) && !has_legal_move(&b.swapped())
}

/// Exhaustive worst branch without pruning.
fn reference(b: &Board, depth: u32) -> i32 {
    if is_over(b) { return terminal_worst_branch(b); }
    if depth == 0 { return 0; }
    let moves = generate(b);
    let children: Vec<(i32, Board)> = if moves.is_empty() {
        vec![(0, b.swapped())]
    } else {
        moves.iter().map(|p| (p.delta, p.board)).collect()
    };
    children
        .iter()
        .map(|(value, child)| {
            let value = if is_over(child) { 0 } else { *value };
            value - reference(child, depth - 1)
        })
        .max()
        .unwrap_or(0)
}

fn unlimited(depth: u32, fan_out: Option<u32>) -> SearchParams {
    SearchParams { depth, fan_out, node_budget: u64::MAX }
}

#[test]
fn pruned_search_matches_exhaustive_from_start() {
    let b = Snapshot::start().to_board(Side::Black);
    for depth in 1..=4 {
        let mut root = Node::root(b);
        let stats = Searcher::new(unlimited(depth, None)).run(&mut root).unwrap();
        assert!(!stats.truncated);
        assert_eq!(root.worst_branch(), reference(&b, depth), "depth {depth}");
    }
}

#[test]
fn best_children_carry_exact_scores() {
    let b = Snapshot::start().to_board(Side::Black);
    let mut root = Node::root(b);
    Searcher::new(unlimited(3, None)).run(&mut root).unwrap();
    let best = root.best_children();
    assert!(!best.is_empty());
    for i in best {
        let child = &root.children()[i];
        assert_eq!(child.score(), child.value() - reference(child.board(), 2));
        assert_eq!(child.score(), root.worst_branch());
    }
}

#[test]
fn root_with_no_placements_has_a_single_pass() {
    // White to move cannot flank the edge disc on a1.
    let mut s = Snapshot::empty();
    s.set("a1".parse().unwrap(), revbot::Cell::Black);
    s.set("b1".parse().unwrap(), revbot::Cell::White);
    let mut root = Node::root(s.to_board(Side::White));
    Searcher::new(unlimited(2, None)).run(&mut root).unwrap();
    assert_eq!(root.children().len(), 1);
    assert_eq!(root.children()[0].ply(), Ply::Pass);
    assert_eq!(root.legal_move_count(), 0);
}

#[test]
fn finished_game_is_terminal() {
    let mut s = Snapshot::empty();
    s.set("a1".parse().unwrap(), revbot::Cell::Black);
    s.set("h8".parse().unwrap(), revbot::Cell::White);
    s.set("h7".parse().unwrap(), revbot::Cell::White);
    let b = s.to_board(Side::Black);
    let mut root = Node::root(b);
    let stats = Searcher::new(unlimited(3, None)).run(&mut root).unwrap();
    assert!(root.is_terminal());
    assert_eq!(stats.visited, 0);
    // White moved last and holds more discs.
    assert_eq!(root.worst_branch(), revbot::search::eval::WIN_BRANCH);
    assert_eq!(root.worst_branch(), terminal_worst_branch(&b));
}

#[test]
fn budget_cap_lowers_effective_depth() {
    let b = Snapshot::start().to_board(Side::Black);
    let mut root = Node::root(b);
    let stats = Searcher::new(SearchParams { depth: 6, fan_out: None, node_budget: 100 }).run(&mut root).unwrap();
    assert!(stats.truncated);
    assert!(stats.effective_depth < 6);
    assert!(stats.visited > 100);
}
