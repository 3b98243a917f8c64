use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use revbot::board::movegen::generate;
use revbot::search::alphabeta::{SearchParams, Searcher};
use revbot::search::tree::{Node, Ply};
use revbot::{Board, Side, Snapshot};

fn midgame(seed: u64, plies: usize) -> Board {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut b = Snapshot::start().to_board(Side::Black);
    for _ in 0..plies {
        let moves = generate(&b);
        if moves.is_empty() { break; }
        b = moves[rng.gen_range(0..moves.len())].board;
    }
    b
}

fn best_plies(root: &Node) -> Vec<Ply> {
    root.best_children().iter().map(|&i| root.children()[i].ply()).collect()
}

fn search(b: Board, depth: u32, fan_out: Option<u32>) -> Node {
    let mut root = Node::root(b);
    Searcher::new(SearchParams { depth, fan_out, node_budget: u64::MAX }).run(&mut root).unwrap();
    root
}

#[test]
fn fork_join_picks_the_same_moves_as_serial() {
    for seed in [1u64, 2, 3] {
        let b = midgame(seed, 12);
        let serial = search(b, 4, None);
        for fan_out in [0u32, 1, 2] {
            let split = search(b, 4, Some(fan_out));
            assert_eq!(split.worst_branch(), serial.worst_branch(), "seed {seed} fan_out {fan_out}");
            assert_eq!(best_plies(&split), best_plies(&serial), "seed {seed} fan_out {fan_out}");
        }
    }
}

#[test]
fn fork_join_inside_small_pool() {
    let b = midgame(9, 10);
    let serial = search(b, 4, None);
    let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
    let split = pool.install(|| search(b, 4, Some(1)));
    assert_eq!(best_plies(&split), best_plies(&serial));
}

#[test]
fn fork_join_respects_node_budget() {
    let b = midgame(4, 8);
    let mut root = Node::root(b);
    let stats = Searcher::new(SearchParams { depth: 7, fan_out: Some(1), node_budget: 500 }).run(&mut root).unwrap();
    assert!(stats.truncated);
    assert!(!root.best_children().is_empty());
}
