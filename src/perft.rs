// Leaf counting over the move generator. A pass counts as a ply; a finished
// game counts as one leaf wherever it ends.
use rayon::prelude::*;

use crate::board::movegen;
use crate::board::Board;

pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let moves = movegen::generate(board);
    if moves.is_empty() {
        let passed = board.swapped();
        if !movegen::has_legal_move(&passed) { return 1; }
        return perft(&passed, depth - 1);
    }
    if depth == 1 { return moves.len() as u64; }
    moves.iter().map(|p| perft(&p.board, depth - 1)).sum()
}

/// Root-split perft: each root move's subtree is counted on the rayon pool.
pub fn perft_parallel(board: &Board, depth: u32) -> u64 {
    if depth <= 1 { return perft(board, depth); }
    let moves = movegen::generate(board);
    if moves.is_empty() { return perft(board, depth); }
    moves.par_iter().map(|p| perft(&p.board, depth - 1)).sum()
}
