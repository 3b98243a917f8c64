//! Legal placements and the positions they produce.
//!
//! The side to move is `board.rival()`; every produced child has the mover in
//! `own` and the waiting side in `rival`.

use super::{Board, Square, BOARD_SIZE};
use crate::search::eval;

const FILE_A: u64 = 0x0101_0101_0101_0101;
const FILE_H: u64 = 0x8080_8080_8080_8080;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Direction {
    pub dx: i8,
    pub dy: i8,
}

pub const DIRECTIONS: [Direction; 8] = [
    Direction { dx: 1, dy: 0 },
    Direction { dx: -1, dy: 0 },
    Direction { dx: 0, dy: 1 },
    Direction { dx: 0, dy: -1 },
    Direction { dx: 1, dy: 1 },
    Direction { dx: -1, dy: -1 },
    Direction { dx: -1, dy: 1 },
    Direction { dx: 1, dy: -1 },
];

impl Direction {
    fn offset(self) -> i8 { self.dy * BOARD_SIZE as i8 + self.dx }

    /// Cells whose neighbour in this direction is in `bits`. Row wrap is masked out.
    pub fn neighbours_of(self, bits: u64) -> u64 {
        let k = self.offset();
        let shifted = if k > 0 { bits >> k } else { bits << -k };
        match self.dx {
            1 => shifted & !FILE_H,
            -1 => shifted & !FILE_A,
            _ => shifted,
        }
    }

    /// A run needs one opponent cell and one closing cell, so the start must
    /// leave room for two steps.
    fn has_room(self, x: i8, y: i8) -> bool {
        let (ex, ey) = (x + 2 * self.dx, y + 2 * self.dy);
        (0..BOARD_SIZE as i8).contains(&ex) && (0..BOARD_SIZE as i8).contains(&ey)
    }
}

/// One legal move: where the disc goes, the resulting position and its score delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    pub square: Square,
    pub board: Board,
    pub delta: i32,
    /// Every cell that changed owner, excluding the placed disc.
    pub flips: u64,
}

/// Per-direction masks of empty cells adjacent to a waiting-side disc.
pub fn adjacency_masks(board: &Board) -> [u64; 8] {
    let waiting = board.own();
    let vacant = board.vacant();
    let mut masks = [0u64; 8];
    for (mask, dir) in masks.iter_mut().zip(DIRECTIONS) {
        *mask = vacant & dir.neighbours_of(waiting);
    }
    masks
}

/// Walks from `(x, y)` along `dir` and returns the run of waiting-side discs
/// closed by a mover disc, if there is one.
fn probe(mover: u64, waiting: u64, x: i8, y: i8, dir: Direction) -> Option<u64> {
    let mut run = 0u64;
    let (mut cx, mut cy) = (x + dir.dx, y + dir.dy);
    while (0..BOARD_SIZE as i8).contains(&cx) && (0..BOARD_SIZE as i8).contains(&cy) {
        let bit = 1u64 << (cy * BOARD_SIZE as i8 + cx);
        if waiting & bit != 0 {
            run |= bit;
        } else if mover & bit != 0 {
            return if run != 0 { Some(run) } else { None };
        } else {
            return None;
        }
        cx += dir.dx;
        cy += dir.dy;
    }
    None
}

/// All legal placements for the side to move, in row-major order.
pub fn generate(board: &Board) -> Vec<Placement> {
    let mover = board.rival();
    let waiting = board.own();
    let adjacency = adjacency_masks(board);
    let mut candidates = adjacency.iter().fold(0u64, |acc, m| acc | m);
    let mut out = Vec::with_capacity(16);

    while candidates != 0 {
        let index = candidates.trailing_zeros() as u8;
        candidates &= candidates - 1;
        let (x, y) = ((index % BOARD_SIZE) as i8, (index / BOARD_SIZE) as i8);

        let mut flips = 0u64;
        let mut delta = eval::placement_value(index as usize);
        for (dir, mask) in DIRECTIONS.iter().zip(adjacency) {
            if mask >> index & 1 == 0 || !dir.has_room(x, y) { continue; }
            if let Some(run) = probe(mover, waiting, x, y, *dir) {
                flips |= run;
                delta += eval::run_value(run);
            }
        }
        if flips == 0 { continue; }

        let placed = 1u64 << index;
        let child = Board::from_masks_unchecked(mover | placed | flips, waiting & !flips);
        if let Some(square) = Square::from_index(index) {
            out.push(Placement { square, board: child, delta, flips });
        }
    }
    out
}

/// Bit set of legal placements for the side to move.
pub fn legal_mask(board: &Board) -> u64 {
    generate(board).iter().fold(0u64, |acc, p| acc | p.square.bit())
}

pub fn has_legal_move(board: &Board) -> bool {
    let mover = board.rival();
    let waiting = board.own();
    let adjacency = adjacency_masks(board);
    for (dir, mask) in DIRECTIONS.iter().zip(adjacency) {
        let mut bits = mask;
        while bits != 0 {
            let index = bits.trailing_zeros() as i8;
            bits &= bits - 1;
            let (x, y) = (index % BOARD_SIZE as i8, index / BOARD_SIZE as i8);
            if dir.has_room(x, y) && probe(mover, waiting, x, y, *dir).is_some() {
                return true;
            }
        }
    }
    false
}
