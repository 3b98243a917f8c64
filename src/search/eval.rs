use crate::board::Board;

/// Positional weight per cell, row-major. Corners are neutral, the cells that
/// give a corner away are heavily penalised.
#[rustfmt::skip]
pub const WEIGHTS: [i32; 64] = [
      1, -30,   1,  -1,  -1,   1, -30,   1,
    -30, -30,   0,   0,   0,   0, -30, -30,
      1,   0,   0,   0,   0,   0,   0,   1,
     -1,   0,   0,   0,   0,   0,   0,  -1,
     -1,   0,   0,   0,   0,   0,   0,  -1,
      1,   0,   0,   0,   0,   0,   0,   1,
    -30, -30,   0,   0,   0,   0, -30, -30,
      1, -30,   1,  -1,  -1,   1, -30,   1,
];

// Terminal scoring, expressed as the worst branch of the finished position
// from the perspective of the side that moved into it.
pub const LOSS_BRANCH: i32 = i16::MAX as i32 / 8;
pub const WIN_BRANCH: i32 = i16::MIN as i32 / 8;
pub const TIE_BRANCH: i32 = -10;

/// Value of the placed disc itself: one tile plus its cell weight.
pub fn placement_value(index: usize) -> i32 {
    1 + WEIGHTS[index]
}

/// Sum of the weights of one flipped run.
pub fn run_value(run: u64) -> i32 {
    let mut bits = run;
    let mut sum = 0;
    while bits != 0 {
        sum += WEIGHTS[bits.trailing_zeros() as usize];
        bits &= bits - 1;
    }
    sum
}

/// Worst branch of a finished game, judged by final disc counts.
pub fn terminal_worst_branch(board: &Board) -> i32 {
    let (own, rival) = board.disc_counts();
    match own.cmp(&rival) {
        std::cmp::Ordering::Less => LOSS_BRANCH,
        std::cmp::Ordering::Greater => WIN_BRANCH,
        std::cmp::Ordering::Equal => TIE_BRANCH,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_symmetric() {
        for y in 0..8 {
            for x in 0..8 {
                let w = WEIGHTS[y * 8 + x];
                assert_eq!(w, WEIGHTS[y * 8 + (7 - x)]);
                assert_eq!(w, WEIGHTS[(7 - y) * 8 + x]);
            }
        }
    }

    #[test]
    fn run_value_sums_weights() {
        // b1 and b2 are both x-squares next to a corner.
        let run = (1u64 << 1) | (1u64 << 9);
        assert_eq!(run_value(run), -60);
        assert_eq!(run_value(0), 0);
        assert_eq!(placement_value(0), 2);
    }

    #[test]
    fn terminal_classes() {
        let lose = Board::new(0b1, 0b110).unwrap();
        let win = Board::new(0b110, 0b1).unwrap();
        let tie = Board::new(0b10, 0b1).unwrap();
        assert_eq!(terminal_worst_branch(&lose), LOSS_BRANCH);
        assert_eq!(terminal_worst_branch(&win), WIN_BRANCH);
        assert_eq!(terminal_worst_branch(&tie), TIE_BRANCH);
        assert!(LOSS_BRANCH > 0 && WIN_BRANCH < TIE_BRANCH);
    }
}
