use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::movegen;
use super::{Board, Side, Square, BOARD_SIZE};
use crate::error::EngineError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cell {
    #[default]
    Empty,
    Black,
    White,
}

/// The host's view of the board: a fixed grid indexed `[y][x]`.
///
/// Text form is eight rows of `.`, `B` and `W`; whitespace is ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Snapshot {
    rows: [[Cell; 8]; 8],
}

impl Snapshot {
    pub fn empty() -> Snapshot { Snapshot::default() }

    /// Standard opening: d4 and e5 white, e4 and d5 black.
    pub fn start() -> Snapshot {
        let mut s = Snapshot::empty();
        s.rows[3][3] = Cell::White;
        s.rows[3][4] = Cell::Black;
        s.rows[4][3] = Cell::Black;
        s.rows[4][4] = Cell::White;
        s
    }

    pub fn get(&self, square: Square) -> Cell {
        self.rows[square.y() as usize][square.x() as usize]
    }

    pub fn set(&mut self, square: Square, cell: Cell) {
        self.rows[square.y() as usize][square.x() as usize] = cell;
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.rows.iter().flat_map(|row| row.iter().copied())
    }

    pub fn count(&self, side: Side) -> usize {
        self.cells().filter(|&c| c == side.cell()).count()
    }

    /// Engine view with `to_move` about to play.
    pub fn to_board(&self, to_move: Side) -> Board {
        Board::from_snapshot(self, to_move)
    }

    /// Host view of a board whose `own` discs belong to `own_side`.
    pub fn from_board(board: &Board, own_side: Side) -> Snapshot {
        let mut s = Snapshot::empty();
        for index in 0..64u8 {
            let bit = 1u64 << index;
            let cell = if board.own() & bit != 0 {
                own_side.cell()
            } else if board.rival() & bit != 0 {
                own_side.opponent().cell()
            } else {
                Cell::Empty
            };
            if let Some(sq) = Square::from_index(index) { s.set(sq, cell); }
        }
        s
    }

    pub fn legal_moves(&self, side: Side) -> Vec<Square> {
        movegen::generate(&self.to_board(side)).into_iter().map(|p| p.square).collect()
    }

    /// Plays `square` for `side`, flipping every outflanked run.
    pub fn play(&self, side: Side, square: Square) -> Result<Snapshot, EngineError> {
        let chosen = movegen::generate(&self.to_board(side))
            .into_iter()
            .find(|p| p.square == square)
            .ok_or(EngineError::IllegalMove { side, square })?;
        Ok(Snapshot::from_board(&chosen.board, side))
    }

    /// Final disc difference from black's perspective.
    pub fn disc_difference(&self) -> i32 {
        self.count(Side::Black) as i32 - self.count(Side::White) as i32
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in row {
                let c = match cell { Cell::Empty => '.', Cell::Black => 'B', Cell::White => 'W' };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Snapshot {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut snap = Snapshot::empty();
        let mut index = 0u8;
        for ch in s.chars().filter(|c| !c.is_whitespace()) {
            let cell = match ch {
                '.' | '-' => Cell::Empty,
                'B' | 'b' | 'X' | 'x' => Cell::Black,
                'W' | 'w' | 'O' | 'o' => Cell::White,
                other => return Err(EngineError::Snapshot(format!("unexpected character '{other}'"))),
            };
            let sq = Square::from_index(index)
                .ok_or_else(|| EngineError::Snapshot("more than 64 cells".to_string()))?;
            snap.set(sq, cell);
            index += 1;
        }
        if index != BOARD_SIZE * BOARD_SIZE {
            return Err(EngineError::Snapshot(format!("expected 64 cells, found {index}")));
        }
        Ok(snap)
    }
}
