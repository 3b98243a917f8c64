//! Bitboard position, coordinates and the host-facing snapshot.
//!
//! Cells are numbered row-major: `index = y * 8 + x`, bit 0 is (x 0, y 0).

pub mod movegen;
pub mod snapshot;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub use snapshot::{Cell, Snapshot};

pub const BOARD_SIZE: u8 = 8;

/// A player colour as the host sees it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Black,
    White,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    pub fn cell(self) -> Cell {
        match self {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => write!(f, "black"),
            Side::White => write!(f, "white"),
        }
    }
}

impl FromStr for Side {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "b" | "black" => Ok(Side::Black),
            "w" | "white" => Ok(Side::White),
            other => Err(EngineError::Snapshot(format!("unknown side '{other}'"))),
        }
    }
}

/// A cell coordinate. Displays as `a1`..`h8` (column letter is `x`, row number is `y + 1`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    pub fn new(x: u8, y: u8) -> Option<Square> {
        if x < BOARD_SIZE && y < BOARD_SIZE { Some(Square(y * BOARD_SIZE + x)) } else { None }
    }

    pub fn from_index(index: u8) -> Option<Square> {
        if index < 64 { Some(Square(index)) } else { None }
    }

    pub fn x(self) -> u8 { self.0 % BOARD_SIZE }
    pub fn y(self) -> u8 { self.0 / BOARD_SIZE }
    pub fn index(self) -> usize { self.0 as usize }
    pub fn bit(self) -> u64 { 1u64 << self.0 }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.x()) as char, self.y() + 1)
    }
}

impl FromStr for Square {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(EngineError::Snapshot(format!("bad square '{s}'")));
        }
        let col = bytes[0].to_ascii_lowercase();
        let row = bytes[1];
        if !(b'a'..=b'h').contains(&col) || !(b'1'..=b'8').contains(&row) {
            return Err(EngineError::Snapshot(format!("bad square '{s}'")));
        }
        Ok(Square((row - b'1') * BOARD_SIZE + (col - b'a')))
    }
}

/// Two disjoint disc masks.
///
/// `own` holds the discs of the side that produced this position (it made the
/// last move), `rival` the discs of the side to move.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    own: u64,
    rival: u64,
}

impl Board {
    pub fn new(own: u64, rival: u64) -> Result<Board, EngineError> {
        let overlap = own & rival;
        if overlap != 0 {
            return Err(EngineError::OverlappingMasks(overlap));
        }
        Ok(Board { own, rival })
    }

    /// Builds a board the generator has already proven disjoint.
    pub(crate) fn from_masks_unchecked(own: u64, rival: u64) -> Board {
        debug_assert_eq!(own & rival, 0);
        Board { own, rival }
    }

    pub fn empty() -> Board { Board::default() }

    pub fn own(&self) -> u64 { self.own }
    pub fn rival(&self) -> u64 { self.rival }
    pub fn occupied(&self) -> u64 { self.own | self.rival }
    pub fn vacant(&self) -> u64 { !self.occupied() }
    pub fn is_empty(&self) -> bool { self.occupied() == 0 }

    /// Disc counts as `(own, rival)`.
    pub fn disc_counts(&self) -> (u32, u32) {
        (self.own.count_ones(), self.rival.count_ones())
    }

    /// Same discs, other side to move. This is the position after a pass.
    pub fn swapped(&self) -> Board {
        Board { own: self.rival, rival: self.own }
    }

    /// Reads a host snapshot where `to_move` is about to play.
    pub fn from_snapshot(snapshot: &Snapshot, to_move: Side) -> Board {
        let mut own = 0u64;
        let mut rival = 0u64;
        for (index, cell) in snapshot.cells().enumerate() {
            match cell {
                Cell::Empty => {}
                c if c == to_move.cell() => rival |= 1u64 << index,
                _ => own |= 1u64 << index,
            }
        }
        Board { own, rival }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("own", &format_args!("{:#018x}", self.own))
            .field("rival", &format_args!("{:#018x}", self.rival))
            .finish()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..BOARD_SIZE {
            for x in 0..BOARD_SIZE {
                let bit = 1u64 << (y * BOARD_SIZE + x);
                let c = if self.own & bit != 0 { 'X' } else if self.rival & bit != 0 { 'O' } else { '-' };
                write!(f, "{c}")?;
                if x + 1 < BOARD_SIZE { write!(f, " ")?; }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_algebraic_round_trip() {
        let sq = Square::new(3, 2).unwrap();
        assert_eq!(sq.to_string(), "d3");
        assert_eq!("d3".parse::<Square>().unwrap(), sq);
        assert_eq!(sq.index(), 19);
        assert!("i9".parse::<Square>().is_err());
        assert!(Square::new(8, 0).is_none());
    }

    #[test]
    fn overlapping_masks_are_rejected() {
        assert_eq!(Board::new(0b11, 0b10), Err(EngineError::OverlappingMasks(0b10)));
        assert!(Board::new(0b01, 0b10).is_ok());
    }

    #[test]
    fn snapshot_translation_puts_mover_in_rival() {
        let snap = Snapshot::start();
        let b = Board::from_snapshot(&snap, Side::Black);
        let black = (1u64 << 28) | (1u64 << 35);
        let white = (1u64 << 27) | (1u64 << 36);
        assert_eq!(b.rival(), black);
        assert_eq!(b.own(), white);
        assert_eq!(b.swapped(), Board::from_snapshot(&snap, Side::White));
    }
}
