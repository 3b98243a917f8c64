//! The retained game tree.
//!
//! Nodes expand lazily on first visit and keep their children across turns.
//! The tree is strictly owned: committing a move moves one child out and drops
//! the rest of the tree with it.

use std::fmt;

use crate::board::movegen;
use crate::board::{Board, Square};
use crate::error::EngineError;
use crate::search::eval;

/// How a node was reached from its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ply {
    Root,
    Place(Square),
    Pass,
}

impl Ply {
    pub fn square(self) -> Option<Square> {
        match self {
            Ply::Place(sq) => Some(sq),
            Ply::Root | Ply::Pass => None,
        }
    }
}

impl fmt::Display for Ply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ply::Root => write!(f, "root"),
            Ply::Place(sq) => write!(f, "{sq}"),
            Ply::Pass => write!(f, "pass"),
        }
    }
}

#[derive(Debug)]
pub struct Node {
    board: Board,
    ply: Ply,
    pub(crate) value: i32,
    pub(crate) worst_branch: i32,
    children: Option<Vec<Node>>,
}

impl Node {
    pub fn root(board: Board) -> Node {
        Node { board, ply: Ply::Root, value: 0, worst_branch: 0, children: None }
    }

    fn child(board: Board, ply: Ply, value: i32) -> Node {
        Node { board, ply, value, worst_branch: 0, children: None }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn ply(&self) -> Ply { self.ply }
    pub fn value(&self) -> i32 { self.value }
    pub fn worst_branch(&self) -> i32 { self.worst_branch }

    /// Figure used to compare this node against its siblings.
    pub fn score(&self) -> i32 { self.value - self.worst_branch }

    pub fn is_expanded(&self) -> bool { self.children.is_some() }
    pub fn is_terminal(&self) -> bool { matches!(&self.children, Some(c) if c.is_empty()) }

    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        self.children.as_deref_mut().unwrap_or(&mut [])
    }

    /// Number of placements available at this node. A pass is not counted.
    pub fn legal_move_count(&self) -> usize {
        self.children().iter().filter(|c| matches!(c.ply, Ply::Place(_))).count()
    }

    /// Generates the children. Fails if the node was already expanded.
    pub fn expand(&mut self) -> Result<(), EngineError> {
        if self.children.is_some() {
            return Err(EngineError::Reexpansion(self.ply));
        }
        let placements = movegen::generate(&self.board);
        let mut children: Vec<Node> = Vec::new();
        if placements.is_empty() {
            let passed = self.board.swapped();
            if movegen::has_legal_move(&passed) {
                children.try_reserve_exact(1).map_err(|_| EngineError::Allocation(1))?;
                children.push(Node::child(passed, Ply::Pass, 0));
            }
        } else {
            children
                .try_reserve_exact(placements.len())
                .map_err(|_| EngineError::Allocation(placements.len()))?;
            for p in placements {
                let overlap = p.board.own() & p.board.rival();
                if overlap != 0 {
                    return Err(EngineError::OverlappingMasks(overlap));
                }
                children.push(Node::child(p.board, Ply::Place(p.square), p.delta));
            }
        }
        self.children = Some(children);
        Ok(())
    }

    /// Scores a finished game: no value of its own, worst branch from disc counts.
    pub(crate) fn settle_terminal(&mut self) {
        self.value = 0;
        self.worst_branch = eval::terminal_worst_branch(&self.board);
    }

    /// Index of the child whose position equals `board`.
    pub fn find_child(&self, board: &Board) -> Option<usize> {
        self.children().iter().position(|c| c.board == *board)
    }

    /// Indices of all children sharing the highest score.
    pub fn best_children(&self) -> Vec<usize> {
        let mut best = i32::MIN;
        let mut out = Vec::new();
        for (i, c) in self.children().iter().enumerate() {
            let s = c.score();
            if s > best {
                best = s;
                out.clear();
                out.push(i);
            } else if s == best {
                out.push(i);
            }
        }
        out
    }

    /// Replaces this node by its `index`-th child. Every sibling subtree is dropped.
    pub fn promote(&mut self, index: usize) -> bool {
        let Some(mut children) = self.children.take() else { return false };
        if index >= children.len() {
            self.children = Some(children);
            return false;
        }
        *self = children.swap_remove(index);
        true
    }

    /// Nodes reachable from here, this one included.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Side, Snapshot};

    #[test]
    fn expand_once_then_refuse() {
        let mut n = Node::root(Snapshot::start().to_board(Side::Black));
        assert!(!n.is_expanded());
        n.expand().unwrap();
        assert_eq!(n.legal_move_count(), 4);
        assert!(n.children().iter().all(|c| c.worst_branch() == 0 && !c.is_expanded()));
        assert_eq!(n.expand(), Err(EngineError::Reexpansion(Ply::Root)));
    }

    #[test]
    fn promote_keeps_only_chosen_subtree() {
        let mut n = Node::root(Snapshot::start().to_board(Side::Black));
        n.expand().unwrap();
        for c in n.children_mut() { c.expand().unwrap(); }
        let chosen_board = *n.children()[2].board();
        let chosen_size = n.children()[2].node_count();
        assert!(n.promote(2));
        assert_eq!(*n.board(), chosen_board);
        assert_eq!(n.node_count(), chosen_size);
        assert!(!n.promote(99));
    }

    #[test]
    fn isolated_discs_are_terminal() {
        let mut n = Node::root(Board::new(1u64 << 0, 1u64 << 63).unwrap());
        n.expand().unwrap();
        assert!(n.is_terminal());
        assert_eq!(n.legal_move_count(), 0);
    }

    #[test]
    fn no_move_for_mover_yields_single_pass() {
        // Side to move owns b1 and cannot outflank a1 against the edge; after a
        // pass the a1 side can play c1.
        let mut n = Node::root(Board::new(1u64 << 0, 1u64 << 1).unwrap());
        n.expand().unwrap();
        assert_eq!(n.children().len(), 1);
        assert_eq!(n.children()[0].ply(), Ply::Pass);
        assert_eq!(*n.children()[0].board(), n.board().swapped());
        assert_eq!(n.legal_move_count(), 0);
        assert!(!n.is_terminal());
    }
}
