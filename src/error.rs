use crate::board::{Side, Square};
use crate::search::tree::Ply;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EngineError {
    /// Own and rival masks share at least one cell.
    #[error("disc masks overlap at {0:#018x}")]
    OverlappingMasks(u64),

    /// A node's children were generated a second time.
    #[error("node reached by {0} was expanded twice")]
    Reexpansion(Ply),

    /// Growing a node's children list failed.
    #[error("failed to allocate {0} child nodes")]
    Allocation(usize),

    #[error("illegal move {square} for {side}")]
    IllegalMove { side: Side, square: Square },

    #[error("invalid snapshot: {0}")]
    Snapshot(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
