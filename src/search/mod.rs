pub mod alphabeta;
pub mod eval;
pub mod schedule;
pub mod select;
pub mod tree;
