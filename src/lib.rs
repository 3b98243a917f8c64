// Reversi engine: bitboard move generation, retained game tree, alpha-beta search
pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod perft;
pub mod protocol;
pub mod search;
pub mod selfplay;

pub use board::{Board, Cell, Side, Snapshot, Square};
pub use config::EngineConfig;
pub use engine::Engine;
pub use error::EngineError;
