use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::board::{Side, Snapshot, Square};
use crate::config::EngineConfig;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::search::schedule::DepthSchedule;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Opponent {
    Engine,
    Random,
}

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_plies: usize,
    pub opponent: Opponent,
    /// Fixed search depth for every move; the default schedule when unset.
    pub depth: Option<u32>,
    pub fan_out: Option<u32>,
    pub node_budget: u64,
    pub seed: u64,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 1,
            max_plies: 128,
            opponent: Opponent::Random,
            depth: Some(3),
            fan_out: None,
            node_budget: crate::search::schedule::DEFAULT_NODE_BUDGET,
            seed: 42,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Plies in order, black first: a square like `d3`, or `pass`.
    pub moves: Vec<String>,
    /// Side played by the engine against a random opponent; `None` for engine vs engine.
    pub engine_side: Option<Side>,
    pub black_discs: usize,
    pub white_discs: usize,
    /// Disc difference from black's perspective.
    pub result: i32,
    pub finished: bool,
}

impl SelfPlayParams {
    fn engine_config(&self, game_index: usize, side: Side) -> EngineConfig {
        let schedule = match self.depth {
            Some(d) => DepthSchedule::fixed(d, self.fan_out),
            None => DepthSchedule::default(),
        };
        let salt = ((game_index as u64) << 1) | (side == Side::White) as u64;
        EngineConfig { node_budget: self.node_budget, schedule, parallel: true, seed: Some(self.seed ^ salt) }
    }
}

enum Player {
    Engine(Box<Engine>),
    Random(SmallRng),
}

impl Player {
    fn choose(&mut self, snapshot: &Snapshot, side: Side) -> Result<Option<Square>, EngineError> {
        match self {
            Player::Engine(e) => e.compute_move(snapshot, side),
            Player::Random(rng) => {
                let legal = snapshot.legal_moves(side);
                if legal.is_empty() { return Ok(None); }
                Ok(Some(legal[rng.gen_range(0..legal.len())]))
            }
        }
    }
}

/// Plays one game from the standard start. Against a random opponent the
/// engine takes black in even games and white in odd ones.
pub fn play_game(params: &SelfPlayParams, game_index: usize) -> Result<GameRecord, EngineError> {
    let engine_side = match params.opponent {
        Opponent::Engine => None,
        Opponent::Random => Some(if game_index % 2 == 0 { Side::Black } else { Side::White }),
    };
    let make = |side: Side| -> Player {
        if engine_side.map_or(true, |s| s == side) {
            Player::Engine(Box::new(Engine::new(params.engine_config(game_index, side))))
        } else {
            Player::Random(SmallRng::seed_from_u64(params.seed.wrapping_add(game_index as u64)))
        }
    };
    let mut black = make(Side::Black);
    let mut white = make(Side::White);

    let mut snapshot = Snapshot::start();
    let mut side = Side::Black;
    let mut moves = Vec::new();
    let mut finished = false;
    while moves.len() < params.max_plies {
        if snapshot.legal_moves(side).is_empty() && snapshot.legal_moves(side.opponent()).is_empty() {
            finished = true;
            break;
        }
        let player = if side == Side::Black { &mut black } else { &mut white };
        match player.choose(&snapshot, side)? {
            Some(sq) => {
                snapshot = snapshot.play(side, sq)?;
                moves.push(sq.to_string());
            }
            None => moves.push("pass".to_string()),
        }
        side = side.opponent();
    }

    let black_discs = snapshot.count(Side::Black);
    let white_discs = snapshot.count(Side::White);
    Ok(GameRecord {
        moves,
        engine_side,
        black_discs,
        white_discs,
        result: snapshot.disc_difference(),
        finished,
    })
}

pub fn generate_games(params: &SelfPlayParams) -> Result<Vec<GameRecord>, EngineError> {
    (0..params.games).map(|gi| play_game(params, gi)).collect()
}

/// Replays a record's moves from the start and returns the final position.
pub fn replay(record: &GameRecord) -> Result<Snapshot, EngineError> {
    let mut snapshot = Snapshot::start();
    let mut side = Side::Black;
    for mv in &record.moves {
        if mv != "pass" {
            snapshot = snapshot.play(side, mv.parse()?)?;
        }
        side = side.opponent();
    }
    Ok(snapshot)
}

/// Writes one JSON object per line.
pub fn write_records<P: AsRef<Path>>(games: &[GameRecord], path: P) -> Result<()> {
    if let Some(dir) = path.as_ref().parent() {
        if !dir.as_os_str().is_empty() { create_dir_all(dir)?; }
    }
    let f = File::create(&path).with_context(|| format!("create {}", path.as_ref().display()))?;
    let mut w = BufWriter::new(f);
    for g in games {
        serde_json::to_writer(&mut w, g)?;
        w.write_all(b"\n")?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_records<P: AsRef<Path>>(path: P) -> Result<Vec<GameRecord>> {
    let f = File::open(&path).with_context(|| format!("open {}", path.as_ref().display()))?;
    let mut out = Vec::new();
    for (i, line) in BufReader::new(f).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let rec = serde_json::from_str(&line).with_context(|| format!("parse record on line {}", i + 1))?;
        out.push(rec);
    }
    Ok(out)
}
