use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::search::schedule::{DepthSchedule, DEFAULT_NODE_BUDGET};

/// Engine settings. Every field has a default, so a JSON file only needs the
/// fields it changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Node visits per move computation before the depth is capped.
    pub node_budget: u64,
    pub schedule: DepthSchedule,
    /// Allow fork-join at the schedule's fan-out ply. When false every search is serial.
    pub parallel: bool,
    /// Seed for tie-breaking between equal moves; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { node_budget: DEFAULT_NODE_BUDGET, schedule: DepthSchedule::default(), parallel: true, seed: None }
    }
}

impl EngineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let f = File::open(&path).with_context(|| format!("open engine config: {}", path.as_ref().display()))?;
        let cfg: EngineConfig = serde_json::from_reader(BufReader::new(f)).context("parse engine config")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.node_budget == 0 {
            return Err(EngineError::Config("node budget must be positive".to_string()));
        }
        self.schedule.validate()
    }

    /// Single plan for the whole game, mostly for tests and tools.
    pub fn fixed_depth(depth: u32, fan_out: Option<u32>) -> Self {
        Self { schedule: DepthSchedule::fixed(depth, fan_out), ..Self::default() }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}
