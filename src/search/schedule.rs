use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Default cap on node visits per move computation.
pub const DEFAULT_NODE_BUDGET: u64 = 15_000_000;

/// Depth and fan-out for one move computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchPlan {
    pub depth: u32,
    /// Ply at which children are searched concurrently; `None` searches serially.
    pub fan_out: Option<u32>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleStep {
    /// Applies while fewer than this many tiles are placed.
    pub below: u32,
    pub plan: SearchPlan,
}

/// Maps game progress (tiles placed) to a search plan. Branching shrinks
/// toward the endgame, so later steps search deeper.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthSchedule {
    pub steps: Vec<ScheduleStep>,
    /// Plan once every step's threshold has been passed.
    pub last: SearchPlan,
}

impl Default for DepthSchedule {
    fn default() -> Self {
        let step = |below, depth, fan_out| ScheduleStep { below, plan: SearchPlan { depth, fan_out } };
        Self {
            steps: vec![
                step(25, 3, None),
                step(30, 5, Some(1)),
                step(35, 6, Some(3)),
                step(40, 7, Some(3)),
                step(45, 7, Some(3)),
                step(50, 7, Some(3)),
            ],
            last: SearchPlan { depth: 8, fan_out: Some(4) },
        }
    }
}

impl DepthSchedule {
    /// The same plan for the whole game.
    pub fn fixed(depth: u32, fan_out: Option<u32>) -> Self {
        Self { steps: Vec::new(), last: SearchPlan { depth, fan_out } }
    }

    pub fn plan(&self, tiles_placed: u32) -> SearchPlan {
        self.steps
            .iter()
            .find(|s| tiles_placed < s.below)
            .map(|s| s.plan)
            .unwrap_or(self.last)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        let mut prev = 0u32;
        for s in &self.steps {
            if s.below <= prev {
                return Err(EngineError::Config(format!("schedule thresholds must increase (at {})", s.below)));
            }
            prev = s.below;
        }
        for plan in self.steps.iter().map(|s| &s.plan).chain(std::iter::once(&self.last)) {
            if plan.depth == 0 {
                return Err(EngineError::Config("search depth must be at least 1".to_string()));
            }
            if let Some(f) = plan.fan_out {
                if f >= plan.depth {
                    return Err(EngineError::Config(format!("fan-out ply {f} must be below depth {}", plan.depth)));
                }
            }
        }
        Ok(())
    }
}
