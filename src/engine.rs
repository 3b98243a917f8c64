//! Move computation session: owns the retained tree between turns.

use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Board, Side, Snapshot, Square};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::search::alphabeta::{recalculate, SearchParams, SearchStats, Searcher};
use crate::search::schedule::SearchPlan;
use crate::search::select::choose_best_child;
use crate::search::tree::Node;

pub struct Engine {
    config: EngineConfig,
    root: Node,
    tiles_placed: u32,
    max_depth: u32,
    last_stats: Option<SearchStats>,
    rng: SmallRng,
}

impl Default for Engine {
    fn default() -> Self { Self::new(EngineConfig::default()) }
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self { config, root: Node::root(Board::empty()), tiles_placed: 0, max_depth: 0, last_stats: None, rng }
    }

    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn root(&self) -> &Node { &self.root }
    pub fn tiles_placed(&self) -> u32 { self.tiles_placed }
    /// Depth the last search actually reached.
    pub fn max_depth(&self) -> u32 { self.max_depth }
    pub fn last_stats(&self) -> Option<SearchStats> { self.last_stats }

    /// Drops the whole retained tree.
    pub fn reset(&mut self) {
        self.root = Node::root(Board::empty());
        self.tiles_placed = 0;
        self.max_depth = 0;
        self.last_stats = None;
    }

    /// Chooses a move for `side` on `snapshot`. `None` means `side` has to pass
    /// or the game is over.
    pub fn compute_move(&mut self, snapshot: &Snapshot, side: Side) -> Result<Option<Square>, EngineError> {
        let observed = snapshot.to_board(side);
        self.advance_to(&observed)?;

        self.tiles_placed = observed.occupied().count_ones() + 1;
        let plan = self.plan();
        let params = SearchParams::from_plan(plan, self.config.node_budget);

        let t0 = Instant::now();
        let stats = Searcher::new(params).run(&mut self.root)?;
        if stats.truncated {
            recalculate(&mut self.root, stats.effective_depth);
        }
        self.max_depth = stats.effective_depth;
        self.last_stats = Some(stats);
        debug!(
            "search tiles={} depth={}/{} fan_out={:?} visited={} elapsed={:.3}s",
            self.tiles_placed,
            stats.effective_depth,
            stats.requested_depth,
            params.fan_out,
            stats.visited,
            t0.elapsed().as_secs_f64()
        );

        let Some(index) = choose_best_child(&self.root, &mut self.rng) else {
            info!("{side}: game over, no move");
            return Ok(None);
        };
        let chosen = &self.root.children()[index];
        let ply = chosen.ply();
        info!(
            "{side} plays {ply} (score {}, {} of {} moves tied)",
            chosen.score(),
            self.root.best_children().len(),
            self.root.children().len()
        );
        let promoted = self.root.promote(index);
        debug_assert!(promoted, "chosen child {index} missing from root");
        Ok(ply.square())
    }

    fn plan(&self) -> SearchPlan {
        let mut plan = self.config.schedule.plan(self.tiles_placed);
        if !self.config.parallel {
            plan.fan_out = None;
        }
        plan
    }

    /// Moves the retained root to the observed position: directly on the first
    /// call, through the matching child afterwards, or by starting over when the
    /// snapshot does not follow from the tree.
    fn advance_to(&mut self, observed: &Board) -> Result<(), EngineError> {
        if self.root.board().is_empty() {
            self.root = Node::root(*observed);
            return Ok(());
        }
        if self.root.board() == observed {
            return Ok(());
        }
        if !self.root.is_expanded() {
            self.root.expand()?;
        }
        match self.root.find_child(observed) {
            Some(index) => {
                debug!("opponent played {}", self.root.children()[index].ply());
                let promoted = self.root.promote(index);
                debug_assert!(promoted, "matched child {index} missing from root");
            }
            None => {
                warn!("snapshot does not follow the retained tree, starting over from it");
                self.root = Node::root(*observed);
            }
        }
        Ok(())
    }
}
