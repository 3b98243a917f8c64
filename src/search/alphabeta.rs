use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};

use log::debug;
use rayon::prelude::*;

use crate::error::EngineError;
use crate::search::schedule::{SearchPlan, DEFAULT_NODE_BUDGET};
use crate::search::tree::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    pub depth: u32,
    /// Ply whose children are searched as independent rayon tasks.
    pub fan_out: Option<u32>,
    pub node_budget: u64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { depth: 3, fan_out: None, node_budget: DEFAULT_NODE_BUDGET }
    }
}

impl SearchParams {
    pub fn from_plan(plan: SearchPlan, node_budget: u64) -> Self {
        Self { depth: plan.depth, fan_out: plan.fan_out, node_budget }
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub requested_depth: u32,
    /// Depth every branch was searched to; lower than requested after a cutoff.
    pub effective_depth: u32,
    pub visited: u64,
    pub truncated: bool,
}

/// One move computation's search context.
///
/// The visit counter and the effective depth are shared by every task spawned
/// at the fan-out ply, so they are atomics owned by this call rather than
/// process-wide state.
pub struct Searcher {
    params: SearchParams,
    visited: AtomicU64,
    max_depth: AtomicU32,
}

impl Searcher {
    pub fn new(params: SearchParams) -> Self {
        Self { params, visited: AtomicU64::new(0), max_depth: AtomicU32::new(params.depth) }
    }

    /// Searches `root` and leaves every visited node's `worst_branch` updated.
    pub fn run(&self, root: &mut Node) -> Result<SearchStats, EngineError> {
        self.alphabeta(root, None, None, 0)?;
        let effective_depth = self.max_depth.load(Ordering::Relaxed);
        Ok(SearchStats {
            requested_depth: self.params.depth,
            effective_depth,
            visited: self.visited.load(Ordering::Relaxed),
            truncated: effective_depth < self.params.depth,
        })
    }

    /// `alpha` is what the side to move at `node` already has; `beta` is the
    /// figure above which the parent would never pick `node`. `None` is unset.
    fn alphabeta(&self, node: &mut Node, alpha: Option<i32>, beta: Option<i32>, depth: u32) -> Result<(), EngineError> {
        if !node.is_expanded() {
            node.expand()?;
        }
        if node.is_terminal() {
            node.settle_terminal();
            return Ok(());
        }
        if depth >= self.max_depth.load(Ordering::Relaxed) {
            node.worst_branch = 0;
            return Ok(());
        }

        let branching = node.children().len() as u64;
        let visited = self.visited.fetch_add(branching, Ordering::Relaxed) + branching;
        if visited > self.params.node_budget {
            let prev = self.max_depth.fetch_min(depth, Ordering::Relaxed);
            if prev > depth {
                debug!("node budget exhausted after {visited} visits, capping depth at {depth}");
            }
            return Ok(());
        }

        if self.params.fan_out == Some(depth) {
            self.split(node, alpha, beta, depth)
        } else {
            self.serial(node, alpha, beta, depth)
        }
    }

    fn serial(&self, node: &mut Node, mut alpha: Option<i32>, beta: Option<i32>, depth: u32) -> Result<(), EngineError> {
        let mut best: Option<i32> = None;
        for child in node.children_mut() {
            let (ca, cb) = child_window(child, alpha, beta);
            self.alphabeta(child, ca, cb, depth + 1)?;
            if fold(&mut best, &mut alpha, beta, child) { break; }
        }
        if let Some(b) = best { node.worst_branch = b; }
        Ok(())
    }

    /// Fork-join at the fan-out ply: every child subtree is searched as its own
    /// task with the window as it stood before the split, then the results are
    /// folded in index order.
    fn split(&self, node: &mut Node, mut alpha: Option<i32>, beta: Option<i32>, depth: u32) -> Result<(), EngineError> {
        let (a0, b0) = (alpha, beta);
        node.children_mut().par_iter_mut().try_for_each(|child| {
            let (ca, cb) = child_window(child, a0, b0);
            self.alphabeta(child, ca, cb, depth + 1)
        })?;

        let mut best: Option<i32> = None;
        for child in node.children() {
            if fold(&mut best, &mut alpha, beta, child) { break; }
        }
        if let Some(b) = best { node.worst_branch = b; }
        Ok(())
    }
}

/// Translates the parent's window into the child's: the child is only worth
/// choosing while `value - worst_branch >= alpha`, and its figures below
/// `value - beta` already make the parent cut.
fn child_window(child: &Node, alpha: Option<i32>, beta: Option<i32>) -> (Option<i32>, Option<i32>) {
    (beta.map(|b| child.value - b), alpha.map(|a| child.value - a))
}

/// Folds one child into the running best. Returns true when the remaining
/// siblings can be skipped.
fn fold(best: &mut Option<i32>, alpha: &mut Option<i32>, beta: Option<i32>, child: &Node) -> bool {
    let s = child.score();
    let b = best.map_or(s, |b| b.max(s));
    *best = Some(b);
    *alpha = Some(alpha.map_or(b, |a| a.max(b)));
    matches!(beta, Some(limit) if b > limit)
}

/// Re-folds `worst_branch` over the already expanded tree down to `max_depth`
/// so siblings cut short by the node budget compare on the same horizon.
/// Nodes at the horizon read as leaves again, whatever a deeper pass stored
/// in them. Never generates moves.
pub fn recalculate(root: &mut Node, max_depth: u32) {
    refold(root, 0, max_depth);
}

fn refold(node: &mut Node, depth: u32, max_depth: u32) {
    if !node.is_expanded() { return; }
    if node.is_terminal() {
        node.settle_terminal();
        return;
    }
    if depth >= max_depth {
        node.worst_branch = 0;
        return;
    }
    let mut best: Option<i32> = None;
    for child in node.children_mut() {
        refold(child, depth + 1, max_depth);
        let s = child.score();
        best = Some(best.map_or(s, |b| b.max(s)));
    }
    if let Some(b) = best { node.worst_branch = b; }
}
