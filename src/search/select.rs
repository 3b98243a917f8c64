use rand::Rng;
use rand::rngs::SmallRng;

use crate::search::tree::Node;

/// Picks uniformly among the root children sharing the best score, so equal
/// moves do not always resolve the same way. `None` when the root has no children.
pub fn choose_best_child(root: &Node, rng: &mut SmallRng) -> Option<usize> {
    let pool = root.best_children();
    if pool.is_empty() { return None; }
    let idx = rng.gen_range(0..pool.len());
    Some(pool[idx])
}
