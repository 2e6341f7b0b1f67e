//! Relaxed-Plan Extractor (§4.F): backward traversal of the support DAG
//! recorded by [`crate::rpg::Bookkeeping`], producing the two heuristic costs.
//!
//! Each tuple's bookkeeping entry records exactly one support (the first
//! handler to produce it, in the deterministic visitation order guaranteed by
//! §5) rather than every support ever offered, so there is no tie to break
//! when picking which one to follow backwards.

use crate::problem::{ActionId, TupleIdx};
use crate::rpg::Bookkeeping;
use std::collections::{HashSet, VecDeque};

pub struct RelaxedPlan {
    pub actions: HashSet<ActionId>,
    pub max_layer: u32,
}

impl RelaxedPlan {
    /// h_ff: number of distinct actions in the relaxed plan.
    pub fn cost_ff(&self) -> u32 {
        self.actions.len() as u32
    }

    /// h_max: maximum layer index touched while walking the support graph.
    pub fn cost_hmax(&self) -> u32 {
        self.max_layer
    }
}

/// Walks backward from `goal_causes` to the seed layer, accumulating every
/// distinct action used along the way.
pub fn extract(goal_causes: &[TupleIdx], bookkeeping: &Bookkeeping) -> RelaxedPlan {
    let mut visited = HashSet::new();
    let mut actions = HashSet::new();
    let mut max_layer = 0;
    let mut queue: VecDeque<TupleIdx> = goal_causes.iter().copied().collect();

    while let Some(t) = queue.pop_front() {
        if !visited.insert(t) {
            continue;
        }
        let layer = bookkeeping
            .first_layer(t)
            .expect("extractor walked into a tuple the RPG never reached");
        max_layer = max_layer.max(layer);
        if layer == 0 {
            continue;
        }
        let support = bookkeeping
            .support(t)
            .expect("non-seed tuple in the RPG must carry a support");
        actions.insert(support.action);
        for &dep in &support.depends_on {
            queue.push_back(dep);
        }
    }

    RelaxedPlan { actions, max_layer }
}
