//! CSP Handlers (§4.D): the per-effect constraint models that tell the
//! heuristic driver which tuples become newly achievable on a given layer.

pub mod handler;

pub use handler::{build_handlers, EffectHandler, HandlerState};

use crate::problem::Task;

/// Builds the full handler set for a task, one handler per non-delete effect
/// of every ground action, in action-declaration order — this fixes the
/// deterministic visitation order promised by §5.
pub fn build_all(task: &Task, novelty_constrained: bool) -> Vec<EffectHandler> {
    task.actions
        .keys()
        .flat_map(|id| build_handlers(id, &task.actions[id], &task.problem, novelty_constrained))
        .collect()
}
