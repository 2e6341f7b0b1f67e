//! Per-effect CSP handler (§4.D).
//!
//! Every action schema is ground eagerly when the [`crate::problem::Task`] is
//! built, so by the time a handler exists its parameter space is already
//! empty — the "handler with an empty parameter space reduces to a single
//! static check" edge case named in §4.D is therefore not an edge case here
//! but the normal path. What still varies layer to layer is *which value* a
//! copy-style functional effect (`lhs := rhs` where `rhs` names another state
//! variable) actually achieves, since that depends on which of `rhs`'s values
//! have been reached so far; handlers for that shape stay `Active` across the
//! whole RPG construction instead of firing once and going quiet.
//!
//! Only the two effect shapes `crate::problem::EffectValue` can express reach
//! this stage: a handler never has to register a CSP variable for an
//! indirect (fluent-valued) argument or evaluate an `Arith`/`Compare` rhs,
//! because `Task` construction already rejected any effect in that shape
//! (see `EffectValue`'s doc comment and DESIGN.md's Open Question decisions).

use crate::problem::{ActionId, GroundAction, ProblemIndex, TupleIdx, Value, VarId};
use crate::rpg::RelaxedLayer;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum HandlerState {
    Indexed,
    Failed,
    Static,
    Active,
}

enum Kind {
    /// The effect assigns a literal value: exactly one tuple can ever be achieved.
    Fixed(TupleIdx),
    /// The effect copies whatever `src` holds: one candidate tuple per value
    /// reached for `src`.
    Copy { dst: VarId, src: VarId },
}

pub struct EffectHandler {
    pub action: ActionId,
    necessary_tuples: Vec<TupleIdx>,
    kind: Kind,
    state: HandlerState,
    /// Whether the single achievable tuple of a `Fixed` handler has already
    /// been emitted once; re-emitting after that is pointless since the
    /// bookkeeping map would just discard the duplicate, but skipping it
    /// keeps `seek_novel_tuples` cheap for the common case.
    fired: bool,
    /// When the novelty constraint (§6) is enabled, a `Copy` handler
    /// remembers which destination tuples it has already posted and does not
    /// re-propose them; this is a pure work-avoidance measure, since the
    /// bookkeeping would discard the duplicates anyway.
    novelty_constrained: bool,
    already_proposed: std::collections::HashSet<TupleIdx>,
}

impl EffectHandler {
    pub fn state(&self) -> HandlerState {
        self.state
    }

    /// Emits every tuple this handler can newly achieve given `layer`,
    /// together with the tuples that justify it. Already-reached tuples are
    /// still emitted here — the bookkeeping's `add` is responsible for
    /// discarding them — since this handler has no visibility into what the
    /// other handlers have produced this sweep.
    pub fn seek_novel_tuples(&mut self, layer: &RelaxedLayer, problem: &ProblemIndex) -> Vec<(TupleIdx, Vec<TupleIdx>)> {
        if self.state == HandlerState::Failed {
            return Vec::new();
        }
        if !self.necessary_tuples.iter().all(|&t| layer.contains(t)) {
            return Vec::new();
        }
        match self.kind {
            Kind::Fixed(t) => {
                if self.fired {
                    return Vec::new();
                }
                self.fired = true;
                vec![(t, self.necessary_tuples.clone())]
            }
            Kind::Copy { dst, src } => {
                let novelty_constrained = self.novelty_constrained;
                let already_proposed = &mut self.already_proposed;
                problem
                    .variable_objects(src)
                    .iter()
                    .filter_map(|&v| {
                        let src_tuple = problem.atom_index(src, v)?;
                        if !layer.contains(src_tuple) {
                            return None;
                        }
                        let dst_tuple = problem.atom_index(dst, v)?;
                        if novelty_constrained && !already_proposed.insert(dst_tuple) {
                            return None;
                        }
                        let mut support = self.necessary_tuples.clone();
                        support.push(src_tuple);
                        Some((dst_tuple, support))
                    })
                    .collect()
            }
        }
    }
}

/// Builds one handler per non-delete effect of `action`. Delete-effects are
/// discarded here: the relaxation forgets deletes (§4.D).
pub fn build_handlers(
    action_id: ActionId,
    action: &GroundAction,
    problem: &ProblemIndex,
    novelty_constrained: bool,
) -> Vec<EffectHandler> {
    let necessary_tuples: Vec<TupleIdx> = action
        .relaxed_preconditions
        .iter()
        .filter_map(|&(v, val)| problem.atom_index(v, val))
        .collect();

    action
        .effects
        .iter()
        .filter(|e| !e.is_delete())
        .map(|effect| match effect.value {
            crate::problem::EffectValue::Constant(v) => match problem.atom_index(effect.var, v) {
                Some(t) => EffectHandler {
                    action: action_id,
                    necessary_tuples: necessary_tuples.clone(),
                    kind: Kind::Fixed(t),
                    state: HandlerState::Static,
                    fired: false,
                    novelty_constrained,
                    already_proposed: std::collections::HashSet::new(),
                },
                // the assigned value is outside the variable's declared domain:
                // permanently inapplicable rather than a panic, since this can
                // only be reached from a malformed problem description.
                None => EffectHandler {
                    action: action_id,
                    necessary_tuples: necessary_tuples.clone(),
                    kind: Kind::Fixed(TupleIdx::from_u32(0)),
                    state: HandlerState::Failed,
                    fired: false,
                    novelty_constrained,
                    already_proposed: std::collections::HashSet::new(),
                },
            },
            crate::problem::EffectValue::Copy(src) => EffectHandler {
                action: action_id,
                necessary_tuples: necessary_tuples.clone(),
                kind: Kind::Copy { dst: effect.var, src },
                state: HandlerState::Active,
                fired: false,
                novelty_constrained,
                already_proposed: std::collections::HashSet::new(),
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_handler_fires_once_preconditions_met() {
        let problem = crate::test_support::blocks_world_problem();
        let clear = crate::test_support::fn_id(&problem, "clear");
        let b1 = problem.symbols.id("b1").unwrap();
        let var_clear_b1 = problem.variable_of(&crate::problem::StateVar::new(clear, smallvec::smallvec![b1])).unwrap();

        let action = GroundAction {
            schema_name: planner_symbols::Sym::new("noop"),
            args: smallvec::smallvec![],
            precondition: crate::formula::Formula::And(vec![]),
            relaxed_preconditions: vec![],
            effects: vec![crate::problem::Effect {
                var: var_clear_b1,
                value: crate::problem::EffectValue::Constant(Value::Bool(true)),
            }],
        };
        let mut handlers = build_handlers(ActionId::from_u32(0), &action, &problem, true);
        assert_eq!(handlers.len(), 1);
        let layer = RelaxedLayer::empty(problem.num_tuples());
        let novel = handlers[0].seek_novel_tuples(&layer, &problem);
        assert_eq!(novel.len(), 1);
        let again = handlers[0].seek_novel_tuples(&layer, &problem);
        assert!(again.is_empty());
    }
}
