//! Heuristic Driver (§4.G): the layered fixed-point loop that seeds a relaxed
//! layer from a state, repeatedly asks every handler for newly-achievable
//! tuples, and either confirms the goal is relaxed-reachable (handing off to
//! the extractor) or reaches a fixpoint with nothing new, in which case the
//! state is `UNREACHABLE`.

use crate::config::{Config, Heuristic};
use crate::csp;
use crate::extractor::{self, RelaxedPlan};
use crate::formula::Formula;
use crate::problem::{ProblemIndex, State, Task, TupleIdx};
use crate::rpg::{Bookkeeping, RelaxedLayer};
use crate::util::enumerate::enumerate;
use planner_symbols::SymId;
use streaming_iterator::StreamingIterator;

/// `evaluate` never returns a negative cost; `None` stands for the spec's
/// `UNREACHABLE` sentinel.
pub type HeuristicValue = Option<u32>;

pub fn evaluate(task: &Task, config: &Config, state: &State) -> HeuristicValue {
    if task.is_goal(state) {
        return Some(0);
    }

    let problem = &task.problem;
    let seed_tuples: Vec<TupleIdx> = state.atoms().filter_map(|(v, val)| problem.atom_index(v, val)).collect();

    let mut layer = RelaxedLayer::empty(problem.num_tuples());
    layer.advance(seed_tuples.iter().copied());
    let mut bookkeeping = Bookkeeping::seeded(seed_tuples);
    let mut handlers = csp::build_all(task, config.use_novelty_constraint);

    loop {
        for handler in handlers.iter_mut() {
            for (tuple, support) in handler.seek_novel_tuples(&layer, problem) {
                bookkeeping.add(tuple, handler.action, support);
            }
        }
        if bookkeeping.num_novel() == 0 {
            tracing::trace!(layer = bookkeeping.current_layer(), "RPG fixpoint, no novel tuples");
            return None;
        }
        let novel: Vec<TupleIdx> = bookkeeping.novel_tuples().collect();
        layer.advance(novel.iter().copied());

        if let Some(causes) = goal_causes(problem, &layer, &task.goal) {
            let relaxed_plan = extractor::extract(&causes, &bookkeeping);
            let cost = cost_of(config.heuristic, &relaxed_plan);
            tracing::trace!(cost, layer = bookkeeping.current_layer(), "goal reachable in RPG");
            return Some(cost);
        }
        bookkeeping.advance_layer();
    }
}

fn cost_of(heuristic: Heuristic, plan: &RelaxedPlan) -> u32 {
    match heuristic {
        Heuristic::HFf => plan.cost_ff(),
        Heuristic::HMax => plan.cost_hmax(),
    }
}

/// Relaxed satisfiability of `formula` against `layer`: a positive atom holds
/// once its tuple is reached; a negative atom is assumed satisfiable, since
/// the relaxation carries no information about what has *not* been reached.
/// Returns the set of tuples that justify the formula, for the extractor to
/// walk backwards from.
fn goal_causes(problem: &ProblemIndex, layer: &RelaxedLayer, formula: &Formula) -> Option<Vec<TupleIdx>> {
    match formula {
        Formula::Atomic(a) => {
            if !a.positive {
                return Some(Vec::new());
            }
            let var = a.term.resolve_state_variable(problem)?;
            let value = a.value.as_ground_value()?;
            let idx = problem.atom_index(var, value)?;
            if layer.contains(idx) {
                Some(vec![idx])
            } else {
                None
            }
        }
        Formula::And(parts) => {
            let mut causes = Vec::new();
            for p in parts {
                causes.extend(goal_causes(problem, layer, p)?);
            }
            Some(causes)
        }
        Formula::Or(parts) => parts.iter().find_map(|p| goal_causes(problem, layer, p)),
        Formula::Exists(types, body) => {
            let domains: Vec<Vec<SymId>> = types.iter().map(|&t| problem.symbols.instances_of_type(t)).collect();
            let mut combos = enumerate(domains);
            while let Some(combo) = combos.next() {
                let params: Vec<Option<SymId>> = combo.iter().map(|&o| Some(o)).collect();
                let bound = body.bind(&params);
                if let Some(causes) = goal_causes(problem, layer, &bound) {
                    return Some(causes);
                }
            }
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::Term;
    use crate::problem::{ActionSchema, EffectTemplate, ReturnType, Signature, StateVar, TaskBuilder, Value};
    use planner_symbols::{Sym, SymbolTable, TypeHierarchy};

    /// The literal three-block scenario: `stack b1 b2` is the one-step plan.
    fn three_block_task() -> Task {
        let types = TypeHierarchy::new(vec![(Sym::new("block"), None)]).unwrap();
        let symbols = SymbolTable::new(
            types,
            vec![
                (Sym::new("b1"), Sym::new("block")),
                (Sym::new("b2"), Sym::new("block")),
                (Sym::new("b3"), Sym::new("block")),
                (Sym::new("table"), Sym::new("block")),
            ],
        )
        .unwrap();
        let block = symbols.types.id_of("block").unwrap();
        let on = crate::problem::FnId::from_u32(0);
        let clear = crate::problem::FnId::from_u32(1);
        let signatures = vec![
            Signature {
                name: Sym::new("on"),
                arg_types: vec![block],
                ret: ReturnType::Sym(block),
            },
            Signature {
                name: Sym::new("clear"),
                arg_types: vec![block],
                ret: ReturnType::Bool,
            },
        ];

        let stack = ActionSchema {
            name: Sym::new("stack"),
            params: vec![block, block],
            precondition: Formula::and(vec![
                Formula::predicate(clear, vec![Term::BoundVariable(0)], true),
                Formula::predicate(clear, vec![Term::BoundVariable(1)], true),
            ]),
            effects: vec![
                EffectTemplate {
                    lhs: Term::NestedTerm(on, vec![Term::BoundVariable(0)]),
                    rhs: Term::BoundVariable(1),
                },
                EffectTemplate {
                    lhs: Term::NestedTerm(clear, vec![Term::BoundVariable(1)]),
                    rhs: Term::Constant(Value::Bool(false)),
                },
            ],
        };

        let b1 = symbols.id("b1").unwrap();
        let b2 = symbols.id("b2").unwrap();
        let b3 = symbols.id("b3").unwrap();
        let table = symbols.id("table").unwrap();

        let goal = Formula::and(vec![
            Formula::atom(Term::NestedTerm(on, vec![Term::ObjectConstant(b1)]), Term::ObjectConstant(b2), true),
            Formula::atom(Term::NestedTerm(on, vec![Term::ObjectConstant(b2)]), Term::ObjectConstant(b3), true),
        ]);

        TaskBuilder::new(symbols, signatures, goal)
            .with_action(stack)
            .with_initial_fact(StateVar::new(on, smallvec::smallvec![b1]), Value::Obj(table))
            .with_initial_fact(StateVar::new(on, smallvec::smallvec![b2]), Value::Obj(b3))
            .with_initial_fact(StateVar::new(on, smallvec::smallvec![b3]), Value::Obj(table))
            .with_initial_fact(StateVar::new(clear, smallvec::smallvec![b1]), Value::Bool(true))
            .with_initial_fact(StateVar::new(clear, smallvec::smallvec![b2]), Value::Bool(true))
            .with_initial_fact(StateVar::new(clear, smallvec::smallvec![b3]), Value::Bool(false))
            .with_initial_fact(StateVar::new(clear, smallvec::smallvec![table]), Value::Bool(true))
            .build()
            .unwrap()
    }

    #[test]
    fn initial_state_is_one_step_from_the_goal() {
        let task = three_block_task();
        let h = evaluate(&task, &Config::default(), &task.initial);
        assert_eq!(h, Some(1));
    }

    #[test]
    fn goal_state_has_zero_cost() {
        let task = three_block_task();
        let b1 = task.problem.symbols.id("b1").unwrap();
        let b2 = task.problem.symbols.id("b2").unwrap();
        let stack_b1_b2 = task
            .actions
            .keys()
            .find(|&a| task.actions[a].args.as_slice() == [b1, b2])
            .unwrap();
        let after = task.apply(&task.initial, stack_b1_b2);
        assert!(task.is_goal(&after));
        assert_eq!(evaluate(&task, &Config::default(), &after), Some(0));
    }

    #[test]
    fn unreachable_goal_returns_none() {
        let types = TypeHierarchy::new(vec![]).unwrap();
        let symbols = SymbolTable::new(types, vec![]).unwrap();
        let p = Sym::new("p");
        let fid = crate::problem::FnId::from_u32(0);
        let signatures = vec![Signature {
            name: p,
            arg_types: vec![],
            ret: ReturnType::Bool,
        }];
        let goal = Formula::predicate(fid, vec![], true);
        let task = TaskBuilder::new(symbols, signatures, goal).build().unwrap();
        assert_eq!(evaluate(&task, &Config::default(), &task.initial), None);
    }
}
