//! Relaxed Layer (§4.B): the monotonically growing set of tuples reached so
//! far by the delete-relaxed forward search.

use crate::problem::{ProblemIndex, TupleIdx, Value, VarId};
use fixedbitset::FixedBitSet;

#[derive(Clone)]
pub struct RelaxedLayer {
    reached: FixedBitSet,
}

impl RelaxedLayer {
    pub fn empty(num_tuples: usize) -> Self {
        RelaxedLayer {
            reached: FixedBitSet::with_capacity(num_tuples),
        }
    }

    pub fn contains(&self, t: TupleIdx) -> bool {
        self.reached.contains(t.to_u32() as usize)
    }

    /// Idempotent: adding an already-reached tuple is a no-op.
    pub fn add(&mut self, t: TupleIdx) {
        self.reached.insert(t.to_u32() as usize);
    }

    /// Unions `novel` into the set of reached tuples.
    pub fn advance(&mut self, novel: impl IntoIterator<Item = TupleIdx>) {
        for t in novel {
            self.add(t);
        }
    }

    pub fn len(&self) -> usize {
        self.reached.count_ones(..)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Goal-relevant `(var, value)` atoms not yet reached in this layer, used
    /// to bound per-layer sweep termination (§4.B).
    pub fn unachieved_against<'a>(&'a self, problem: &'a ProblemIndex) -> impl Iterator<Item = (VarId, Value)> + 'a {
        problem.goal_relevant_atoms().filter(move |&(v, val)| {
            let idx = problem.atom_index(v, val).expect("goal-relevant atom without a tuple index");
            !self.contains(idx)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut layer = RelaxedLayer::empty(4);
        let t = TupleIdx::from_u32(2);
        assert!(!layer.contains(t));
        layer.add(t);
        layer.add(t);
        assert!(layer.contains(t));
        assert_eq!(layer.len(), 1);
    }

    #[test]
    fn unachieved_against_shrinks_as_goal_atoms_are_reached() {
        use crate::formula::{Formula, Term};

        let types = planner_symbols::TypeHierarchy::new(vec![(planner_symbols::Sym::new("block"), None)]).unwrap();
        let symbols = planner_symbols::SymbolTable::new(
            types,
            vec![
                (planner_symbols::Sym::new("b1"), planner_symbols::Sym::new("block")),
                (planner_symbols::Sym::new("b2"), planner_symbols::Sym::new("block")),
            ],
        )
        .unwrap();
        let block = symbols.types.id_of("block").unwrap();
        let on = crate::problem::FnId::from_u32(0);
        let signatures = vec![crate::problem::Signature {
            name: planner_symbols::Sym::new("on"),
            arg_types: vec![block],
            ret: crate::problem::ReturnType::Sym(block),
        }];
        let b1 = symbols.id("b1").unwrap();
        let b2 = symbols.id("b2").unwrap();
        let goal = Formula::atom(
            Term::NestedTerm(on, vec![Term::ObjectConstant(b1)]),
            Term::ObjectConstant(b2),
            true,
        );
        let problem = crate::problem::ProblemIndexBuilder::new(symbols, signatures)
            .build(Some(&goal))
            .unwrap();
        let var = problem
            .variable_of(&crate::problem::StateVar::new(on, smallvec::smallvec![b1]))
            .unwrap();
        let tuple = problem.atom_index(var, Value::Obj(b2)).unwrap();

        let mut layer = RelaxedLayer::empty(problem.num_tuples());
        assert_eq!(layer.unachieved_against(&problem).count(), 1);
        layer.add(tuple);
        assert_eq!(layer.unachieved_against(&problem).count(), 0);
    }
}
