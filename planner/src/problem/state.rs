//! State (§4.B): a total, immutable assignment of every state variable to a value.
//!
//! Grounded on the aries classical planner's `State` (a `FixedBitSet` over
//! boolean state variables), generalized to the finite-domain case: a plain
//! `Vec<Value>` indexed by `VarId`, hashed and compared by value so it can be
//! used directly as a closed-list key by the search harness (§4.H).

use crate::problem::value::Value;
use crate::problem::{Atom, ProblemIndex, VarId};

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct State {
    values: Vec<Value>,
}

impl State {
    /// Builds a state from a total assignment, one value per variable in `problem`.
    pub fn new(values: Vec<Value>) -> Self {
        State { values }
    }

    pub fn get(&self, var: VarId) -> Value {
        self.values[usize::from(var)]
    }

    pub fn set(&mut self, var: VarId, value: Value) {
        self.values[usize::from(var)] = value;
    }

    /// Returns a fresh state with `var` updated to `value`; the parent state is untouched.
    pub fn with(&self, var: VarId, value: Value) -> State {
        let mut s = self.clone();
        s.set(var, value);
        s
    }

    pub fn num_variables(&self) -> usize {
        self.values.len()
    }

    pub fn atoms(&self) -> impl Iterator<Item = (VarId, Value)> + '_ {
        self.values.iter().enumerate().map(|(i, &v)| (VarId::from(i), v))
    }

    pub fn entails(&self, var: VarId, value: Value) -> bool {
        self.get(var) == value
    }

    pub fn entails_atom(&self, atom: &Atom) -> bool {
        self.entails(atom.variable, atom.value)
    }

    pub fn entails_all(&self, atoms: &[Atom]) -> bool {
        atoms.iter().all(|a| self.entails_atom(a))
    }

    pub fn satisfies_goal(&self, goal: &crate::formula::Formula, problem: &ProblemIndex) -> bool {
        goal.satisfied(&crate::formula::Binding::empty(), self, problem)
    }
}
