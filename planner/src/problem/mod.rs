//! Problem Index (§4.A): the immutable, shared catalogue of types, objects,
//! state variables and symbols that every other component is built against.
//!
//! Grounded on the aries planning model's `World`: state variables are
//! enumerated once, eagerly, as the Cartesian product of each predicate's
//! argument types, and never change for the lifetime of the planner.

pub mod action;
pub mod signature;
pub mod state;
pub mod state_var;
pub mod task;
pub mod tuple_index;
pub mod value;

use crate::formula::Formula;
use crate::util::enumerate::enumerate;
use planner_collections::ref_store::RefStore;
use planner_symbols::{SymId, SymbolTable, TypeId};
use std::collections::HashMap;
use streaming_iterator::StreamingIterator;

pub use action::{ActionId, ActionSchema, Effect, EffectTemplate, EffectValue, GroundAction};
pub use signature::{FnId, ReturnType, Signature};
pub use state::State;
pub use state_var::{StateVar, VarId};
pub use task::{Task, TaskBuildError, TaskBuilder};
pub use tuple_index::{TupleIdx, TupleIndex};
pub use value::Value;

/// A ground fact: a state variable paired with one of the values in its domain.
#[derive(Copy, Clone, Debug)]
pub struct Atom {
    pub variable: VarId,
    pub value: Value,
    /// Whether this atom appears (positively or negatively) in the goal formula.
    /// Computed once at construction time and used to bound the search for
    /// termination of per-layer RPG sweeps (`unachieved_against`).
    pub goal_relevant: bool,
}

#[derive(thiserror::Error, Debug)]
pub enum ProblemError {
    #[error("unknown type: {0}")]
    UnknownType(String),
    #[error("non boolean state variable used as a predicate: {0}")]
    NonBooleanPredicate(String),
}

pub struct ProblemIndex {
    pub symbols: SymbolTable,
    signatures: RefStore<FnId, Signature>,
    variables: RefStore<VarId, StateVar>,
    var_lookup: HashMap<StateVar, VarId>,
    domains: RefStore<VarId, Vec<Value>>,
    atom_table: HashMap<(VarId, Value), TupleIdx>,
    tuple_index: TupleIndex,
    goal_relevant: std::collections::HashSet<(VarId, Value)>,
}

impl ProblemIndex {
    pub fn signature(&self, f: FnId) -> &Signature {
        &self.signatures[f]
    }

    pub fn signatures(&self) -> impl Iterator<Item = FnId> + use<'_> {
        self.signatures.keys()
    }

    pub fn is_predicate(&self, f: FnId) -> bool {
        self.signatures[f].is_predicate()
    }

    pub fn variable(&self, v: VarId) -> &StateVar {
        &self.variables[v]
    }

    pub fn variables(&self) -> impl Iterator<Item = VarId> + use<'_> {
        self.variables.keys()
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn variable_of(&self, sv: &StateVar) -> Option<VarId> {
        self.var_lookup.get(sv).copied()
    }

    /// The finite set of values admissible for `var` (§4.B).
    pub fn variable_objects(&self, var: VarId) -> &[Value] {
        &self.domains[var]
    }

    pub fn atom_index(&self, var: VarId, value: Value) -> Option<TupleIdx> {
        self.atom_table.get(&(var, value)).copied()
    }

    pub fn tuple_index(&self) -> &TupleIndex {
        &self.tuple_index
    }

    pub fn num_tuples(&self) -> usize {
        self.tuple_index.len()
    }

    pub fn is_goal_relevant(&self, var: VarId, value: Value) -> bool {
        self.goal_relevant.contains(&(var, value))
    }

    pub fn goal_relevant_atoms(&self) -> impl Iterator<Item = (VarId, Value)> + '_ {
        self.goal_relevant.iter().copied()
    }

    pub fn type_of_object(&self, o: SymId) -> TypeId {
        self.symbols.type_of(o)
    }
}

/// One-shot builder for a [`ProblemIndex`]. Constructed from a symbol table
/// and a flat list of function/predicate signatures; exhaustively grounds
/// every state variable before the planner ever runs, matching the "one-shot
/// at planner start, freely shareable afterwards" lifetime promised by §4.A.
pub struct ProblemIndexBuilder {
    symbols: SymbolTable,
    signatures: Vec<Signature>,
}

impl ProblemIndexBuilder {
    pub fn new(symbols: SymbolTable, signatures: Vec<Signature>) -> Self {
        ProblemIndexBuilder { symbols, signatures }
    }

    pub fn build(self, goal: Option<&Formula>) -> Result<ProblemIndex, ProblemError> {
        let mut signature_store: RefStore<FnId, Signature> = RefStore::new();
        for s in self.signatures {
            signature_store.push(s);
        }

        let mut variables: RefStore<VarId, StateVar> = RefStore::new();
        let mut var_lookup: HashMap<StateVar, VarId> = HashMap::new();
        let mut domains: RefStore<VarId, Vec<Value>> = RefStore::new();

        for f in signature_store.keys() {
            let sig = &signature_store[f];
            let domain = domain_of(&self.symbols, &sig.ret);

            let arg_instances: Vec<Vec<SymId>> = sig
                .arg_types
                .iter()
                .map(|&t| self.symbols.instances_of_type(t))
                .collect();
            let mut it = enumerate(arg_instances);
            while let Some(combo) = it.next() {
                let args: smallvec::SmallVec<[SymId; 4]> = combo.iter().copied().collect();
                let sv = StateVar::new(f, args);
                let vid = variables.push(sv.clone());
                var_lookup.insert(sv, vid);
                domains.push(domain.clone());
            }
        }

        let mut tuple_index = TupleIndex::new();
        let mut atom_table = HashMap::new();
        for vid in variables.keys() {
            let sv = &variables[vid];
            let mut values = sv.args.iter().map(|&o| Value::Obj(o)).collect::<Vec<_>>();
            for &value in &domains[vid] {
                values.push(value);
                let tidx = tuple_index.to_index(sv.function, &values);
                values.pop();
                atom_table.insert((vid, value), tidx);
            }
        }

        let mut problem = ProblemIndex {
            symbols: self.symbols,
            signatures: signature_store,
            variables,
            var_lookup,
            domains,
            atom_table,
            tuple_index,
            goal_relevant: std::collections::HashSet::new(),
        };

        // Resolving a goal atom's `NestedTerm` to a `VarId` needs the fully
        // built index (the same lookup a CSP handler does), so this runs
        // after `problem` exists rather than being folded into the loop above.
        if let Some(g) = goal {
            problem.goal_relevant = g.goal_relevant_atoms(&problem).into_iter().collect();
        }

        Ok(problem)
    }
}

fn domain_of(symbols: &SymbolTable, ret: &ReturnType) -> Vec<Value> {
    match *ret {
        ReturnType::Bool => vec![Value::Bool(false), Value::Bool(true)],
        ReturnType::Sym(t) => symbols.instances_of_type(t).into_iter().map(Value::Obj).collect(),
        ReturnType::Int(lo, hi) => (lo..=hi).map(Value::Int).collect(),
    }
}
