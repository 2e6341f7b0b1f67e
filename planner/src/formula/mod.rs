//! Formula/Term AST (§4.C): the typed expression language used for action
//! preconditions, effects and the goal formula.
//!
//! Functional STRIPS treats state variables as terms rather than atoms: a
//! predicate application is just a boolean-valued function. `Formula` is kept
//! in negation-normal form (negation only ever appears on an atomic leaf, via
//! its `positive` flag) so that CSP translation (§4.D) never has to push
//! negations through connectives itself.

mod eval;

pub use eval::Binding;

use crate::problem::{FnId, ProblemIndex, Value, VarId};
use planner_symbols::SymId;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum CompareOp {
    Eq,
    Neq,
    Lt,
    Leq,
    Gt,
    Geq,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// A term of the functional STRIPS language. Evaluates to a [`Value`] under a
/// `(binding, state)` pair (see [`eval`]).
#[derive(Clone, Debug)]
pub enum Term {
    Constant(Value),
    ObjectConstant(SymId),
    /// The `i`-th parameter of the enclosing action schema, still unbound.
    BoundVariable(usize),
    /// A fully-ground state variable: read directly from the state.
    StateVariableRef(VarId),
    /// `symbol(subterms...)`, not yet resolved to a concrete state variable
    /// because one or more subterms still contain a `BoundVariable`.
    NestedTerm(FnId, Vec<Term>),
    Compare(CompareOp, Box<Term>, Box<Term>),
    Arith(ArithOp, Box<Term>, Box<Term>),
}

impl Term {
    /// Collects every sub-term reachable from `self`, including `self`.
    pub fn all_terms(&self) -> Vec<&Term> {
        let mut out = Vec::new();
        self.collect_terms(&mut out);
        out
    }

    fn collect_terms<'a>(&'a self, out: &mut Vec<&'a Term>) {
        out.push(self);
        match self {
            Term::Constant(_) | Term::ObjectConstant(_) | Term::BoundVariable(_) | Term::StateVariableRef(_) => {}
            Term::NestedTerm(_, args) => args.iter().for_each(|a| a.collect_terms(out)),
            Term::Compare(_, a, b) | Term::Arith(_, a, b) => {
                a.collect_terms(out);
                b.collect_terms(out);
            }
        }
    }

    /// Free (unbound) parameter indices referenced anywhere in this term.
    pub fn free_variables(&self) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .all_terms()
            .into_iter()
            .filter_map(|t| match t {
                Term::BoundVariable(i) => Some(*i),
                _ => None,
            })
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Materializes a (possibly partial) clone with every `BoundVariable(i)`
    /// for which `params[i]` is `Some` replaced by the corresponding constant.
    /// Indices beyond `params.len()`, or mapped to `None`, are left free.
    pub fn bind(&self, params: &[Option<SymId>]) -> Term {
        match self {
            Term::Constant(_) | Term::ObjectConstant(_) | Term::StateVariableRef(_) => self.clone(),
            Term::BoundVariable(i) => match params.get(*i).copied().flatten() {
                Some(obj) => Term::ObjectConstant(obj),
                None => self.clone(),
            },
            Term::NestedTerm(f, args) => Term::NestedTerm(*f, args.iter().map(|a| a.bind(params)).collect()),
            Term::Compare(op, a, b) => Term::Compare(*op, Box::new(a.bind(params)), Box::new(b.bind(params))),
            Term::Arith(op, a, b) => Term::Arith(*op, Box::new(a.bind(params)), Box::new(b.bind(params))),
        }
    }

    /// The value of a term that does not depend on any state, i.e. a literal
    /// constant or an object constant. Returns `None` for anything else
    /// (state-dependent terms must go through [`Term::evaluate`] instead).
    pub fn as_ground_value(&self) -> Option<Value> {
        match self {
            Term::Constant(v) => Some(*v),
            Term::ObjectConstant(o) => Some(Value::Obj(*o)),
            _ => None,
        }
    }

    /// Resolves a fully-ground `NestedTerm`/`StateVariableRef` to its `VarId`,
    /// or `None` if the term still has free variables or is not state-variable-shaped.
    pub fn resolve_state_variable(&self, problem: &ProblemIndex) -> Option<VarId> {
        match self {
            Term::StateVariableRef(v) => Some(*v),
            Term::NestedTerm(f, args) => {
                let objs: Option<smallvec::SmallVec<[SymId; 4]>> = args
                    .iter()
                    .map(|a| match a {
                        Term::ObjectConstant(o) => Some(*o),
                        _ => None,
                    })
                    .collect();
                let sv = crate::problem::StateVar::new(*f, objs?);
                problem.variable_of(&sv)
            }
            _ => None,
        }
    }
}

/// An atomic (non-decomposable) formula: `term (=|/=) value` under a polarity
/// flag. The common case `predicate(args...)` is represented as
/// `Atomic(NestedTerm(predicate, args), Constant(Bool(true)), positive)`.
#[derive(Clone, Debug)]
pub struct AtomicFormula {
    pub term: Term,
    pub value: Term,
    pub positive: bool,
}

#[derive(Clone, Debug)]
pub enum Formula {
    Atomic(AtomicFormula),
    And(Vec<Formula>),
    Or(Vec<Formula>),
    /// Existential quantification over freshly-introduced parameters, one per
    /// listed type; the body references them via `BoundVariable` indices that
    /// continue numbering after the enclosing schema's own parameters.
    Exists(Vec<planner_symbols::TypeId>, Box<Formula>),
}

impl Formula {
    pub fn atom(term: Term, value: Term, positive: bool) -> Formula {
        Formula::Atomic(AtomicFormula { term, value, positive })
    }

    pub fn predicate(predicate: FnId, args: Vec<Term>, positive: bool) -> Formula {
        Formula::atom(Term::NestedTerm(predicate, args), Term::Constant(Value::Bool(true)), positive)
    }

    pub fn and(parts: Vec<Formula>) -> Formula {
        Formula::And(parts)
    }

    /// All atomic sub-formulas, recursively (existential bodies included).
    pub fn all_atoms(&self) -> Vec<&AtomicFormula> {
        let mut out = Vec::new();
        self.collect_atoms(&mut out);
        out
    }

    fn collect_atoms<'a>(&'a self, out: &mut Vec<&'a AtomicFormula>) {
        match self {
            Formula::Atomic(a) => out.push(a),
            Formula::And(parts) | Formula::Or(parts) => parts.iter().for_each(|p| p.collect_atoms(out)),
            Formula::Exists(_, body) => body.collect_atoms(out),
        }
    }

    pub fn free_variables(&self) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .all_atoms()
            .into_iter()
            .flat_map(|a| a.term.free_variables().into_iter().chain(a.value.free_variables()))
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }

    pub fn bind(&self, params: &[Option<SymId>]) -> Formula {
        match self {
            Formula::Atomic(a) => Formula::Atomic(AtomicFormula {
                term: a.term.bind(params),
                value: a.value.bind(params),
                positive: a.positive,
            }),
            Formula::And(parts) => Formula::And(parts.iter().map(|p| p.bind(params)).collect()),
            Formula::Or(parts) => Formula::Or(parts.iter().map(|p| p.bind(params)).collect()),
            Formula::Exists(types, body) => Formula::Exists(types.clone(), Box::new(body.bind(params))),
        }
    }

    /// For a fully-ground formula (typically the goal), the set of `(variable,
    /// value)` pairs whose truth this formula depends on. Used once at
    /// problem-construction time to tag goal-relevant atoms (§3). Resolves
    /// `NestedTerm` atoms through `problem` the same way a CSP handler would,
    /// since a ground goal is ordinarily expressed as `predicate(objects...)`
    /// rather than a pre-resolved `StateVariableRef`.
    pub fn goal_relevant_atoms(&self, problem: &ProblemIndex) -> Vec<(VarId, Value)> {
        let mut out = Vec::new();
        for a in self.all_atoms() {
            if let (Some(var), Some(val)) = (a.term.resolve_state_variable(problem), a.value.as_ground_value()) {
                out.push((var, val));
            }
        }
        out
    }
}
