//! Evaluation of terms and formulas against a `(binding, state)` pair.
//!
//! Per §4.C, evaluating a term against a binding that doesn't type-check
//! against its signature (an unbound parameter reached at evaluation time, an
//! arithmetic op applied to a symbolic value, ...) is a programmer error: the
//! caller is expected to have checked applicability/groundedness first, so we
//! panic rather than thread an error through every call site.

use super::{ArithOp, AtomicFormula, CompareOp, Formula, Term};
use crate::problem::{ProblemIndex, State, Value};
use planner_symbols::SymId;

/// The action parameter assignment a term is evaluated under. `None` means
/// the parameter is still free; evaluating a `BoundVariable` that resolves to
/// `None` is the programmer-error case described above.
pub struct Binding<'a> {
    params: &'a [Option<SymId>],
}

impl<'a> Binding<'a> {
    pub fn new(params: &'a [Option<SymId>]) -> Self {
        Binding { params }
    }

    pub fn empty() -> Binding<'static> {
        Binding { params: &[] }
    }

    pub fn get(&self, i: usize) -> Option<SymId> {
        self.params.get(i).copied().flatten()
    }
}

impl Term {
    pub fn evaluate(&self, binding: &Binding, state: &State, problem: &ProblemIndex) -> Value {
        match self {
            Term::Constant(v) => *v,
            Term::ObjectConstant(o) => Value::Obj(*o),
            Term::BoundVariable(i) => {
                let obj = binding
                    .get(*i)
                    .unwrap_or_else(|| panic!("evaluate: parameter {i} is unbound"));
                Value::Obj(obj)
            }
            Term::StateVariableRef(v) => state.get(*v),
            Term::NestedTerm(f, args) => {
                let values: smallvec::SmallVec<[SymId; 4]> = args
                    .iter()
                    .map(|a| match a.evaluate(binding, state, problem) {
                        Value::Obj(o) => o,
                        other => panic!("evaluate: expected an object argument, got {other:?}"),
                    })
                    .collect();
                let sv = crate::problem::StateVar::new(*f, values);
                let var = problem
                    .variable_of(&sv)
                    .unwrap_or_else(|| panic!("evaluate: no state variable for {sv:?}"));
                state.get(var)
            }
            Term::Compare(op, a, b) => {
                let va = a.evaluate(binding, state, problem);
                let vb = b.evaluate(binding, state, problem);
                Value::Bool(compare(*op, va, vb))
            }
            Term::Arith(op, a, b) => {
                let va = a
                    .evaluate(binding, state, problem)
                    .as_int()
                    .unwrap_or_else(|| panic!("evaluate: arithmetic op on a non-integer term"));
                let vb = b
                    .evaluate(binding, state, problem)
                    .as_int()
                    .unwrap_or_else(|| panic!("evaluate: arithmetic op on a non-integer term"));
                Value::Int(arith(*op, va, vb))
            }
        }
    }
}

fn compare(op: CompareOp, a: Value, b: Value) -> bool {
    match op {
        CompareOp::Eq => a == b,
        CompareOp::Neq => a != b,
        CompareOp::Lt => int_of(a) < int_of(b),
        CompareOp::Leq => int_of(a) <= int_of(b),
        CompareOp::Gt => int_of(a) > int_of(b),
        CompareOp::Geq => int_of(a) >= int_of(b),
    }
}

fn int_of(v: Value) -> i32 {
    v.as_int().unwrap_or_else(|| panic!("evaluate: ordered comparison on a non-integer value {v:?}"))
}

fn arith(op: ArithOp, a: i32, b: i32) -> i32 {
    match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => a / b,
    }
}

impl AtomicFormula {
    pub fn evaluate(&self, binding: &Binding, state: &State, problem: &ProblemIndex) -> bool {
        let truth = self.term.evaluate(binding, state, problem) == self.value.evaluate(binding, state, problem);
        truth == self.positive
    }
}

impl Formula {
    /// Evaluates a formula that is either fully ground, or fully bound by
    /// `binding`; `Exists` is resolved by enumerating the quantified type's
    /// instances since the search spaces involved (action/effect arities)
    /// are small.
    pub fn satisfied(&self, binding: &Binding, state: &State, problem: &ProblemIndex) -> bool {
        match self {
            Formula::Atomic(a) => a.evaluate(binding, state, problem),
            Formula::And(parts) => parts.iter().all(|p| p.satisfied(binding, state, problem)),
            Formula::Or(parts) => parts.iter().any(|p| p.satisfied(binding, state, problem)),
            Formula::Exists(types, body) => {
                let base = binding.params.len();
                exists_holds(types, 0, base, &mut Vec::new(), binding, body, state, problem)
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn exists_holds(
    types: &[planner_symbols::TypeId],
    i: usize,
    base: usize,
    extra: &mut Vec<Option<SymId>>,
    outer: &Binding,
    body: &Formula,
    state: &State,
    problem: &ProblemIndex,
) -> bool {
    if i == types.len() {
        let mut params: Vec<Option<SymId>> = outer.params.to_vec();
        params.extend(extra.iter().copied());
        let _ = base;
        return body.satisfied(&Binding::new(&params), state, problem);
    }
    for obj in problem.symbols.instances_of_type(types[i]) {
        extra.push(Some(obj));
        if exists_holds(types, i + 1, base, extra, outer, body, state, problem) {
            extra.pop();
            return true;
        }
        extra.pop();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::Value;

    #[test]
    fn atomic_formula_respects_polarity() {
        let problem = crate::test_support::blocks_world_problem();
        let state = crate::test_support::blocks_world_initial(&problem);
        let b1 = problem.symbols.id("b1").unwrap();
        let t = problem.symbols.id("table").unwrap();
        let on = crate::test_support::fn_id(&problem, "on");
        let var = problem
            .variable_of(&crate::problem::StateVar::new(on, smallvec::smallvec![b1]))
            .unwrap();
        let f = Formula::atom(Term::StateVariableRef(var), Term::Constant(Value::Obj(t)), true);
        assert!(f.satisfied(&Binding::empty(), &state, &problem));
        let not_f = Formula::atom(Term::StateVariableRef(var), Term::Constant(Value::Obj(t)), false);
        assert!(!not_f.satisfied(&Binding::empty(), &state, &problem));
    }
}
