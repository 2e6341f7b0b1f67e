//! Action schemata and their ground instances.
//!
//! An [`ActionSchema`] is lifted: its precondition and effects reference
//! parameters via `Term::BoundVariable`. Grounding (done once, eagerly, by
//! [`crate::problem::task::TaskBuilder`]) enumerates every admissible
//! parameter combination and produces a [`GroundAction`] whose precondition
//! and effects no longer reference any free variable.

use crate::formula::Formula;
use crate::problem::value::Value;
use crate::problem::state_var::VarId;
use planner_collections::create_ref_type;
use planner_symbols::{Sym, TypeId};
use smallvec::SmallVec;

create_ref_type!(ActionId);

/// One `lhs := rhs` effect of a lifted action, prior to grounding.
#[derive(Clone, Debug)]
pub struct EffectTemplate {
    pub lhs: crate::formula::Term,
    pub rhs: crate::formula::Term,
}

#[derive(Clone, Debug)]
pub struct ActionSchema {
    pub name: Sym,
    pub params: Vec<TypeId>,
    pub precondition: Formula,
    pub effects: Vec<EffectTemplate>,
}

/// The right-hand side of a grounded effect: either a literal value fixed at
/// grounding time, or a copy of whatever another state variable holds when
/// the effect is applied (a functional "assignment" effect).
///
/// These two shapes are the ones grounding actually resolves. An effect whose
/// right-hand side is still an `Arith`/`Compare` term, or a `NestedTerm` whose
/// own arguments are not plain object constants (a fluent-valued argument,
/// e.g. `at(carry(x))`), needs a CSP variable for the argument itself — the
/// resolution machinery `examples/original_source/src/constraints/gecode/
/// handlers/lifted_effect_csp.cxx` builds — and grounding rejects it with
/// `TaskBuildError::UnresolvedReference` instead of guessing. See DESIGN.md's
/// Open Question decisions for why this is a documented scope cut rather
/// than a missing feature.
#[derive(Copy, Clone, Debug)]
pub enum EffectValue {
    Constant(Value),
    Copy(VarId),
}

#[derive(Copy, Clone, Debug)]
pub struct Effect {
    pub var: VarId,
    pub value: EffectValue,
}

impl Effect {
    pub fn resolve(&self, state: &crate::problem::State) -> Value {
        match self.value {
            EffectValue::Constant(v) => v,
            EffectValue::Copy(src) => state.get(src),
        }
    }

    /// An effect is a delete-effect, and therefore dropped by the relaxation
    /// (§4.D), exactly when it sets a boolean state variable to false.
    pub fn is_delete(&self) -> bool {
        matches!(self.value, EffectValue::Constant(Value::Bool(false)))
    }
}

/// A fully ground action instance: every parameter has been replaced by a
/// concrete object, so precondition and effects no longer reference any
/// `BoundVariable`.
#[derive(Clone, Debug)]
pub struct GroundAction {
    pub schema_name: Sym,
    pub args: SmallVec<[planner_symbols::SymId; 6]>,
    /// Exact applicability condition, used by the search harness.
    pub precondition: Formula,
    /// Positive, directly-resolvable precondition atoms, used by the RPG
    /// handlers (§4.D): negative atoms and atoms whose term could not be
    /// resolved to a plain state variable are dropped, matching the standard
    /// delete-relaxation treatment of negative information.
    pub relaxed_preconditions: Vec<(VarId, Value)>,
    pub effects: Vec<Effect>,
}

impl GroundAction {
    pub fn display_name(&self, symbols: &planner_symbols::SymbolTable) -> String {
        let args = self
            .args
            .iter()
            .map(|&a| symbols.symbol(a).to_string())
            .collect::<Vec<_>>()
            .join(" ");
        if args.is_empty() {
            format!("({})", self.schema_name.as_str().to_lowercase())
        } else {
            format!("({} {})", self.schema_name.as_str().to_lowercase(), args)
        }
    }
}
