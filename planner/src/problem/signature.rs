use planner_collections::create_ref_type;
use planner_symbols::{Sym, TypeId};

create_ref_type!(FnId);

/// What a state function returns, and therefore what values its state
/// variables may be assigned.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ReturnType {
    /// A predicate: `Value::Bool`.
    Bool,
    /// An object-valued fluent, ranging over instances of the given type.
    Sym(TypeId),
    /// A bounded-integer fluent (inclusive bounds).
    Int(i32, i32),
}

/// Typed signature of a predicate or function symbol, e.g. `on: block x block -> bool`
/// or `fuel-level: rover -> [0, 100]`.
#[derive(Clone, Debug)]
pub struct Signature {
    pub name: Sym,
    pub arg_types: Vec<TypeId>,
    pub ret: ReturnType,
}

impl Signature {
    pub fn arity(&self) -> usize {
        self.arg_types.len()
    }

    pub fn is_predicate(&self) -> bool {
        matches!(self.ret, ReturnType::Bool)
    }
}
