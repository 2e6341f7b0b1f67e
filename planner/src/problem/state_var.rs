use crate::problem::signature::FnId;
use planner_collections::create_ref_type;
use planner_symbols::SymId;
use smallvec::SmallVec;

create_ref_type!(VarId);

/// A grounded state variable, e.g. `(on b1)` or `(fuel-level rover1)`: a
/// function symbol fully applied to object arguments.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StateVar {
    pub function: FnId,
    pub args: SmallVec<[SymId; 4]>,
}

impl StateVar {
    pub fn new(function: FnId, args: impl Into<SmallVec<[SymId; 4]>>) -> Self {
        StateVar {
            function,
            args: args.into(),
        }
    }
}
