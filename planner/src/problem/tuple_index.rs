use crate::problem::signature::FnId;
use crate::problem::value::Value;
use planner_collections::create_ref_type;
use planner_collections::ref_store::RefPool;
use smallvec::SmallVec;

create_ref_type!(TupleIdx);

type RawTuple = (FnId, SmallVec<[Value; 5]>);

/// Bijection between logical tuples `<symbol, arg-values..., value>` and a
/// dense `TupleIdx`. Every atom that can ever be reached corresponds to
/// exactly one tuple; interning it twice returns the same index (§4.A).
#[derive(Default, Clone)]
pub struct TupleIndex {
    pool: RefPool<TupleIdx, RawTuple>,
}

impl TupleIndex {
    pub fn new() -> Self {
        Default::default()
    }

    /// Interns `<symbol, values...>` and returns its dense index. `values` is
    /// the symbol's object arguments followed by the assigned value, matching
    /// the functional-STRIPS convention `f(args...) = value`.
    pub fn to_index(&mut self, symbol: FnId, values: &[Value]) -> TupleIdx {
        self.pool.intern((symbol, SmallVec::from_slice(values)))
    }

    pub fn from_index(&self, idx: TupleIdx) -> (FnId, &[Value]) {
        let (sym, values) = self.pool.get(idx);
        (*sym, values.as_slice())
    }

    pub fn len(&self) -> usize {
        self.pool.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pool.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_symbols::SymId;

    #[test]
    fn round_trips() {
        let mut idx = TupleIndex::new();
        let f = FnId::from_u32(0);
        let b1: SymId = SymId::from(0usize);
        let b2: SymId = SymId::from(1usize);
        let t1 = idx.to_index(f, &[Value::Obj(b1), Value::Obj(b2)]);
        let t2 = idx.to_index(f, &[Value::Obj(b1), Value::Obj(b2)]);
        assert_eq!(t1, t2);
        let (sym, values) = idx.from_index(t1);
        assert_eq!(sym, f);
        assert_eq!(values, &[Value::Obj(b1), Value::Obj(b2)]);
    }

    #[test]
    fn distinct_tuples_get_distinct_indices() {
        let mut idx = TupleIndex::new();
        let f = FnId::from_u32(0);
        let b1: SymId = SymId::from(0usize);
        let b2: SymId = SymId::from(1usize);
        let t1 = idx.to_index(f, &[Value::Obj(b1)]);
        let t2 = idx.to_index(f, &[Value::Obj(b2)]);
        assert_ne!(t1, t2);
    }
}
