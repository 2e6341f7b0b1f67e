//! Table of declared objects (typed symbols), keyed by a dense [`SymId`].
//!
//! Grounded on the aries planning model's `SymbolTable` / `ContiguousSymbols`:
//! objects are grouped by their exact type so that `instances_of_type` can
//! return a contiguous range instead of a filtered scan, which matters since
//! it is called once per action parameter while grounding action schemas.

use crate::sym::Sym;
use crate::types::{TypeHierarchy, TypeId};
use planner_collections::create_ref_type;
use std::collections::HashMap;
use std::fmt;

create_ref_type!(SymId);

/// A contiguous half-open range `[first, after_last)` of object ids, all of the
/// same exact type. Doubles as the domain of an action parameter at grounding time.
#[derive(Copy, Clone, Debug)]
pub struct ContiguousSymbols {
    first: usize,
    after_last: usize,
}

impl ContiguousSymbols {
    pub fn empty() -> Self {
        ContiguousSymbols {
            first: 0,
            after_last: 0,
        }
    }
    pub fn singleton(item: SymId) -> Self {
        let i: usize = item.into();
        ContiguousSymbols {
            first: i,
            after_last: i + 1,
        }
    }
    pub fn len(&self) -> usize {
        self.after_last.saturating_sub(self.first)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn contains(&self, sym: SymId) -> bool {
        let i: usize = sym.into();
        self.first <= i && i < self.after_last
    }
}

impl Iterator for ContiguousSymbols {
    type Item = SymId;
    fn next(&mut self) -> Option<SymId> {
        if self.first < self.after_last {
            let id = SymId::from(self.first);
            self.first += 1;
            Some(id)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct DuplicateObject(pub Sym);
impl fmt::Display for DuplicateObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicated object: {}", self.0)
    }
}
impl std::error::Error for DuplicateObject {}

#[derive(Clone, Debug)]
pub struct SymbolTable {
    pub types: TypeHierarchy,
    names: Vec<Sym>,
    ids: HashMap<Sym, SymId>,
    symbol_type: Vec<TypeId>,
    instances_by_type: HashMap<TypeId, ContiguousSymbols>,
}

impl SymbolTable {
    /// Builds a table from the type hierarchy and a flat `(object, type)` list.
    /// Objects are re-grouped internally by type so each type's instances end
    /// up contiguous regardless of declaration order.
    pub fn new(types: TypeHierarchy, objects: Vec<(Sym, Sym)>) -> Result<Self, DuplicateObject> {
        let mut by_type: HashMap<TypeId, Vec<Sym>> = HashMap::new();
        for (name, tpe) in objects {
            let tpe_id = types.id_of(tpe.as_str()).unwrap_or_else(|| types.top());
            by_type.entry(tpe_id).or_default().push(name);
        }

        let mut table = SymbolTable {
            types,
            names: Vec::new(),
            ids: HashMap::new(),
            symbol_type: Vec::new(),
            instances_by_type: HashMap::new(),
        };

        for tpe in table.types.types().collect::<Vec<_>>() {
            let first = table.names.len();
            for name in by_type.remove(&tpe).unwrap_or_default() {
                if table.ids.contains_key(name.as_str()) {
                    return Err(DuplicateObject(name));
                }
                let id = SymId::from(table.names.len());
                table.symbol_type.push(tpe);
                table.ids.insert(name.clone(), id);
                table.names.push(name);
            }
            let after_last = table.names.len();
            table
                .instances_by_type
                .insert(tpe, ContiguousSymbols { first, after_last });
        }

        Ok(table)
    }

    pub fn symbol(&self, id: SymId) -> &Sym {
        &self.names[usize::from(id)]
    }

    pub fn id(&self, name: &str) -> Option<SymId> {
        self.ids.get(name).copied()
    }

    pub fn type_of(&self, id: SymId) -> TypeId {
        self.symbol_type[usize::from(id)]
    }

    /// All objects whose *exact* declared type is `tpe` (not including subtypes).
    pub fn instances_of_exact_type(&self, tpe: TypeId) -> ContiguousSymbols {
        self.instances_by_type.get(&tpe).copied().unwrap_or_else(ContiguousSymbols::empty)
    }

    /// All objects assignable to `tpe`, i.e. whose type is `tpe` or a subtype of it.
    /// Falls back to a scan since subtype instances need not be contiguous.
    pub fn instances_of_type(&self, tpe: TypeId) -> Vec<SymId> {
        (0..self.names.len())
            .map(SymId::from)
            .filter(|&id| self.types.is_subtype(self.type_of(id), tpe))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> SymbolTable {
        let types = TypeHierarchy::new(vec![(Sym::new("block"), None)]).unwrap();
        SymbolTable::new(
            types,
            vec![
                (Sym::new("b1"), Sym::new("block")),
                (Sym::new("b2"), Sym::new("block")),
                (Sym::new("b3"), Sym::new("block")),
            ],
        )
        .unwrap()
    }

    #[test]
    fn objects_grouped_contiguously_by_type() {
        let t = table();
        let block = t.types.id_of("block").unwrap();
        let insts = t.instances_of_exact_type(block);
        assert_eq!(insts.len(), 3);
        assert_eq!(t.symbol(t.id("b1").unwrap()).as_str(), "b1");
    }

    #[test]
    fn rejects_duplicate_object_names() {
        let types = TypeHierarchy::new(vec![(Sym::new("block"), None)]).unwrap();
        let err = SymbolTable::new(
            types,
            vec![(Sym::new("b1"), Sym::new("block")), (Sym::new("b1"), Sym::new("block"))],
        );
        assert!(err.is_err());
    }
}
