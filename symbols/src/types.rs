//! Type hierarchy over which objects and action parameters are declared.
//!
//! Grounded on the aries planning model's `TypeHierarchy`: a single-rooted
//! tree of types where every declared type has exactly one parent (defaulting
//! to an implicit top type), and subtyping is a "is this type an ancestor"
//! walk up that tree.

use crate::sym::Sym;
use planner_collections::create_ref_type;
use std::collections::HashMap;
use std::fmt;

create_ref_type!(TypeId);

#[derive(Debug)]
pub struct UnknownType(pub Sym);

impl fmt::Display for UnknownType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown type: {}", self.0)
    }
}
impl std::error::Error for UnknownType {}

#[derive(Clone, Debug)]
pub struct TypeHierarchy {
    names: Vec<Sym>,
    parents: Vec<Option<TypeId>>,
    ids: HashMap<Sym, TypeId>,
}

impl TypeHierarchy {
    /// Builds a hierarchy from `(type, optional-parent)` pairs. A `None` parent is
    /// attached to an implicit top type so that every declared type is reachable
    /// from a single root (used by `is_subtype` to bound the ancestor walk).
    pub fn new(declarations: Vec<(Sym, Option<Sym>)>) -> Result<Self, UnknownType> {
        let mut h = TypeHierarchy {
            names: Vec::with_capacity(declarations.len() + 1),
            parents: Vec::with_capacity(declarations.len() + 1),
            ids: HashMap::new(),
        };
        let top = Sym::new("object");
        let top_id = h.declare_raw(top, None);
        debug_assert_eq!(top_id, TypeId::from(0usize));

        for (name, _parent) in &declarations {
            if !h.ids.contains_key(name.as_str()) {
                h.declare_raw(name.clone(), None);
            }
        }
        for (name, parent) in declarations {
            let id = h.ids[&name];
            let parent_id = match parent {
                Some(p) => *h.ids.get(&p).ok_or(UnknownType(p))?,
                None => top_id,
            };
            h.parents[usize::from(id)] = Some(parent_id);
        }
        Ok(h)
    }

    fn declare_raw(&mut self, name: Sym, parent: Option<TypeId>) -> TypeId {
        let id = TypeId::from(self.names.len());
        self.names.push(name.clone());
        self.parents.push(parent);
        self.ids.insert(name, id);
        id
    }

    pub fn top(&self) -> TypeId {
        TypeId::from(0usize)
    }

    pub fn id_of(&self, name: &str) -> Option<TypeId> {
        self.ids.get(name).copied()
    }

    pub fn name(&self, id: TypeId) -> &Sym {
        &self.names[usize::from(id)]
    }

    pub fn parent(&self, id: TypeId) -> Option<TypeId> {
        self.parents[usize::from(id)]
    }

    pub fn types(&self) -> impl Iterator<Item = TypeId> {
        (0..self.names.len()).map(TypeId::from)
    }

    /// True if `sub` is `sup` or a descendant of `sup` in the hierarchy.
    pub fn is_subtype(&self, sub: TypeId, sup: TypeId) -> bool {
        let mut cur = sub;
        loop {
            if cur == sup {
                return true;
            }
            match self.parent(cur) {
                Some(p) if p != cur => cur = p,
                _ => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtyping_walks_ancestors() {
        let h = TypeHierarchy::new(vec![
            (Sym::new("block"), None),
            (Sym::new("movable"), None),
            (Sym::new("block"), Some(Sym::new("movable"))),
        ])
        .unwrap();
        let block = h.id_of("block").unwrap();
        let movable = h.id_of("movable").unwrap();
        let top = h.top();
        assert!(h.is_subtype(block, movable));
        assert!(h.is_subtype(block, top));
        assert!(!h.is_subtype(movable, block));
    }
}
