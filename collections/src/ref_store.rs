//! Two flavors of dense, integer-keyed stores.
//!
//! [`RefStore`] is a plain append-only vector indexed by a `Ref` key: pushing
//! a value returns a fresh key, and there is no way to go back from a value to
//! its key. [`RefPool`] adds interning on top: pushing an already-seen value
//! returns its existing key instead of allocating a new one, which is exactly
//! the behavior the tuple index (§4.A) needs to keep the `<symbol, args...>`
//! to `TupleIdx` mapping a bijection.

use itertools::Itertools;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use std::marker::PhantomData;
use std::ops::{Deref, DerefMut, Index, IndexMut};

pub trait Ref: Into<usize> + From<usize> + Copy + PartialEq {}
impl<X> Ref for X where X: Into<usize> + From<usize> + Copy + PartialEq {}

/// An append-only store keyed by `K`: pushing a value returns a fresh key and
/// there is no way back from a value to a key (for that, use [`RefPool`]).
///
/// Plain slice operations (`len`, `is_empty`, iteration by value) are reached
/// through `Deref<Target = [V]>` rather than re-implemented here; only the
/// key-typed surface (`push`, `keys`, `entries`, indexing by `K`) is specific
/// to this type.
#[derive(Clone)]
pub struct RefStore<K, V> {
    internal: Vec<V>,
    phantom: PhantomData<K>,
}

impl<K, V> Debug for RefStore<K, V>
where
    V: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}]",
            self.internal
                .iter()
                .enumerate()
                .format_with(", ", |pair, g| g(&format_args!("{pair:?}")))
        )
    }
}

impl<K: Ref, V> Default for RefStore<K, V> {
    fn default() -> Self {
        RefStore::new()
    }
}

impl<K, V> Deref for RefStore<K, V> {
    type Target = [V];
    fn deref(&self) -> &[V] {
        &self.internal
    }
}

impl<K, V> DerefMut for RefStore<K, V> {
    fn deref_mut(&mut self) -> &mut [V] {
        &mut self.internal
    }
}

impl<K: Ref, V> RefStore<K, V> {
    pub fn new() -> Self {
        RefStore {
            internal: Vec::new(),
            phantom: Default::default(),
        }
    }

    /// Builds a store of a known size where every slot starts with the same value.
    /// Used to seed per-tuple / per-operator cost tables before a fixed-point sweep.
    pub fn initialized(len: usize, v: V) -> Self
    where
        V: Clone,
    {
        RefStore {
            internal: vec![v; len],
            phantom: Default::default(),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        (0..self.internal.len()).map(K::from)
    }

    pub fn entries(&self) -> impl Iterator<Item = (K, &V)> {
        self.keys().map(move |k| (k, &self[k]))
    }

    pub fn push(&mut self, v: V) -> K {
        let id: K = self.internal.len().into();
        self.internal.push(v);
        id
    }
}

impl<K: Ref, V> Index<K> for RefStore<K, V> {
    type Output = V;
    fn index(&self, index: K) -> &Self::Output {
        &self.internal[index.into()]
    }
}
impl<K: Ref, V> IndexMut<K> for RefStore<K, V> {
    fn index_mut(&mut self, index: K) -> &mut Self::Output {
        &mut self.internal[index.into()]
    }
}

/// A store that additionally allows recovering the key of a previously
/// inserted value (interning). Pushing a value that already exists returns
/// the previous key instead of creating a duplicate.
#[derive(Clone)]
pub struct RefPool<K, V> {
    internal: Vec<V>,
    rev: HashMap<V, K>,
}

impl<K, V> Default for RefPool<K, V> {
    fn default() -> Self {
        RefPool {
            internal: Default::default(),
            rev: HashMap::new(),
        }
    }
}

impl<K, V: Debug> Debug for RefPool<K, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}]",
            self.internal
                .iter()
                .enumerate()
                .format_with(", ", |pair, g| g(&format_args!("{pair:?}")))
        )
    }
}

impl<K: Ref, V: Eq + Hash + Clone> RefPool<K, V> {
    pub fn len(&self) -> usize {
        self.internal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.internal.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = K> {
        (0..self.len()).map(K::from)
    }

    /// Interns `v`, returning its existing key if already present or a fresh one otherwise.
    pub fn intern(&mut self, v: V) -> K {
        if let Some(&k) = self.rev.get(&v) {
            return k;
        }
        let id: K = self.internal.len().into();
        self.rev.insert(v.clone(), id);
        self.internal.push(v);
        id
    }

    pub fn get(&self, k: K) -> &V {
        &self.internal[k.into()]
    }

    pub fn get_ref<W>(&self, v: &W) -> Option<K>
    where
        W: Eq + Hash + ?Sized,
        V: Borrow<W>,
    {
        self.rev.get(v).copied()
    }
}

impl<K: Ref, V: Eq + Hash + Clone> Index<K> for RefPool<K, V> {
    type Output = V;
    fn index(&self, index: K) -> &Self::Output {
        self.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::create_ref_type;

    create_ref_type!(TestKey);

    #[test]
    fn ref_store_push_and_index() {
        let mut s: RefStore<TestKey, &str> = RefStore::new();
        let a = s.push("a");
        let b = s.push("b");
        assert_eq!(s[a], "a");
        assert_eq!(s[b], "b");
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn ref_pool_interns() {
        let mut p: RefPool<TestKey, String> = RefPool::default();
        let a1 = p.intern("foo".to_string());
        let a2 = p.intern("foo".to_string());
        let b = p.intern("bar".to_string());
        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_eq!(p.get(a1), "foo");
    }
}
