//! RPG Bookkeeping (§4.E): per-tuple first-reached layer and support,
//! plus the novel set being accumulated at the current layer.

use crate::problem::{ActionId, TupleIdx};
use std::collections::HashMap;

/// The justification for a tuple becoming reachable: the action instance
/// whose effect produced it, and the tuples its precondition depended on
/// (every one of which is guaranteed to have first appeared at a strictly
/// earlier layer).
#[derive(Clone, Debug)]
pub struct Support {
    pub action: ActionId,
    pub depends_on: Vec<TupleIdx>,
}

#[derive(Clone, Debug)]
struct Entry {
    first_layer: u32,
    support: Option<Support>,
}

pub struct Bookkeeping {
    layer: u32,
    reached: HashMap<TupleIdx, Entry>,
    novel: Vec<(TupleIdx, Support)>,
}

impl Bookkeeping {
    /// Seeds layer 0 from `seed_tuples`: each has first_layer = 0 and no support.
    pub fn seeded(seed_tuples: impl IntoIterator<Item = TupleIdx>) -> Self {
        let mut reached = HashMap::new();
        for t in seed_tuples {
            reached.insert(
                t,
                Entry {
                    first_layer: 0,
                    support: None,
                },
            );
        }
        Bookkeeping {
            layer: 0,
            reached,
            novel: Vec::new(),
        }
    }

    pub fn current_layer(&self) -> u32 {
        self.layer
    }

    pub fn reached(&self, t: TupleIdx) -> bool {
        self.reached.contains_key(&t)
    }

    /// The layer at which `t` first became reachable. Tuples in the current
    /// sweep's still-unflushed novel set report `current_layer() + 1`, since
    /// the extractor (§4.F) must be able to walk through a goal cause the
    /// instant the goal becomes true, before `advance_layer` runs.
    pub fn first_layer(&self, t: TupleIdx) -> Option<u32> {
        if let Some(e) = self.reached.get(&t) {
            return Some(e.first_layer);
        }
        if self.novel.iter().any(|(nt, _)| *nt == t) {
            return Some(self.layer + 1);
        }
        None
    }

    pub fn support(&self, t: TupleIdx) -> Option<&Support> {
        if let Some(e) = self.reached.get(&t) {
            return e.support.as_ref();
        }
        self.novel.iter().find(|(nt, _)| *nt == t).map(|(_, s)| s)
    }

    /// Records `t` as achievable via `support`, at layer `current + 1`, unless
    /// it is already reached (at this or an earlier layer) — first support
    /// wins, later ones are discarded, matching the handler visitation order
    /// determinism guaranteed by §5.
    pub fn add(&mut self, t: TupleIdx, action: ActionId, support: Vec<TupleIdx>) {
        if self.reached.contains_key(&t) {
            return;
        }
        if self.novel.iter().any(|(nt, _)| *nt == t) {
            return;
        }
        self.novel.push((t, Support { action, depends_on: support }));
    }

    pub fn num_novel(&self) -> usize {
        self.novel.len()
    }

    pub fn novel_tuples(&self) -> impl Iterator<Item = TupleIdx> + '_ {
        self.novel.iter().map(|(t, _)| *t)
    }

    /// Flushes the novel set into the reached map under layer `current + 1`
    /// and advances the layer counter.
    pub fn advance_layer(&mut self) {
        let new_layer = self.layer + 1;
        for (t, support) in self.novel.drain(..) {
            self.reached.entry(t).or_insert(Entry {
                first_layer: new_layer,
                support: Some(support),
            });
        }
        self.layer = new_layer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_tuples_have_layer_zero_and_no_support() {
        let t = TupleIdx::from_u32(0);
        let bk = Bookkeeping::seeded([t]);
        assert_eq!(bk.first_layer(t), Some(0));
        assert!(bk.support(t).is_none());
    }

    #[test]
    fn add_then_advance_sets_next_layer() {
        let mut bk = Bookkeeping::seeded([]);
        let a = ActionId::from_u32(0);
        let t = TupleIdx::from_u32(5);
        bk.add(t, a, vec![]);
        assert_eq!(bk.num_novel(), 1);
        assert!(!bk.reached(t));
        bk.advance_layer();
        assert_eq!(bk.first_layer(t), Some(1));
        assert_eq!(bk.num_novel(), 0);
    }

    #[test]
    fn already_reached_tuple_is_not_re_added() {
        let t = TupleIdx::from_u32(1);
        let mut bk = Bookkeeping::seeded([t]);
        bk.add(t, ActionId::from_u32(0), vec![]);
        assert_eq!(bk.num_novel(), 0);
    }
}
