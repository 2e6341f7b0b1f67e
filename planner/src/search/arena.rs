//! Search-tree nodes, stored by unique ownership in a dense arena instead of
//! reference-counted parent pointers (§9 design notes).

use crate::plan::Plan;
use crate::problem::{ActionId, State};
use planner_collections::create_ref_type;
use planner_collections::ref_store::RefStore;

create_ref_type!(NodeId);

pub struct Node {
    pub state: State,
    pub parent: Option<NodeId>,
    /// The action applied to `parent`'s state to reach this node; `None` only
    /// for the root.
    pub incoming: Option<ActionId>,
    pub depth: u32,
}

#[derive(Default)]
pub struct Arena {
    nodes: RefStore<NodeId, Node>,
}

impl Arena {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn push_root(&mut self, state: State) -> NodeId {
        self.nodes.push(Node {
            state,
            parent: None,
            incoming: None,
            depth: 0,
        })
    }

    pub fn push_child(&mut self, parent: NodeId, state: State, action: ActionId) -> NodeId {
        let depth = self.nodes[parent].depth + 1;
        self.nodes.push(Node {
            state,
            parent: Some(parent),
            incoming: Some(action),
            depth,
        })
    }

    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Walks parent pointers back to the root, returning the plan in
    /// application order.
    pub fn extract_plan(&self, mut id: NodeId) -> Plan {
        let mut actions = Vec::new();
        loop {
            let node = &self.nodes[id];
            match (node.incoming, node.parent) {
                (Some(action), Some(parent)) => {
                    actions.push(action);
                    id = parent;
                }
                _ => break,
            }
        }
        actions.reverse();
        Plan { actions }
    }
}
