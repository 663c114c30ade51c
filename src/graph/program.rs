// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Immutable arena snapshot of a block program.
//!
//! The engine never walks the editor's live objects. Before a run the program
//! tree is copied into a flat `Vec<ProgramNode>` where every link (`next`,
//! value slots, statement slots) is a [`NodeId`] index. The snapshot is built
//! from an owned tree, so every node sits in exactly one position and no
//! cycle can exist.

use std::collections::{BTreeMap, HashSet};

use crate::errors::ProgramError;
use crate::graph::NodeSpec;
use crate::types::Value;

/// Index of a node inside one [`Program`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One block inside a snapshotted program.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramNode {
    index: NodeId,
    id: String,
    node_type: String,
    fields: BTreeMap<String, Value>,
    value_slots: BTreeMap<String, NodeId>,
    statement_slots: BTreeMap<String, NodeId>,
    next: Option<NodeId>,
}

impl ProgramNode {
    pub fn index(&self) -> NodeId {
        self.index
    }

    /// Editor-facing identifier (given or generated).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn node_type(&self) -> &str {
        &self.node_type
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn value_slot(&self, slot: &str) -> Option<NodeId> {
        self.value_slots.get(slot).copied()
    }

    pub fn statement_slot(&self, slot: &str) -> Option<NodeId> {
        self.statement_slots.get(slot).copied()
    }
}

/// Read-only lookups the engine performs over a program.
pub trait GraphModel {
    fn node(&self, id: NodeId) -> Option<&ProgramNode>;

    /// The node following `id` in its chain.
    fn next_statement(&self, id: NodeId) -> Option<&ProgramNode> {
        self.node(id)?.next.and_then(|next| self.node(next))
    }

    /// Head of the chain held in a statement slot.
    fn statement_input(&self, id: NodeId, slot: &str) -> Option<&ProgramNode> {
        self.node(id)?.statement_slot(slot).and_then(|head| self.node(head))
    }

    /// Root of the expression held in a value slot.
    fn value_input(&self, id: NodeId, slot: &str) -> Option<&ProgramNode> {
        self.node(id)?.value_slot(slot).and_then(|expr| self.node(expr))
    }

    fn field(&self, id: NodeId, name: &str) -> Option<&Value> {
        self.node(id)?.field(name)
    }
}

/// A snapshotted block program: the node arena plus its root chains in
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    nodes: Vec<ProgramNode>,
    roots: Vec<NodeId>,
}

impl Program {
    /// Copy the editor's root chains into an arena.
    ///
    /// Nodes without an id get `n<index>`; an explicit id used twice is an
    /// error.
    pub fn snapshot(roots: &[NodeSpec]) -> Result<Self, ProgramError> {
        let mut builder = SnapshotBuilder::default();
        let mut root_ids = Vec::with_capacity(roots.len());
        for root in roots {
            root_ids.push(builder.insert_chain(root)?);
        }

        Ok(Self {
            nodes: builder.nodes,
            roots: root_ids,
        })
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &ProgramNode> {
        self.nodes.iter()
    }

    /// Look a node up by its editor id.
    pub fn find(&self, id: &str) -> Option<&ProgramNode> {
        self.nodes.iter().find(|node| node.id == id)
    }
}

impl GraphModel for Program {
    fn node(&self, id: NodeId) -> Option<&ProgramNode> {
        self.nodes.get(id.0)
    }
}

#[derive(Default)]
struct SnapshotBuilder {
    nodes: Vec<ProgramNode>,
    seen_ids: HashSet<String>,
}

impl SnapshotBuilder {
    /// Insert a chain, walking `next` iteratively. Slots recurse, so only
    /// nesting depth (not chain length) uses the call stack.
    fn insert_chain(&mut self, head: &NodeSpec) -> Result<NodeId, ProgramError> {
        let head_id = self.insert_node(head)?;
        let mut previous = head_id;
        let mut cursor = head.next.as_deref();

        while let Some(spec) = cursor {
            let id = self.insert_node(spec)?;
            self.nodes[previous.0].next = Some(id);
            previous = id;
            cursor = spec.next.as_deref();
        }

        Ok(head_id)
    }

    fn insert_node(&mut self, spec: &NodeSpec) -> Result<NodeId, ProgramError> {
        let index = NodeId(self.nodes.len());
        let id = match &spec.id {
            Some(id) => id.clone(),
            None => format!("n{}", index.0),
        };
        if !self.seen_ids.insert(id.clone()) {
            return Err(ProgramError::DuplicateNodeId { id });
        }

        self.nodes.push(ProgramNode {
            index,
            id,
            node_type: spec.node_type.clone(),
            fields: spec.fields.clone(),
            value_slots: BTreeMap::new(),
            statement_slots: BTreeMap::new(),
            next: None,
        });

        for (slot, expr) in &spec.values {
            let child = self.insert_chain(expr)?;
            self.nodes[index.0].value_slots.insert(slot.clone(), child);
        }
        for (slot, body) in &spec.statements {
            let child = self.insert_chain(body)?;
            self.nodes[index.0].statement_slots.insert(slot.clone(), child);
        }

        Ok(index)
    }
}
