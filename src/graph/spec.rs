// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::types::Value;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Owned description of one block and everything attached to it.
///
/// This is the shape the editor hands over: a tree where value slots hold
/// expression subtrees, statement slots hold the head of a nested chain and
/// `next` continues the current chain. It is snapshotted into a
/// [`Program`](super::Program) before a run.
///
/// # Example
/// ```yaml
/// type: repeat_loop
/// values:
///   TIMES: { type: math_number, fields: { NUM: 3 } }
/// statements:
///   DO:
///     type: log_block
///     values:
///       TEXT: { type: text_literal, fields: { TEXT: "tick" } }
/// next:
///   type: disconnect
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeSpec {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub fields: BTreeMap<String, Value>,
    #[serde(default)]
    pub values: BTreeMap<String, NodeSpec>,
    #[serde(default)]
    pub statements: BTreeMap<String, NodeSpec>,
    #[serde(default)]
    pub next: Option<Box<NodeSpec>>,
}

impl NodeSpec {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            id: None,
            node_type: node_type.into(),
            fields: BTreeMap::new(),
            values: BTreeMap::new(),
            statements: BTreeMap::new(),
            next: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Attach an expression subtree to a value slot.
    pub fn value(mut self, slot: impl Into<String>, node: NodeSpec) -> Self {
        self.values.insert(slot.into(), node);
        self
    }

    /// Attach the head of a nested chain to a statement slot.
    pub fn statement(mut self, slot: impl Into<String>, head: NodeSpec) -> Self {
        self.statements.insert(slot.into(), head);
        self
    }

    /// Set the node that follows this one in its chain.
    pub fn then(mut self, next: NodeSpec) -> Self {
        self.next = Some(Box::new(next));
        self
    }

    /// Link nodes into one chain through `next`, returning its head.
    ///
    /// Any `next` already set on the given nodes is replaced.
    pub fn chain(nodes: impl IntoIterator<Item = NodeSpec>) -> Option<NodeSpec> {
        let nodes: Vec<NodeSpec> = nodes.into_iter().collect();
        nodes.into_iter().rev().fold(None, |tail, mut node| {
            node.next = tail.map(Box::new);
            Some(node)
        })
    }

    /// Number of nodes in the chain starting here, slots excluded.
    pub fn chain_len(&self) -> usize {
        let mut count = 0;
        let mut cursor = Some(self);
        while let Some(node) = cursor {
            count += 1;
            cursor = node.next.as_deref();
        }
        count
    }
}
