// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::blocks::{BlockKind, BuiltinFactory};
use crate::errors::RegistryError;
use crate::observability::messages::runtime::GeneratorReplaced;
use crate::observability::messages::StructuredLog;
use crate::traits::NodeFactory;

/// Table from node type to the factory that turns a node into a task.
///
/// Populated at startup, before any run. Registering a type twice keeps the
/// later factory. There is no removal.
#[derive(Clone, Default)]
pub struct GeneratorRegistry(HashMap<String, Arc<dyn NodeFactory>>);

impl GeneratorRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Registry with every built-in block type registered, aliases included.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        let factory: Arc<dyn NodeFactory> = Arc::new(BuiltinFactory);
        for node_type in BlockKind::type_names() {
            registry.0.insert(node_type.to_string(), Arc::clone(&factory));
        }
        registry
    }

    /// Register a factory for `node_type`, replacing any earlier one.
    pub fn register<F>(&mut self, node_type: impl Into<String>, factory: F)
    where
        F: NodeFactory + 'static,
    {
        let node_type = node_type.into();
        if self.0.contains_key(&node_type) {
            GeneratorReplaced { node_type: &node_type }.log();
        }
        self.0.insert(node_type, Arc::new(factory));
    }

    /// Factory registered for `node_type`.
    pub fn resolve(&self, node_type: &str) -> Result<Arc<dyn NodeFactory>, RegistryError> {
        self.0
            .get(node_type)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownNodeType {
                node_type: node_type.to_string(),
            })
    }

    /// Check if a node type has a generator
    pub fn contains(&self, node_type: &str) -> bool {
        self.0.contains_key(node_type)
    }

    /// Registered node types in sorted order
    pub fn node_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.0.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generator_count", &self.0.len())
            .field("node_types", &self.node_types())
            .finish()
    }
}
