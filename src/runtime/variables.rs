// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Named-value store shared by every task of every run on one runtime.
//!
//! Names are declared up front with [`VariableStore::preload`]; a run can
//! read and overwrite them but never create new ones. Reads and writes of an
//! undeclared name are recovered locally: `get` returns the caller's default,
//! `set` returns `false`, and neither mutates anything.

use std::collections::{BTreeMap, HashMap};
use parking_lot::RwLock;

use crate::observability::messages::runtime::VariableNotPreloaded;
use crate::observability::messages::StructuredLog;
use crate::types::Value;

#[derive(Debug, Default)]
pub struct VariableStore {
    values: RwLock<HashMap<String, Value>>,
}

impl VariableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `name` and seed it with `initial`.
    ///
    /// Preloading an already declared name keeps its current value.
    pub fn preload(&self, name: impl Into<String>, initial: impl Into<Value>) {
        let mut values = self.values.write();
        values.entry(name.into()).or_insert_with(|| initial.into());
    }

    /// Current value of `name`, or `default` (with a warning) when the name
    /// was never preloaded.
    pub fn get(&self, name: &str, default: Value) -> Value {
        let values = self.values.read();
        match values.get(name) {
            Some(value) => value.clone(),
            None => {
                VariableNotPreloaded { name, operation: "get" }.log();
                default
            }
        }
    }

    /// Overwrite a preloaded variable. Returns `false`, leaving the store
    /// untouched, when `name` was never preloaded.
    pub fn set(&self, name: &str, value: Value) -> bool {
        let mut values = self.values.write();
        match values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => {
                VariableNotPreloaded { name, operation: "set" }.log();
                false
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values
            .read()
            .contains_key(name)
    }

    /// Declared names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .values
            .read()
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Copy of every declared variable and its current value.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.values
            .read()
            .iter()
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// Forget every declared name.
    pub fn reset(&self) {
        self.values.write().clear();
    }
}
