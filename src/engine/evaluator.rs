// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Expression evaluation over value slots.
//!
//! A value slot holds the root of an expression tree. Evaluating it resolves
//! the node's generator, runs the resulting task and unwraps any
//! [`TaskOutput::Deferred`] it hands back, at most `max_unwrap_depth` times.
//! Every failure is caught here: the caller gets its default back and an
//! [`EvaluationFallback`] is logged.

use std::sync::Arc;

use crate::errors::{EvaluationError, RegistryError};
use crate::graph::{GraphModel, NodeId};
use crate::observability::messages::engine::EvaluationFallback;
use crate::observability::messages::StructuredLog;
use crate::traits::{Task, TaskOutput};
use crate::types::Value;

use super::context::{RunContext, RunStats};

/// Conversion from an evaluated [`Value`] into a concrete Rust type.
pub trait FromValue: Sized {
    /// `None` when the value has no sensible reading as `Self`.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for Value {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> Option<Self> {
        value.as_number()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.is_truthy())
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> Option<Self> {
        Some(value.to_text())
    }
}

impl<'a> RunContext<'a> {
    /// Resolve the generator for `id` and create its task.
    pub fn resolve_task(&self, id: NodeId) -> Result<Arc<dyn Task>, RegistryError> {
        let node = self.node(id).ok_or(RegistryError::MissingNode { node: id })?;
        let factory = self.runtime().registry().resolve(node.node_type())?;
        Ok(factory.create(node))
    }

    /// Value of the expression in `slot` of `node`, or `default` when the
    /// slot is empty, yields nothing, or fails to evaluate.
    pub async fn evaluate(&self, node: NodeId, slot: &str, default: Value) -> Value {
        match self.try_evaluate(node, slot).await {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(error) => {
                let node_id = self.node(node).map(|n| n.id()).unwrap_or("<unknown>");
                EvaluationFallback {
                    node_id,
                    slot,
                    error: &error,
                }
                .log();
                RunStats::bump(&self.stats.evaluation_fallbacks);
                default
            }
        }
    }

    /// Like [`evaluate`](Self::evaluate), converted through [`FromValue`].
    /// A value with no reading as `T` also yields `default`.
    pub async fn evaluate_as<T: FromValue + Send>(&self, node: NodeId, slot: &str, default: T) -> T {
        match self.evaluate(node, slot, Value::Null).await {
            Value::Null => default,
            value => T::from_value(&value).unwrap_or(default),
        }
    }

    /// Evaluate the expression in `slot`, surfacing failures.
    ///
    /// `Ok(None)` means no expression is connected, or it produced no value.
    pub async fn try_evaluate(&self, node: NodeId, slot: &str) -> Result<Option<Value>, EvaluationError> {
        match self.program().value_input(node, slot) {
            Some(expr) => self.evaluate_node(expr.index()).await,
            None => Ok(None),
        }
    }

    /// Run the expression rooted at `expr` and unwrap its output.
    pub async fn evaluate_node(&self, expr: NodeId) -> Result<Option<Value>, EvaluationError> {
        let task = self.resolve_task(expr)?;
        let max_depth = self.options().max_unwrap_depth;

        let mut output = task.run(self).await?;
        let mut depth = 0;
        loop {
            match output {
                TaskOutput::Unit => return Ok(None),
                TaskOutput::Value(value) => return Ok(Some(value)),
                TaskOutput::Deferred(inner) => {
                    depth += 1;
                    if depth > max_depth {
                        return Err(EvaluationError::DepthExceeded { max_depth });
                    }
                    output = inner.run(self).await.map_err(EvaluationError::from)?;
                }
            }
        }
    }
}
