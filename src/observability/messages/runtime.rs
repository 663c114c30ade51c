// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the variable store and generator registry.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A block read or wrote a variable that was never preloaded.
///
/// # Log Level
/// `warn!` - Recoverable problem in the program
///
/// # Example
/// ```
/// use block_runner::observability::messages::runtime::VariableNotPreloaded;
///
/// let msg = VariableNotPreloaded {
///     name: "counter",
///     operation: "set",
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct VariableNotPreloaded<'a> {
    pub name: &'a str,
    pub operation: &'a str,
}

impl Display for VariableNotPreloaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Variable '{}' was never preloaded; ignoring {}",
            self.name, self.operation
        )
    }
}

impl StructuredLog for VariableNotPreloaded<'_> {
    fn log(&self) {
        tracing::warn!(
            variable = self.name,
            operation = self.operation,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "variable_not_preloaded",
            span_name = name,
            variable = self.name,
            operation = self.operation,
        )
    }
}

/// A generator registration replaced an earlier one for the same type.
///
/// # Log Level
/// `debug!` - Expected during host customization
pub struct GeneratorReplaced<'a> {
    pub node_type: &'a str,
}

impl Display for GeneratorReplaced<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Generator for node type '{}' replaced by a later registration", self.node_type)
    }
}

impl StructuredLog for GeneratorReplaced<'_> {
    fn log(&self) {
        tracing::debug!(node_type = self.node_type, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("generator_replaced", span_name = name, node_type = self.node_type)
    }
}
