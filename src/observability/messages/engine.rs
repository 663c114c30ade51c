// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for run lifecycle and sequencing events.
//!
//! This module contains message types for logging events related to:
//! * Run start and completion
//! * Chain building (skipped nodes)
//! * Expression evaluation fallbacks

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A run started.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use block_runner::observability::messages::engine::RunStarted;
///
/// let msg = RunStarted {
///     root_count: 1,
///     node_count: 4,
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunStarted {
    pub root_count: usize,
    pub node_count: usize,
}

impl Display for RunStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting program run: {} root chains, {} nodes",
            self.root_count, self.node_count
        )
    }
}

impl StructuredLog for RunStarted {
    fn log(&self) {
        tracing::info!(
            root_count = self.root_count,
            node_count = self.node_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "program_run",
            span_name = name,
            root_count = self.root_count,
            node_count = self.node_count,
        )
    }
}

/// A run reached its terminal state.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use block_runner::observability::messages::engine::RunCompleted;
/// use std::time::Duration;
///
/// let msg = RunCompleted {
///     tasks_run: 12,
///     tasks_failed: 0,
///     nodes_skipped: 1,
///     commands_dispatched: 10,
///     duration: Duration::from_millis(520),
/// };
///
/// tracing::info!("{}", msg);
/// ```
pub struct RunCompleted {
    pub tasks_run: usize,
    pub tasks_failed: usize,
    pub nodes_skipped: usize,
    pub commands_dispatched: usize,
    pub duration: std::time::Duration,
}

impl Display for RunCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Program run completed: {} tasks ({} failed, {} nodes skipped), {} commands in {:?}",
            self.tasks_run, self.tasks_failed, self.nodes_skipped, self.commands_dispatched, self.duration
        )
    }
}

impl StructuredLog for RunCompleted {
    fn log(&self) {
        tracing::info!(
            tasks_run = self.tasks_run,
            tasks_failed = self.tasks_failed,
            nodes_skipped = self.nodes_skipped,
            commands_dispatched = self.commands_dispatched,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "program_run_completed",
            span_name = name,
            tasks_run = self.tasks_run,
            duration = ?self.duration,
        )
    }
}

/// A node has no registered generator and was left out of its chain.
///
/// # Log Level
/// `warn!` - Recoverable problem in the program
pub struct UnknownNodeSkipped<'a> {
    pub node_id: &'a str,
    pub node_type: &'a str,
}

impl Display for UnknownNodeSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping node '{}': no generator registered for type '{}'",
            self.node_id, self.node_type
        )
    }
}

impl StructuredLog for UnknownNodeSkipped<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            node_type = self.node_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "unknown_node",
            span_name = name,
            node_id = self.node_id,
            node_type = self.node_type,
        )
    }
}

/// Evaluating a value slot failed; the caller's default was used instead.
///
/// # Log Level
/// `warn!` - Recoverable problem in the program
///
/// # Example
/// ```
/// use block_runner::errors::EvaluationError;
/// use block_runner::observability::messages::engine::EvaluationFallback;
///
/// let error = EvaluationError::DepthExceeded { max_depth: 32 };
/// let msg = EvaluationFallback {
///     node_id: "n4",
///     slot: "COND",
///     error: &error,
/// };
///
/// tracing::warn!("{}", msg);
/// ```
pub struct EvaluationFallback<'a> {
    pub node_id: &'a str,
    pub slot: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for EvaluationFallback<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Evaluating slot '{}' of node '{}' failed, using default: {}",
            self.slot, self.node_id, self.error
        )
    }
}

impl StructuredLog for EvaluationFallback<'_> {
    fn log(&self) {
        tracing::warn!(
            node_id = self.node_id,
            slot = self.slot,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "evaluation_fallback",
            span_name = name,
            node_id = self.node_id,
            slot = self.slot,
        )
    }
}
