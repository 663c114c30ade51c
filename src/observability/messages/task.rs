// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for individual task execution.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A task returned an error; the sequence moves on to the next task.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use block_runner::errors::TaskError;
/// use block_runner::observability::messages::task::TaskExecutionFailed;
///
/// let error = TaskError::Failed("bridge offline".to_string());
/// let msg = TaskExecutionFailed {
///     task: "connect",
///     error: &error,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct TaskExecutionFailed<'a> {
    pub task: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TaskExecutionFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Task '{}' failed, continuing with the next task: {}", self.task, self.error)
    }
}

impl StructuredLog for TaskExecutionFailed<'_> {
    fn log(&self) {
        tracing::error!(
            task = self.task,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "task_failed",
            span_name = name,
            task = self.task,
            error = %self.error,
        )
    }
}

/// A command was handed to the dispatcher and acknowledged.
///
/// # Log Level
/// `debug!` - Per-command detail
pub struct CommandDispatched<'a> {
    pub command: &'a str,
    pub sequence: usize,
}

impl Display for CommandDispatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Dispatched command #{} '{}'", self.sequence, self.command)
    }
}

impl StructuredLog for CommandDispatched<'_> {
    fn log(&self) {
        tracing::debug!(
            command = self.command,
            sequence = self.sequence,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "command_dispatch",
            span_name = name,
            command = self.command,
            sequence = self.sequence,
        )
    }
}

/// A while loop hit its iteration cap and stopped.
///
/// # Log Level
/// `info!` - The loop ends normally; the run continues
pub struct LoopSafetyLimitReached<'a> {
    pub node_id: &'a str,
    pub cap: usize,
}

impl Display for LoopSafetyLimitReached<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "While loop '{}' stopped after reaching its safety cap of {} iterations",
            self.node_id, self.cap
        )
    }
}

impl StructuredLog for LoopSafetyLimitReached<'_> {
    fn log(&self) {
        tracing::info!(
            node_id = self.node_id,
            cap = self.cap,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "loop_safety_limit",
            span_name = name,
            node_id = self.node_id,
            cap = self.cap,
        )
    }
}

/// An `else` block with no preceding `if` was passed over.
///
/// # Log Level
/// `warn!` - Recoverable problem in the program
pub struct OrphanElseSkipped<'a> {
    pub task: &'a str,
}

impl Display for OrphanElseSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Skipping '{}': it does not follow an if block", self.task)
    }
}

impl StructuredLog for OrphanElseSkipped<'_> {
    fn log(&self) {
        tracing::warn!(task = self.task, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("orphan_else", span_name = name, task = self.task)
    }
}
