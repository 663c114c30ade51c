// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised while resolving, evaluating and running blocks.
//!
//! None of these abort a run. The engine logs them and recovers locally:
//! unknown nodes are skipped, failed evaluations fall back to the caller's
//! default and failed tasks are passed over by the sequence loop.

use thiserror::Error;

use crate::graph::NodeId;

/// A node could not be turned into a task.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("no generator registered for node type '{node_type}'")]
    UnknownNodeType { node_type: String },

    #[error("node {node} is not part of the running program")]
    MissingNode { node: NodeId },
}

/// Evaluating a value slot did not produce a value.
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error(transparent)]
    UnknownNodeType(#[from] RegistryError),

    #[error("value did not settle within {max_depth} unwrap steps")]
    DepthExceeded { max_depth: usize },

    #[error("expression task failed: {0}")]
    Task(#[from] TaskError),
}

/// A task failed while running.
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("command dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    #[error("{0}")]
    Failed(String),
}

/// A command could not be handed to the bridge.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("bridge channel closed before '{command}' was delivered")]
    ChannelClosed { command: String },

    #[error("bridge dropped the acknowledgement for '{command}'")]
    AckDropped { command: String },

    #[error("failed to encode command: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write command: {0}")]
    Io(#[from] std::io::Error),
}

/// The editor handed over a program that cannot be snapshotted.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProgramError {
    #[error("node id '{id}' appears more than once in the program")]
    DuplicateNodeId { id: String },
}
