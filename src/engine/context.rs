// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::config::EngineOptions;
use crate::errors::DispatchError;
use crate::graph::{GraphModel, NodeId, Program, ProgramNode};
use crate::observability::messages::task::CommandDispatched;
use crate::observability::messages::StructuredLog;
use crate::runtime::{Runtime, VariableStore};
use crate::types::{Command, Value};

use super::report::{RunReport, RunState};

/// Everything a task can reach while a run is in progress.
///
/// One context exists per run. It borrows the snapshotted program and the
/// runtime, and counts what happens so the engine can report it afterwards.
/// Sequencing lives in `scheduler.rs` and expression evaluation in
/// `evaluator.rs`, both as further `impl RunContext` blocks.
pub struct RunContext<'a> {
    program: &'a Program,
    runtime: &'a Runtime,
    pub(super) stats: RunStats,
}

impl<'a> RunContext<'a> {
    pub fn new(program: &'a Program, runtime: &'a Runtime) -> Self {
        Self {
            program,
            runtime,
            stats: RunStats::default(),
        }
    }

    pub fn program(&self) -> &'a Program {
        self.program
    }

    pub fn node(&self, id: NodeId) -> Option<&'a ProgramNode> {
        self.program.node(id)
    }

    /// Literal field of a node.
    pub fn field(&self, id: NodeId, name: &str) -> Option<&'a Value> {
        self.program.field(id, name)
    }

    pub fn variables(&self) -> &'a VariableStore {
        self.runtime.variables()
    }

    pub fn options(&self) -> &'a EngineOptions {
        self.runtime.options()
    }

    pub(crate) fn runtime(&self) -> &'a Runtime {
        self.runtime
    }

    /// Hand one command to the dispatcher and wait for it to be accepted.
    pub async fn dispatch(&self, command: Command) -> Result<(), DispatchError> {
        let name = command.command.clone();
        self.runtime.dispatcher().send(command).await?;

        let sequence = self.stats.commands_dispatched.fetch_add(1, Ordering::Relaxed) + 1;
        CommandDispatched {
            command: &name,
            sequence,
        }
        .log();
        Ok(())
    }

    /// Close the run and turn its counters into a report.
    pub(super) fn finish(self, duration: Duration) -> RunReport {
        self.stats.into_report(duration)
    }

    pub(crate) fn record_loop_cap(&self) {
        self.stats.loop_caps_hit.fetch_add(1, Ordering::Relaxed);
    }
}

/// Counters collected over one run.
#[derive(Debug, Default)]
pub(super) struct RunStats {
    pub(super) tasks_run: AtomicUsize,
    pub(super) tasks_failed: AtomicUsize,
    pub(super) nodes_skipped: AtomicUsize,
    pub(super) commands_dispatched: AtomicUsize,
    pub(super) evaluation_fallbacks: AtomicUsize,
    pub(super) loop_caps_hit: AtomicUsize,
}

impl RunStats {
    pub(super) fn bump(counter: &AtomicUsize) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn into_report(self, duration: Duration) -> RunReport {
        RunReport {
            state: RunState::Completed,
            tasks_run: self.tasks_run.into_inner(),
            tasks_failed: self.tasks_failed.into_inner(),
            nodes_skipped: self.nodes_skipped.into_inner(),
            commands_dispatched: self.commands_dispatched.into_inner(),
            evaluation_fallbacks: self.evaluation_fallbacks.into_inner(),
            loop_caps_hit: self.loop_caps_hit.into_inner(),
            duration,
        }
    }
}
