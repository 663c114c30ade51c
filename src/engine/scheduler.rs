// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Sequencing and the single-run engine.
//!
//! ## Execution model
//!
//! A run walks the program's roots in declaration order. For each root the
//! chain reachable through `next` is turned into a task sequence up front
//! (unknown node types are dropped at this point, with a warning) and the
//! sequence is drained front to back from a queue. Exactly one task is active
//! at a time: the queue awaits each task before popping the next, and a task
//! that runs a nested sequence (loops, branches, `start_block`) awaits it
//! inline.
//!
//! A task that fails is logged and counted; its siblings still run.
//!
//! ## Branch chains
//!
//! `if / else if / else` links are ordinary statements that follow each other
//! through `next`. The sequence loop tracks whether the chain currently open
//! has matched and consults each task's [`BranchRole`]:
//!
//! | role           | runs when                         | afterwards              |
//! |----------------|-----------------------------------|-------------------------|
//! | `Head`         | always                            | chain open, matched = result |
//! | `Continuation` | chain unmatched, or no chain open | matched = result        |
//! | `Terminal`     | chain open and unmatched          | chain closed            |
//! | `None`         | always                            | chain closed            |
//!
//! A terminal with no open chain is skipped and logged.
//!
//! ## Concurrency
//!
//! [`Engine::run`] holds an async mutex for the whole run, so overlapping calls
//! queue up and never interleave their commands.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;
use tracing::Instrument;

use crate::graph::{NodeId, Program};
use crate::observability::messages::engine::{RunCompleted, RunStarted, UnknownNodeSkipped};
use crate::observability::messages::task::{OrphanElseSkipped, TaskExecutionFailed};
use crate::observability::messages::StructuredLog;
use crate::runtime::Runtime;
use crate::traits::{BranchRole, ProgramExecutor, Task};

use super::context::{RunContext, RunStats};
use super::report::{RunReport, RunState};

/// Ordered tasks built from one statement chain.
pub type TaskSequence = Vec<Arc<dyn Task>>;

impl<'a> RunContext<'a> {
    /// Build the task sequence for the chain starting at `start`.
    ///
    /// Nodes whose type has no generator are skipped. Collection stops after
    /// a task that owns the rest of the chain.
    pub fn build_sequence_from(&self, start: Option<NodeId>) -> TaskSequence {
        let mut sequence = TaskSequence::new();
        let mut cursor = start;

        while let Some(id) = cursor {
            let Some(node) = self.node(id) else {
                break;
            };
            cursor = node.next();

            match self.resolve_task(id) {
                Ok(task) => {
                    let owns_rest = task.owns_continuation();
                    sequence.push(task);
                    if owns_rest {
                        break;
                    }
                }
                Err(_) => {
                    UnknownNodeSkipped {
                        node_id: node.id(),
                        node_type: node.node_type(),
                    }
                    .log();
                    RunStats::bump(&self.stats.nodes_skipped);
                }
            }
        }

        sequence
    }

    /// Task sequence for the chain held in statement slot `slot` of `node`.
    pub fn build_statement_sequence(&self, node: NodeId, slot: &str) -> TaskSequence {
        let head = self.node(node).and_then(|n| n.statement_slot(slot));
        self.build_sequence_from(head)
    }

    /// Run `tasks` in order, one at a time, applying the branch-chain rules.
    pub async fn run_sequence(&self, tasks: &[Arc<dyn Task>]) {
        let mut queue: VecDeque<&Arc<dyn Task>> = tasks.iter().collect();
        // None: no chain open. Some(m): chain open, m = some link matched.
        let mut chain: Option<bool> = None;

        while let Some(task) = queue.pop_front() {
            let role = task.branch_role();

            let runs = match (role, chain) {
                (BranchRole::None | BranchRole::Head, _) => true,
                (BranchRole::Continuation, matched) => matched != Some(true),
                (BranchRole::Terminal, Some(matched)) => !matched,
                (BranchRole::Terminal, None) => {
                    OrphanElseSkipped { task: task.name() }.log();
                    false
                }
            };

            if !runs {
                if role == BranchRole::Terminal {
                    chain = None;
                }
                continue;
            }

            let matched = self.run_task(task.as_ref()).await;

            chain = match role {
                BranchRole::Head | BranchRole::Continuation => Some(matched),
                BranchRole::Terminal | BranchRole::None => None,
            };
        }
    }

    /// Run one task, logging a failure. Returns whether it reported a match.
    async fn run_task(&self, task: &dyn Task) -> bool {
        RunStats::bump(&self.stats.tasks_run);
        match task.run(self).await {
            Ok(output) => output.is_match(),
            Err(error) => {
                TaskExecutionFailed {
                    task: task.name(),
                    error: &error,
                }
                .log();
                RunStats::bump(&self.stats.tasks_failed);
                false
            }
        }
    }
}

/// Runs snapshotted programs against one [`Runtime`], one run at a time.
pub struct Engine {
    runtime: Runtime,
    run_gate: tokio::sync::Mutex<()>,
    state: Mutex<RunState>,
}

impl Engine {
    pub fn new(runtime: Runtime) -> Self {
        Self {
            runtime,
            run_gate: tokio::sync::Mutex::new(()),
            state: Mutex::new(RunState::Idle),
        }
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// State of the most recent run.
    pub fn state(&self) -> RunState {
        *self.state.lock()
    }

    fn set_state(&self, state: RunState) {
        *self.state.lock() = state;
    }

    /// Run every root chain of `program` to completion.
    ///
    /// Waits for any run already in progress on this engine. Never fails:
    /// problems inside the program are logged and counted in the report.
    pub async fn run(&self, program: &Program) -> RunReport {
        let _gate = self.run_gate.lock().await;
        self.set_state(RunState::Running);

        let started = RunStarted {
            root_count: program.roots().len(),
            node_count: program.len(),
        };
        started.log();
        let span = started.span("engine_run");

        let start = Instant::now();
        let ctx = RunContext::new(program, &self.runtime);
        async {
            for &root in program.roots() {
                let sequence = ctx.build_sequence_from(Some(root));
                ctx.run_sequence(&sequence).await;
            }
        }
        .instrument(span)
        .await;

        let report = ctx.finish(start.elapsed());
        RunCompleted {
            tasks_run: report.tasks_run,
            tasks_failed: report.tasks_failed,
            nodes_skipped: report.nodes_skipped,
            commands_dispatched: report.commands_dispatched,
            duration: report.duration,
        }
        .log();

        self.set_state(RunState::Completed);
        report
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("runtime", &self.runtime)
            .field("state", &self.state())
            .finish()
    }
}

#[async_trait]
impl ProgramExecutor for Engine {
    async fn execute(&self, program: &Program) -> RunReport {
        self.run(program).await
    }
}
