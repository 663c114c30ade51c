// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Control-flow blocks: entry point, branches and loops.
//!
//! Nested bodies are run inline through [`RunContext::run_sequence`], so the
//! one-task-at-a-time rule holds inside them as well.

use crate::engine::RunContext;
use crate::errors::TaskError;
use crate::graph::{GraphModel, NodeId};
use crate::observability::messages::task::LoopSafetyLimitReached;
use crate::observability::messages::StructuredLog;
use crate::traits::TaskOutput;
use crate::types::{Command, Value};

use super::logic;

/// Send `start`, then run the chain hanging off this block.
pub(super) async fn start(ctx: &RunContext<'_>, node: NodeId) -> Result<TaskOutput, TaskError> {
    let next = ctx.node(node).and_then(|n| n.next());
    let sequence = ctx.build_sequence_from(next);

    ctx.dispatch(Command::new("start")).await?;
    ctx.run_sequence(&sequence).await;
    Ok(TaskOutput::Unit)
}

/// `logic_if` and `logic_else_if`: run `DO` when `COND` holds and report
/// whether it did.
pub(super) async fn conditional(ctx: &RunContext<'_>, node: NodeId) -> Result<TaskOutput, TaskError> {
    let matched = ctx.evaluate(node, "COND", Value::Null).await.is_truthy();
    if matched {
        let body = ctx.build_statement_sequence(node, "DO");
        ctx.run_sequence(&body).await;
    }
    Ok(TaskOutput::value(matched))
}

/// Exactly one of `DO` / `ELSE` runs, so the chain always counts as matched.
pub(super) async fn if_else(ctx: &RunContext<'_>, node: NodeId) -> Result<TaskOutput, TaskError> {
    let slot = if ctx.evaluate(node, "COND", Value::Null).await.is_truthy() {
        "DO"
    } else {
        "ELSE"
    };
    let body = ctx.build_statement_sequence(node, slot);
    ctx.run_sequence(&body).await;
    Ok(TaskOutput::value(true))
}

/// `logic_else`. Whether it runs at all is decided by the sequence loop.
pub(super) async fn otherwise(ctx: &RunContext<'_>, node: NodeId) -> Result<TaskOutput, TaskError> {
    let body = ctx.build_statement_sequence(node, "DO");
    ctx.run_sequence(&body).await;
    Ok(TaskOutput::Unit)
}

/// `TIMES` is read once; the body is built once and run that many times.
pub(super) async fn repeat(ctx: &RunContext<'_>, node: NodeId) -> Result<TaskOutput, TaskError> {
    let count = repeat_count(ctx.evaluate_as::<f64>(node, "TIMES", 1.0).await);
    let body = ctx.build_statement_sequence(node, "DO");

    for _ in 0..count {
        ctx.run_sequence(&body).await;
        // Keeps a huge count cancellable from the outside.
        tokio::task::yield_now().await;
    }
    Ok(TaskOutput::Unit)
}

/// Whole passes for a `TIMES` reading. Infinite and NaN read as
/// non-numeric (one pass); negatives run nothing.
fn repeat_count(times: f64) -> u64 {
    if times.is_finite() {
        times.max(0.0).trunc() as u64
    } else {
        1
    }
}

/// Re-check `COND` and rebuild `DO` on every pass, stopping quietly once
/// `while_loop_cap` passes have run.
///
/// `COND` is checked before the cap, so a loop that hits the cap evaluates
/// its condition `cap + 1` times.
///
/// With no `COND` expression connected the block's own `COND` field
/// (`TRUE`/`FALSE`) decides, and never changes.
pub(super) async fn while_loop(ctx: &RunContext<'_>, node: NodeId) -> Result<TaskOutput, TaskError> {
    let cap = ctx.options().while_loop_cap;
    let has_expression = ctx.program().value_input(node, "COND").is_some();
    let fixed = logic::field_flag(ctx, node, "COND");

    let mut iterations = 0;
    loop {
        let holds = if has_expression {
            ctx.evaluate(node, "COND", Value::Null).await.is_truthy()
        } else {
            fixed
        };
        if !holds {
            break;
        }

        if iterations >= cap {
            let node_id = ctx.node(node).map(|n| n.id()).unwrap_or_default();
            LoopSafetyLimitReached { node_id, cap }.log();
            ctx.record_loop_cap();
            break;
        }
        iterations += 1;

        let body = ctx.build_statement_sequence(node, "DO");
        ctx.run_sequence(&body).await;
    }
    Ok(TaskOutput::Unit)
}
