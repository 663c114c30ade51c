// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Blocks whose only effect is a command to the controller.

use std::time::Duration;

use crate::config::consts::EMPTY_LOG_PLACEHOLDER;
use crate::engine::RunContext;
use crate::errors::TaskError;
use crate::graph::NodeId;
use crate::traits::TaskOutput;
use crate::types::{Command, Value};

use super::BlockKind;

pub(super) async fn send(ctx: &RunContext<'_>, command: &str) -> Result<TaskOutput, TaskError> {
    ctx.dispatch(Command::new(command)).await?;
    Ok(TaskOutput::Unit)
}

/// Blocks whose command is their own type name.
pub(super) async fn send_named(ctx: &RunContext<'_>, kind: BlockKind) -> Result<TaskOutput, TaskError> {
    send(ctx, kind.as_str()).await
}

/// `STATE` field `ON` sends `on`, anything else sends `off`.
pub(super) async fn switch(
    ctx: &RunContext<'_>,
    node: NodeId,
    on: &str,
    off: &str,
) -> Result<TaskOutput, TaskError> {
    let lit = ctx.field(node, "STATE").and_then(Value::as_str) == Some("ON");
    send(ctx, if lit { on } else { off }).await
}

/// Announce the pause to the controller, then hold the sequence for it.
pub(super) async fn delay(ctx: &RunContext<'_>, node: NodeId) -> Result<TaskOutput, TaskError> {
    let millis = delay_millis(ctx.field(node, "DELAY"), ctx.options().default_delay_ms);

    ctx.dispatch(Command::new("delay").with_value(millis)).await?;
    tokio::time::sleep(Duration::from_millis(millis)).await;
    Ok(TaskOutput::Unit)
}

fn delay_millis(field: Option<&Value>, default_ms: u64) -> u64 {
    let given = field
        .filter(|value| !value.is_null() && value.as_str().map_or(true, |s| !s.trim().is_empty()))
        .and_then(Value::as_number)
        .filter(|ms| ms.is_finite());

    match given {
        Some(ms) => ms.max(0.0).trunc() as u64,
        None => default_ms,
    }
}

pub(super) async fn log(ctx: &RunContext<'_>, node: NodeId) -> Result<TaskOutput, TaskError> {
    let message = ctx.evaluate(node, "TEXT", Value::Null).await;
    let text = match message {
        Value::Null => EMPTY_LOG_PLACEHOLDER.to_string(),
        Value::Text(ref s) if s.is_empty() => EMPTY_LOG_PLACEHOLDER.to_string(),
        other => other.to_text(),
    };

    ctx.dispatch(Command::new("log").with_value(text)).await?;
    Ok(TaskOutput::Unit)
}
