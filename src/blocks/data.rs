// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::RunContext;
use crate::errors::TaskError;
use crate::graph::NodeId;
use crate::traits::TaskOutput;
use crate::types::Value;

fn variable_name(ctx: &RunContext<'_>, node: NodeId) -> String {
    ctx.field(node, "VAR").map(Value::to_text).unwrap_or_default()
}

/// Current value of `VAR`; `null` when it was never preloaded.
pub(super) fn get(ctx: &RunContext<'_>, node: NodeId) -> TaskOutput {
    let name = variable_name(ctx, node);
    TaskOutput::Value(ctx.variables().get(&name, Value::Null))
}

/// Store `VALUE` into `VAR`. Writing an undeclared name changes nothing and
/// is only logged by the store.
pub(super) async fn set(ctx: &RunContext<'_>, node: NodeId) -> Result<TaskOutput, TaskError> {
    let name = variable_name(ctx, node);
    let value = ctx.evaluate(node, "VALUE", Value::Null).await;
    ctx.variables().set(&name, value);
    Ok(TaskOutput::Unit)
}
