// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Expression blocks. Each yields a [`TaskOutput::Value`] and never fails;
//! missing inputs read as `null`.

use std::cmp::Ordering;

use crate::engine::RunContext;
use crate::graph::NodeId;
use crate::traits::TaskOutput;
use crate::types::Value;

pub(super) fn text_literal(ctx: &RunContext<'_>, node: NodeId) -> TaskOutput {
    TaskOutput::Value(ctx.field(node, "TEXT").cloned().unwrap_or_default())
}

pub(super) fn math_number(ctx: &RunContext<'_>, node: NodeId) -> TaskOutput {
    let n = ctx.field(node, "NUM").and_then(Value::as_number).unwrap_or(0.0);
    TaskOutput::value(n)
}

/// Checkbox-style field. The editor writes `TRUE`/`FALSE`; program files may
/// use a plain boolean.
pub(super) fn field_flag(ctx: &RunContext<'_>, node: NodeId, name: &str) -> bool {
    match ctx.field(node, name) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Text(s)) => s == "TRUE",
        _ => false,
    }
}

pub(super) fn boolean(ctx: &RunContext<'_>, node: NodeId) -> TaskOutput {
    TaskOutput::value(field_flag(ctx, node, "BOOL"))
}

pub(super) async fn compare(ctx: &RunContext<'_>, node: NodeId) -> TaskOutput {
    let a = ctx.evaluate(node, "A", Value::Null).await;
    let b = ctx.evaluate(node, "B", Value::Null).await;
    let op = ctx.field(node, "OP").and_then(Value::as_str).unwrap_or("EQ");
    TaskOutput::value(apply_compare(op, &a, &b))
}

fn apply_compare(op: &str, a: &Value, b: &Value) -> bool {
    match op {
        "EQ" => a.loose_eq(b),
        "NEQ" => !a.loose_eq(b),
        "LT" => a.loose_cmp(b) == Some(Ordering::Less),
        "GT" => a.loose_cmp(b) == Some(Ordering::Greater),
        "LE" => matches!(a.loose_cmp(b), Some(Ordering::Less | Ordering::Equal)),
        "GE" => matches!(a.loose_cmp(b), Some(Ordering::Greater | Ordering::Equal)),
        _ => false,
    }
}

/// `AND` / `OR` over truthiness. `B` is only evaluated when `A` does not
/// decide the result.
pub(super) async fn operation(ctx: &RunContext<'_>, node: NodeId) -> TaskOutput {
    let is_or = ctx.field(node, "OP").and_then(Value::as_str) == Some("OR");
    let a = ctx.evaluate(node, "A", Value::Null).await.is_truthy();

    let result = match (is_or, a) {
        (true, true) => true,
        (false, false) => false,
        _ => ctx.evaluate(node, "B", Value::Null).await.is_truthy(),
    };
    TaskOutput::value(result)
}

pub(super) async fn negate(ctx: &RunContext<'_>, node: NodeId) -> TaskOutput {
    let b = ctx.evaluate(node, "BOOL", Value::Null).await;
    TaskOutput::value(!b.is_truthy())
}
