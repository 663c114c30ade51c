// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use async_trait::async_trait;

use crate::engine::RunContext;
use crate::errors::TaskError;
use crate::graph::{NodeId, ProgramNode};
use crate::traits::{BranchRole, NodeFactory, Task, TaskOutput};

use super::{data, device, flow, logic, BlockKind};

/// Factory for every built-in block type.
///
/// The node's type name decides the [`BlockKind`]:
/// - device commands: `connect`, `disconnect`, `yellow_led*`, `set_led`, `open_door`, `delay`
/// - structure: `comment_block`, `log_block`, `start_block`, `stop_block`
/// - expressions: `text_literal`, `math_number`, `logic_boolean`, `logic_compare`, `logic_operation`, `logic_negate`
/// - control flow: `logic_if`, `logic_if_else`, `logic_else_if`, `logic_else`, `repeat_loop`, `while_loop`
/// - variables: `variables_get`, `variables_set`
pub struct BuiltinFactory;

impl NodeFactory for BuiltinFactory {
    fn create(&self, node: &ProgramNode) -> Arc<dyn Task> {
        match BlockKind::from_type(node.node_type()) {
            Some(kind) => Arc::new(BuiltinTask::new(kind, node.index())),
            None => Arc::new(UnsupportedBlock {
                node_type: node.node_type().to_string(),
            }),
        }
    }
}

/// A built-in block bound to one node of the running program.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinTask {
    kind: BlockKind,
    node: NodeId,
}

impl BuiltinTask {
    pub fn new(kind: BlockKind, node: NodeId) -> Self {
        Self { kind, node }
    }

    pub fn kind(&self) -> BlockKind {
        self.kind
    }
}

#[async_trait]
impl Task for BuiltinTask {
    async fn run(&self, ctx: &RunContext<'_>) -> Result<TaskOutput, TaskError> {
        let node = self.node;
        match self.kind {
            BlockKind::Connect
            | BlockKind::Disconnect
            | BlockKind::YellowLedOn
            | BlockKind::YellowLedOff
            | BlockKind::OpenDoor => device::send_named(ctx, self.kind).await,
            BlockKind::YellowLed => device::switch(ctx, node, "yellow_led_on", "yellow_led_off").await,
            BlockKind::SetLed => device::switch(ctx, node, "led_on", "led_off").await,
            BlockKind::Delay => device::delay(ctx, node).await,

            BlockKind::CommentBlock => Ok(TaskOutput::Unit),
            BlockKind::LogBlock => device::log(ctx, node).await,
            BlockKind::StartBlock => flow::start(ctx, node).await,
            BlockKind::StopBlock => device::send(ctx, "stop").await,

            BlockKind::TextLiteral => Ok(logic::text_literal(ctx, node)),
            BlockKind::MathNumber => Ok(logic::math_number(ctx, node)),
            BlockKind::LogicBoolean => Ok(logic::boolean(ctx, node)),
            BlockKind::LogicCompare => Ok(logic::compare(ctx, node).await),
            BlockKind::LogicOperation => Ok(logic::operation(ctx, node).await),
            BlockKind::LogicNegate => Ok(logic::negate(ctx, node).await),

            BlockKind::LogicIf | BlockKind::LogicElseIf => flow::conditional(ctx, node).await,
            BlockKind::LogicIfElse => flow::if_else(ctx, node).await,
            BlockKind::LogicElse => flow::otherwise(ctx, node).await,
            BlockKind::RepeatLoop => flow::repeat(ctx, node).await,
            BlockKind::WhileLoop => flow::while_loop(ctx, node).await,

            BlockKind::VariablesGet => Ok(data::get(ctx, node)),
            BlockKind::VariablesSet => data::set(ctx, node).await,
        }
    }

    fn name(&self) -> &str {
        self.kind.as_str()
    }

    fn branch_role(&self) -> BranchRole {
        self.kind.branch_role()
    }

    fn owns_continuation(&self) -> bool {
        self.kind.owns_continuation()
    }
}

/// Stand-in produced when the built-in factory is registered under a type
/// name it does not know. Fails every time it runs.
struct UnsupportedBlock {
    node_type: String,
}

#[async_trait]
impl Task for UnsupportedBlock {
    async fn run(&self, _ctx: &RunContext<'_>) -> Result<TaskOutput, TaskError> {
        Err(TaskError::Failed(format!(
            "'{}' is not a built-in block type",
            self.node_type
        )))
    }

    fn name(&self) -> &str {
        &self.node_type
    }
}
