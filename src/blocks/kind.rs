// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::traits::BranchRole;

/// Every built-in node type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    // Device commands
    Connect,
    Disconnect,
    YellowLedOn,
    YellowLedOff,
    YellowLed,
    SetLed,
    OpenDoor,
    Delay,

    // Program structure
    CommentBlock,
    LogBlock,
    StartBlock,
    StopBlock,

    // Literals and expressions
    TextLiteral,
    MathNumber,
    LogicBoolean,
    LogicCompare,
    LogicOperation,
    LogicNegate,

    // Control flow
    LogicIf,
    LogicIfElse,
    LogicElseIf,
    LogicElse,
    RepeatLoop,
    WhileLoop,

    // Variables
    VariablesGet,
    VariablesSet,
}

/// Extra type names that map onto an existing kind.
const ALIASES: &[(&str, BlockKind)] = &[
    ("logic_boolean_custom", BlockKind::LogicBoolean),
    ("logic_compare_custom", BlockKind::LogicCompare),
];

impl BlockKind {
    pub const ALL: [BlockKind; 26] = [
        BlockKind::Connect,
        BlockKind::Disconnect,
        BlockKind::YellowLedOn,
        BlockKind::YellowLedOff,
        BlockKind::YellowLed,
        BlockKind::SetLed,
        BlockKind::OpenDoor,
        BlockKind::Delay,
        BlockKind::CommentBlock,
        BlockKind::LogBlock,
        BlockKind::StartBlock,
        BlockKind::StopBlock,
        BlockKind::TextLiteral,
        BlockKind::MathNumber,
        BlockKind::LogicBoolean,
        BlockKind::LogicCompare,
        BlockKind::LogicOperation,
        BlockKind::LogicNegate,
        BlockKind::LogicIf,
        BlockKind::LogicIfElse,
        BlockKind::LogicElseIf,
        BlockKind::LogicElse,
        BlockKind::RepeatLoop,
        BlockKind::WhileLoop,
        BlockKind::VariablesGet,
        BlockKind::VariablesSet,
    ];

    /// Canonical node type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Connect => "connect",
            BlockKind::Disconnect => "disconnect",
            BlockKind::YellowLedOn => "yellow_led_on",
            BlockKind::YellowLedOff => "yellow_led_off",
            BlockKind::YellowLed => "yellow_led",
            BlockKind::SetLed => "set_led",
            BlockKind::OpenDoor => "open_door",
            BlockKind::Delay => "delay",
            BlockKind::CommentBlock => "comment_block",
            BlockKind::LogBlock => "log_block",
            BlockKind::StartBlock => "start_block",
            BlockKind::StopBlock => "stop_block",
            BlockKind::TextLiteral => "text_literal",
            BlockKind::MathNumber => "math_number",
            BlockKind::LogicBoolean => "logic_boolean",
            BlockKind::LogicCompare => "logic_compare",
            BlockKind::LogicOperation => "logic_operation",
            BlockKind::LogicNegate => "logic_negate",
            BlockKind::LogicIf => "logic_if",
            BlockKind::LogicIfElse => "logic_if_else",
            BlockKind::LogicElseIf => "logic_else_if",
            BlockKind::LogicElse => "logic_else",
            BlockKind::RepeatLoop => "repeat_loop",
            BlockKind::WhileLoop => "while_loop",
            BlockKind::VariablesGet => "variables_get",
            BlockKind::VariablesSet => "variables_set",
        }
    }

    /// Kind for a node type name, aliases included.
    pub fn from_type(node_type: &str) -> Option<BlockKind> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == node_type)
            .or_else(|| {
                ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == node_type)
                    .map(|(_, kind)| *kind)
            })
    }

    /// Every type name the built-in factory answers to.
    pub fn type_names() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .map(BlockKind::as_str)
            .chain(ALIASES.iter().map(|(alias, _)| *alias))
            .collect()
    }

    pub fn branch_role(&self) -> BranchRole {
        match self {
            BlockKind::LogicIf | BlockKind::LogicIfElse => BranchRole::Head,
            BlockKind::LogicElseIf => BranchRole::Continuation,
            BlockKind::LogicElse => BranchRole::Terminal,
            _ => BranchRole::None,
        }
    }

    /// `start_block` runs the chain after it itself.
    pub fn owns_continuation(&self) -> bool {
        matches!(self, BlockKind::StartBlock)
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
