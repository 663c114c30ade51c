// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Read-only program model consumed by the engine.

mod program;
mod spec;

pub use program::{GraphModel, NodeId, Program, ProgramNode};
pub use spec::NodeSpec;
