// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod blocks;     // built-in block types
pub mod config;     // config + runtime builder
pub mod dispatch;   // command dispatcher adapters
pub mod engine;     // registry, evaluator, scheduler
pub mod errors;     // error handling
pub mod graph;      // program snapshot
pub mod observability;
pub mod runtime;    // variables + shared run context
pub mod traits;     // unified abstractions
pub mod types;      // values and commands
