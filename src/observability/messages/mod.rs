// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for the human-readable line and
//! [`StructuredLog`] to emit it at its level with structured fields.
//!
//! # Organization
//!
//! * `engine` - run lifecycle, chain building and evaluation fallbacks
//! * `task` - individual task execution, dispatch and loop limits
//! * `runtime` - variable store and registry events
//!
//! # Usage Pattern
//!
//! ```rust
//! use block_runner::observability::messages::engine::RunStarted;
//! use block_runner::observability::messages::StructuredLog;
//!
//! let msg = RunStarted {
//!     root_count: 2,
//!     node_count: 9,
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod engine;
pub mod runtime;
pub mod task;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message as a tracing event.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
