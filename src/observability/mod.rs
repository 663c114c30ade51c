// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! All diagnostic text emitted by the engine lives in `messages`, one struct
//! per event, each implementing `Display` and
//! [`StructuredLog`](messages::StructuredLog). Call sites build the struct
//! and call `.log()` instead of formatting strings inline.
//!
//! # Usage
//!
//! ```rust
//! use block_runner::errors::TaskError;
//! use block_runner::observability::messages::task::TaskExecutionFailed;
//!
//! let error = TaskError::Failed("bridge offline".to_string());
//! let msg = TaskExecutionFailed {
//!     task: "connect",
//!     error: &error,
//! };
//!
//! tracing::error!("{}", msg);
//! ```
//!
//! Subscriber setup (format, filtering) is left to the binary; see
//! [`init_tracing`].

use tracing_subscriber::EnvFilter;

pub mod messages;

/// Install a formatting subscriber filtered by `RUST_LOG`, defaulting to
/// `default_directive` (for example `"info"`).
///
/// Calling it more than once is harmless; later calls are ignored.
pub fn init_tracing(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
