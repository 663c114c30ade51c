//! Built-in blocks.
//!
//! Every built-in node type is a [`BlockKind`]. [`BuiltinFactory`] turns a
//! program node into a [`BuiltinTask`] and the task's `run` dispatches on the
//! kind; the behavior itself lives in the per-family modules below.

mod data;
mod device;
mod factory;
mod flow;
mod kind;
mod logic;

pub use factory::{BuiltinFactory, BuiltinTask};
pub use kind::BlockKind;
