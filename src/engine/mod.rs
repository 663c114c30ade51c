//! Block program execution engine.
//!
//! - `registry`: node type to task factory table
//! - `context`: the per-run view handed to every task
//! - `evaluator`: value-slot evaluation with bounded unwrapping
//! - `scheduler`: sequence building, the branch-chain loop and [`Engine`]
//! - `report`: what a finished run reports back

mod context;
mod evaluator;
pub mod registry;
mod report;
mod scheduler;
#[cfg(test)]
mod integration_tests;

pub use context::RunContext;
pub use evaluator::FromValue;
pub use registry::GeneratorRegistry;
pub use report::{RunReport, RunState};
pub use scheduler::{Engine, TaskSequence};
