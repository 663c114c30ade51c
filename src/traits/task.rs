use async_trait::async_trait;
use std::sync::Arc;

use crate::engine::RunContext;
use crate::errors::TaskError;
use crate::types::Value;

/// What a task hands back when it finishes.
pub enum TaskOutput {
    /// Purely side-effecting; nothing to report.
    Unit,
    /// A value, used when the node also acts as an expression.
    Value(Value),
    /// Another executable unit that still has to run to yield the value.
    /// The evaluator unwraps these up to a bounded depth.
    Deferred(Arc<dyn Task>),
}

impl TaskOutput {
    pub fn value(value: impl Into<Value>) -> Self {
        TaskOutput::Value(value.into())
    }

    /// Branch reporting: whether this output counts as a matched branch.
    pub fn is_match(&self) -> bool {
        matches!(self, TaskOutput::Value(v) if v.is_truthy())
    }
}

impl std::fmt::Debug for TaskOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskOutput::Unit => write!(f, "Unit"),
            TaskOutput::Value(v) => f.debug_tuple("Value").field(v).finish(),
            TaskOutput::Deferred(task) => f.debug_tuple("Deferred").field(&task.name()).finish(),
        }
    }
}

/// Position of a task inside an `if / else if / else` chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BranchRole {
    /// Not part of a branch chain.
    #[default]
    None,
    /// Starts a chain and reports whether it matched.
    Head,
    /// Runs only when every earlier link in the chain failed to match.
    Continuation,
    /// Closes the chain; runs only when nothing matched.
    Terminal,
}

/// The executable unit a program node resolves to.
///
/// A task is bound to one node instance when its factory creates it and reads
/// the rest of what it needs (fields, slots, variables) from the
/// [`RunContext`] while running.
#[async_trait]
pub trait Task: Send + Sync {
    async fn run(&self, ctx: &RunContext<'_>) -> Result<TaskOutput, TaskError>;

    /// Node type this task was generated for.
    fn name(&self) -> &str;

    fn branch_role(&self) -> BranchRole {
        BranchRole::None
    }

    /// True when the task runs the chain that follows its node itself, so the
    /// enclosing sequence must stop collecting after it.
    fn owns_continuation(&self) -> bool {
        false
    }
}
