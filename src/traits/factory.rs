use std::sync::Arc;

use crate::graph::ProgramNode;
use crate::traits::Task;

/// Produces the task for one node instance.
///
/// Closures of the right shape are factories too, so host code can plug in a
/// node type with `registry.register("my_block", |node: &ProgramNode| ...)`.
pub trait NodeFactory: Send + Sync {
    fn create(&self, node: &ProgramNode) -> Arc<dyn Task>;
}

impl<F> NodeFactory for F
where
    F: Fn(&ProgramNode) -> Arc<dyn Task> + Send + Sync,
{
    fn create(&self, node: &ProgramNode) -> Arc<dyn Task> {
        self(node)
    }
}
