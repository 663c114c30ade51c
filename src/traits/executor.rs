use async_trait::async_trait;

use crate::engine::RunReport;
use crate::graph::{NodeSpec, Program};
use crate::errors::ProgramError;

#[async_trait]
pub trait ProgramExecutor: Send + Sync {
    /// Execute a snapshotted program from its roots to completion.
    ///
    /// A run always completes: unknown nodes, failed evaluations and failed
    /// tasks are logged and recovered from, and the returned report counts
    /// them.
    async fn execute(&self, program: &Program) -> RunReport;

    /// Snapshot the editor's root chains and execute them.
    ///
    /// Returns an error only when the program cannot be snapshotted; nothing
    /// has run in that case.
    async fn execute_roots(&self, roots: &[NodeSpec]) -> Result<RunReport, ProgramError> {
        let program = Program::snapshot(roots)?;
        Ok(self.execute(&program).await)
    }
}
