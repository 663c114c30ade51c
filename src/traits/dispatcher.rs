use async_trait::async_trait;

use crate::errors::DispatchError;
use crate::types::Command;

/// Single sink for every command a run produces.
///
/// The engine awaits `send` before moving to the next task, which is what
/// keeps dispatch order identical to execution order. There is no per-call
/// timeout: a slow bridge stalls the run.
#[async_trait]
pub trait CommandDispatcher: Send + Sync {
    async fn send(&self, command: Command) -> Result<(), DispatchError>;

    fn name(&self) -> &'static str;
}
