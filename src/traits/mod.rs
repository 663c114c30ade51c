pub mod dispatcher;
pub mod executor;
pub mod factory;
pub mod task;

pub use dispatcher::CommandDispatcher;
pub use executor::ProgramExecutor;
pub use factory::NodeFactory;
pub use task::{BranchRole, Task, TaskOutput};
