/// Iterations a `while_loop` may run before it is stopped
pub const DEFAULT_WHILE_LOOP_CAP: usize = 1000;
/// Deferred results the evaluator unwraps before giving up
pub const DEFAULT_MAX_UNWRAP_DEPTH: usize = 32;
/// Pause used by a `delay` block without a usable `DELAY` field (milliseconds)
pub const DEFAULT_DELAY_MS: u64 = 1000;
/// Text logged by a `log_block` whose message is empty
pub const EMPTY_LOG_PLACEHOLDER: &str = "[log empty]";
