//! Configuration validation.
//!
//! Two independent checks run and their errors are collected together, so a
//! bad file reports everything wrong with it at once:
//!
//! 1. **Engine limits**: `while_loop_cap` and `max_unwrap_depth` must be at
//!    least one. A zero cap would turn every `while_loop` into a no-op and a
//!    zero depth would reject every deferred value.
//! 2. **Variable names**: names to preload must not be blank.
//!
//! Program structure is not checked here; duplicate node ids are reported by
//! [`Program::snapshot`](crate::graph::Program::snapshot) and unknown node
//! types are skipped at run time.
//!
//! # Examples
//!
//! ```rust
//! use block_runner::config::{validate_options, EngineOptions};
//! use block_runner::errors::ValidationError;
//!
//! let options = EngineOptions {
//!     while_loop_cap: 0,
//!     ..EngineOptions::default()
//! };
//!
//! let errors = validate_options(&options).unwrap_err();
//! assert_eq!(errors, vec![ValidationError::ZeroLimit { option: "while_loop_cap" }]);
//! ```

use crate::config::{Config, EngineOptions};
use crate::errors::ValidationError;

/// Check a whole config, returning every problem found.
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(mut option_errors) = validate_options(&config.engine) {
        errors.append(&mut option_errors);
    }

    if config.variables.keys().any(|name| name.trim().is_empty()) {
        errors.push(ValidationError::EmptyVariableName);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check engine limits.
pub fn validate_options(options: &EngineOptions) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if options.while_loop_cap == 0 {
        errors.push(ValidationError::ZeroLimit {
            option: "while_loop_cap",
        });
    }
    if options.max_unwrap_depth == 0 {
        errors.push(ValidationError::ZeroLimit {
            option: "max_unwrap_depth",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
