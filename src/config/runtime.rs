// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::Config;
use crate::engine::GeneratorRegistry;
use crate::runtime::{Runtime, VariableStore};
use crate::traits::CommandDispatcher;

/// Runtime builder - turns a loaded configuration into a ready [`Runtime`].
///
/// The registry gets every built-in generator, the variable store is
/// preloaded from `variables`, and the engine options are copied over. The
/// dispatcher is supplied by the caller because where commands go is a
/// deployment decision, not a configuration one.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use block_runner::config::{Config, EngineOptions, RuntimeBuilder};
/// use block_runner::dispatch::RecordingDispatcher;
/// use block_runner::types::Value;
///
/// let mut config = Config {
///     engine: EngineOptions::default(),
///     variables: Default::default(),
///     program: vec![],
/// };
/// config.variables.insert("counter".to_string(), Value::Number(0.0));
///
/// let runtime = RuntimeBuilder::from_config(&config, Arc::new(RecordingDispatcher::new()));
/// assert!(runtime.variables().contains("counter"));
/// assert!(runtime.registry().contains("connect"));
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build a runtime with the built-in generators.
    pub fn from_config(cfg: &Config, dispatcher: Arc<dyn CommandDispatcher>) -> Runtime {
        Self::with_registry(cfg, GeneratorRegistry::with_builtins(), dispatcher)
    }

    /// Build a runtime around a caller-populated registry.
    pub fn with_registry(
        cfg: &Config,
        registry: GeneratorRegistry,
        dispatcher: Arc<dyn CommandDispatcher>,
    ) -> Runtime {
        let variables = VariableStore::new();
        for (name, initial) in &cfg.variables {
            variables.preload(name.clone(), initial.clone());
        }

        Runtime::new(dispatcher)
            .with_registry(registry)
            .with_variables(Arc::new(variables))
            .with_options(cfg.engine.clone())
    }
}
