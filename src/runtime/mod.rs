// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The explicit context a program runs against.
//!
//! A [`Runtime`] bundles everything a run shares: the generator registry, the
//! variable store, the command dispatcher and the engine options. It is built
//! once at startup (registry populated, variables preloaded) and then handed
//! to an [`Engine`](crate::engine::Engine). Variables live as long as the
//! runtime, across runs, until [`VariableStore::reset`] is called.

mod variables;

pub use variables::VariableStore;

use std::sync::Arc;

use crate::config::EngineOptions;
use crate::engine::GeneratorRegistry;
use crate::traits::CommandDispatcher;

#[derive(Clone)]
pub struct Runtime {
    registry: Arc<GeneratorRegistry>,
    variables: Arc<VariableStore>,
    dispatcher: Arc<dyn CommandDispatcher>,
    options: EngineOptions,
}

impl Runtime {
    /// Runtime with the built-in generators, an empty variable store and
    /// default options.
    pub fn new(dispatcher: Arc<dyn CommandDispatcher>) -> Self {
        Self {
            registry: Arc::new(GeneratorRegistry::with_builtins()),
            variables: Arc::new(VariableStore::new()),
            dispatcher,
            options: EngineOptions::default(),
        }
    }

    pub fn with_registry(mut self, registry: GeneratorRegistry) -> Self {
        self.registry = Arc::new(registry);
        self
    }

    pub fn with_variables(mut self, variables: Arc<VariableStore>) -> Self {
        self.variables = variables;
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &GeneratorRegistry {
        &self.registry
    }

    pub fn variables(&self) -> &Arc<VariableStore> {
        &self.variables
    }

    pub fn dispatcher(&self) -> &dyn CommandDispatcher {
        self.dispatcher.as_ref()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("registry", &self.registry)
            .field("variables", &self.variables.names())
            .field("dispatcher", &self.dispatcher.name())
            .field("options", &self.options)
            .finish()
    }
}
