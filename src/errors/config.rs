// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Problems found while validating engine options.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A limit that must be at least one was configured as zero
    ZeroLimit {
        /// The option key
        option: &'static str,
    },
    /// A variable name was blank
    EmptyVariableName,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::ZeroLimit { option } => {
                write!(f, "Option '{}' must be at least 1", option)
            }
            ValidationError::EmptyVariableName => {
                write!(f, "Variable names must not be empty")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Errors raised while loading a configuration or program file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("unsupported config format for '{0}' (expected .yaml, .yml or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("Configuration validation failed:\n{}", join_lines(.0))]
    Invalid(Vec<ValidationError>),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("\n")
}
