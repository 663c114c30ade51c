// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_DELAY_MS, DEFAULT_MAX_UNWRAP_DEPTH, DEFAULT_WHILE_LOOP_CAP};
use crate::errors::ConfigError;
use crate::graph::NodeSpec;
use crate::types::Value;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Everything needed to run a block program from a file.
///
/// # Fields
/// * `engine` - Engine limits and defaults (optional, see [`EngineOptions`])
/// * `variables` - Variables to preload, with their initial values (optional)
/// * `program` - Root chains of the program, in run order
///
/// # Example
/// ```yaml
/// engine:
///   while_loop_cap: 500
/// variables:
///   counter: 0
/// program:
///   - type: connect
///     next:
///       type: set_led
///       fields: { STATE: "ON" }
///       next:
///         type: disconnect
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineOptions,
    #[serde(default)]
    pub variables: BTreeMap<String, Value>,
    #[serde(default)]
    pub program: Vec<NodeSpec>,
}

/// Engine limits and defaults.
///
/// # Fields
/// * `while_loop_cap` - Iterations after which a `while_loop` stops quietly (defaults to 1000)
/// * `max_unwrap_depth` - Deferred results the evaluator will unwrap (defaults to 32)
/// * `default_delay_ms` - Pause for a `delay` block with no usable `DELAY` (defaults to 1000)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub while_loop_cap: usize,
    pub max_unwrap_depth: usize,
    pub default_delay_ms: u64,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            while_loop_cap: DEFAULT_WHILE_LOOP_CAP,
            max_unwrap_depth: DEFAULT_MAX_UNWRAP_DEPTH,
            default_delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

/// Load a config from a YAML (`.yaml`, `.yml`) or TOML (`.toml`) file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_str(&content)?),
        Some("toml") => Ok(toml::from_str(&content)?),
        _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Load a config and check its engine options and variable names.
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let cfg = load_config(path)?;
    crate::config::validate_config(&cfg).map_err(ConfigError::Invalid)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn parse_basic_config() {
        let yaml = r#"
variables:
  counter: 0
  mode: auto
program:
  - type: connect
    next:
      type: delay
      fields: { DELAY: 500 }
"#;

        let cfg: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.engine, EngineOptions::default());
        assert_eq!(cfg.variables.get("counter"), Some(&Value::Number(0.0)));
        assert_eq!(cfg.variables.get("mode"), Some(&Value::from("auto")));
        assert_eq!(cfg.program.len(), 1);
        assert_eq!(cfg.program[0].chain_len(), 2);
    }

    #[test]
    fn test_partial_engine_options_keep_defaults() {
        let yaml = "engine:\n  while_loop_cap: 5\n";
        let cfg: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(cfg.engine.while_loop_cap, 5);
        assert_eq!(cfg.engine.max_unwrap_depth, DEFAULT_MAX_UNWRAP_DEPTH);
        assert_eq!(cfg.engine.default_delay_ms, DEFAULT_DELAY_MS);
        assert!(cfg.program.is_empty());
    }

    #[test]
    fn test_load_yaml_file() {
        let file = write_temp(
            ".yaml",
            r#"
program:
  - type: log_block
    values:
      TEXT: { type: text_literal, fields: { TEXT: hello } }
"#,
        );

        let cfg = load_and_validate_config(file.path()).unwrap();
        assert_eq!(cfg.program[0].node_type, "log_block");
        assert!(cfg.program[0].values.contains_key("TEXT"));
    }

    #[test]
    fn test_load_toml_file() {
        let file = write_temp(
            ".toml",
            r#"
[engine]
default_delay_ms = 250

[variables]
counter = 1

[[program]]
type = "open_door"
"#,
        );

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.engine.default_delay_ms, 250);
        assert_eq!(cfg.variables.get("counter"), Some(&Value::Number(1.0)));
        assert_eq!(cfg.program[0].node_type, "open_door");
    }

    #[test]
    fn test_unsupported_extension() {
        let file = write_temp(".json", "{}");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load_config("/definitely/not/here.yaml");
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_load_and_validate_rejects_zero_cap() {
        let file = write_temp(".yml", "engine:\n  while_loop_cap: 0\n");

        let result = load_and_validate_config(file.path());
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("Configuration validation failed"));
        assert!(error_msg.contains("while_loop_cap"));
    }
}
