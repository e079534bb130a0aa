//! Configuration module

use crate::error::CliError;
use anyhow::{Context, Result};
use numerus_core::config::defaults;
use numerus_core::GeneratorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct CliConfig {
    /// Generation configuration
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Performance configuration
    #[serde(default)]
    pub performance: PerformanceConfig,
}

impl CliConfig {
    /// Load a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    /// Core configuration, with `warn_mismatches` forcing recorded diagnostics
    pub fn generator_config(&self, warn_mismatches: bool) -> Result<GeneratorConfig> {
        let config = GeneratorConfig::builder()
            .sample_limit(self.generation.sample_limit)
            .unbounded_limit(self.generation.unbounded_limit)
            .escalate_mismatches(self.generation.escalate_mismatches && !warn_mismatches)
            .build()
            .context("Invalid [generation] settings")?;
        Ok(config)
    }
}

/// Generation-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Ranges kept per unbounded category
    pub sample_limit: usize,

    /// Distinct values at which a category stops being judged bounded
    pub unbounded_limit: usize,

    /// Abort on rule/observation mismatches
    pub escalate_mismatches: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            sample_limit: defaults::SAMPLE_LIMIT,
            unbounded_limit: defaults::UNBOUNDED_LIMIT,
            escalate_mismatches: true,
        }
    }
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "text".to_string(),
            pretty_json: true,
        }
    }
}

/// Performance-related configuration
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of worker threads (0 = auto)
    pub worker_threads: usize,
}
