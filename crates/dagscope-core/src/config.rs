use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::graph::topo::TopoStrategy;

/// Project-local config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "dagscope.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagscopeConfig {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub generate: GenerateConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub topo_strategy: TopoStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default = "default_report_output")]
    pub output: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            output: default_report_output(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_data_dir")]
    pub output_dir: PathBuf,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            output_dir: default_data_dir(),
        }
    }
}

/// Load `path`, or defaults if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_from(path: &Path) -> Result<DagscopeConfig> {
    if !path.exists() {
        return Ok(DagscopeConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<DagscopeConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the effective config for a working directory.
///
/// Lookup order: `<project_root>/dagscope.toml`, then
/// `<config_dir>/dagscope/config.toml`, then built-in defaults.
///
/// # Errors
///
/// Returns an error if the first file found cannot be read or parsed.
pub fn load_config(project_root: &Path) -> Result<DagscopeConfig> {
    let project = project_root.join(PROJECT_CONFIG_FILE);
    if project.exists() {
        return load_config_from(&project);
    }

    match user_config_path() {
        Some(path) => load_config_from(&path),
        None => Ok(DagscopeConfig::default()),
    }
}

/// `<config_dir>/dagscope/config.toml`, if the platform has a config dir.
#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dagscope/config.toml"))
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_report_output() -> PathBuf {
    PathBuf::from("report/results.csv")
}

const fn default_seed() -> u64 {
    42
}
