//! Prime configuration and entry-point input.
//!
//! Both documents are JSON. Every config field has a default, so an absent
//! config file and `{}` mean the same thing.
use crate::command::AppCommand;
use crate::context::PrimeContext;
use crate::locator::{ExecutableLocator, HostResolver, TreeSearch};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_ROOT_VARIABLE: &str = "$SNAP";

/// Conventional executable locations, searched in this order.
pub const DEFAULT_BIN_DIRS: [&str; 4] = ["usr/sbin", "usr/bin", "sbin", "bin"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrimeConfig {
    pub root_variable: String,
    pub bin_dirs: Vec<String>,
    pub tree_search: TreeSearch,
}

impl Default for PrimeConfig {
    fn default() -> Self {
        Self {
            root_variable: DEFAULT_ROOT_VARIABLE.to_string(),
            bin_dirs: DEFAULT_BIN_DIRS.iter().map(ToString::to_string).collect(),
            tree_search: TreeSearch::default(),
        }
    }
}

impl PrimeConfig {
    /// Build the resolution context for `root`.
    ///
    /// Binary directories missing from the staged tree are skipped.
    pub fn context(&self, root: PathBuf, host: Box<dyn HostResolver>) -> PrimeContext {
        let bin_dirs = self
            .bin_dirs
            .iter()
            .map(PathBuf::from)
            .filter(|dir| root.join(dir).is_dir())
            .collect();
        let locator = ExecutableLocator::new(bin_dirs, self.tree_search, host);
        PrimeContext::new(root, self.root_variable.clone(), locator)
    }
}

pub fn load_config(path: &Path) -> Result<PrimeConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: PrimeConfig = serde_json::from_slice(&bytes).context("parse prime config JSON")?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &PrimeConfig) -> Result<()> {
    let root_variable = config.root_variable.as_str();
    if root_variable.is_empty() {
        return Err(anyhow!("root_variable must be non-empty"));
    }
    if root_variable.contains('/') || root_variable.chars().any(char::is_whitespace) {
        return Err(anyhow!(
            "root_variable must not contain '/' or whitespace (got {root_variable:?})"
        ));
    }
    for dir in &config.bin_dirs {
        validate_relative_path(dir, "bin_dirs")?;
    }
    Ok(())
}

fn validate_relative_path(rel: &str, label: &str) -> Result<()> {
    let path = Path::new(rel);
    if rel.is_empty() || path.is_absolute() || has_parent_components(path) {
        return Err(anyhow!(
            "{label} entries must be relative paths without '..' (got {rel:?})"
        ));
    }
    Ok(())
}

fn has_parent_components(path: &Path) -> bool {
    path.components()
        .any(|component| matches!(component, Component::ParentDir))
}

/// How an application's commands are handed to the runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adapter {
    /// Commands are normalized and may be wrapped.
    #[default]
    Legacy,
    /// Commands are used exactly as declared.
    None,
}

impl Adapter {
    pub fn apply_massage(self) -> bool {
        matches!(self, Self::Legacy)
    }

    pub fn allow_wrapper(self) -> bool {
        matches!(self, Self::Legacy)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppEntry {
    #[serde(default)]
    pub adapter: Adapter,
    /// Entry-point name (`command`, `stop-command`, ...) to raw command text.
    pub commands: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppsFile {
    pub apps: BTreeMap<String, AppEntry>,
}

impl AppsFile {
    /// One [`AppCommand`] per declared entry point, with its adapter.
    pub fn app_commands(&self) -> Vec<(AppCommand, Adapter)> {
        self.apps
            .iter()
            .flat_map(|(app_name, entry)| {
                entry.commands.iter().map(move |(command_name, command)| {
                    (AppCommand::new(app_name, command_name, command), entry.adapter)
                })
            })
            .collect()
    }
}

pub fn load_apps(path: &Path) -> Result<AppsFile> {
    let bytes = fs::read(path).with_context(|| format!("read apps {}", path.display()))?;
    serde_json::from_slice(&bytes).context("parse apps JSON")
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
