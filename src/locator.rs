//! Locating a bare command name inside the staged tree or on the host.
//!
//! Search order, first match wins:
//! 1. each known binary directory under the staged root;
//! 2. every directory of the staged tree (legacy layouts such as
//!    `opt/ros/bin/roslaunch`), subject to [`TreeSearch`];
//! 3. the host, through a [`HostResolver`].
//!
//! Nothing is cached: the staged tree may change between calls.
use crate::probe::is_executable_file;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Host executable lookup, injected so tests never depend on `PATH`.
pub trait HostResolver: Send + Sync {
    fn resolve(&self, name: &str) -> Option<PathBuf>;
}

/// Resolves names against the process `PATH`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WhichResolver;

impl HostResolver for WhichResolver {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}

/// Fixed name-to-path table.
#[derive(Debug, Default, Clone)]
pub struct StaticResolver {
    entries: BTreeMap<String, PathBuf>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.entries.insert(name.into(), path.into());
        self
    }
}

impl HostResolver for StaticResolver {
    fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.entries.get(name).cloned()
    }
}

/// How far the legacy whole-tree fallback is allowed to look.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TreeSearch {
    #[default]
    Full,
    /// Only directories at most `max_depth` levels below the staged root;
    /// `0` means the root itself.
    Bounded { max_depth: usize },
    Disabled,
}

impl fmt::Display for TreeSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::Bounded { max_depth } => write!(f, "bounded({max_depth})"),
            Self::Disabled => f.write_str("disabled"),
        }
    }
}

impl TreeSearch {
    fn find(&self, name: &str, root: &Path) -> Option<PathBuf> {
        let walker = match self {
            Self::Disabled => return None,
            Self::Full => WalkDir::new(root),
            Self::Bounded { max_depth } => WalkDir::new(root).max_depth(*max_depth),
        };
        walker
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.file_type().is_dir())
            .map(|entry| entry.path().join(name))
            .find(|candidate| is_executable_file(candidate))
    }
}

/// Where a located executable was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    BinaryDirectory,
    StagedTree,
    Host,
}

impl SearchSource {
    /// True for the compatibility paths taken when the conventional binary
    /// directories do not hold the command.
    pub fn is_fallback(self) -> bool {
        !matches!(self, Self::BinaryDirectory)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub path: PathBuf,
    pub source: SearchSource,
}

pub struct ExecutableLocator {
    bin_dirs: Vec<PathBuf>,
    tree_search: TreeSearch,
    host: Box<dyn HostResolver>,
}

impl fmt::Debug for ExecutableLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutableLocator")
            .field("bin_dirs", &self.bin_dirs)
            .field("tree_search", &self.tree_search)
            .finish_non_exhaustive()
    }
}

impl ExecutableLocator {
    pub fn new(
        bin_dirs: Vec<PathBuf>,
        tree_search: TreeSearch,
        host: Box<dyn HostResolver>,
    ) -> Self {
        Self {
            bin_dirs,
            tree_search,
            host,
        }
    }

    pub fn bin_dirs(&self) -> &[PathBuf] {
        &self.bin_dirs
    }

    pub fn tree_search(&self) -> TreeSearch {
        self.tree_search
    }

    /// Find `name`, returning an absolute path inside `root` or on the host.
    pub fn locate(&self, name: &str, root: &Path) -> Option<Located> {
        let found = self
            .bin_dirs
            .iter()
            .map(|dir| root.join(dir).join(name))
            .find(|candidate| is_executable_file(candidate))
            .map(|path| (path, SearchSource::BinaryDirectory))
            .or_else(|| {
                self.tree_search
                    .find(name, root)
                    .map(|path| (path, SearchSource::StagedTree))
            })
            .or_else(|| self.host.resolve(name).map(|path| (path, SearchSource::Host)));

        let (path, source) = found?;
        tracing::debug!(name, path = %path.display(), ?source, "located executable");
        Some(Located { path, source })
    }
}

#[cfg(test)]
#[path = "locator_tests.rs"]
mod tests;
