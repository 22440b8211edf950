use crate::locator::ExecutableLocator;
use std::path::{Path, PathBuf};

/// Everything resolution needs to know about one staged tree.
///
/// Holds no per-command state, so a single context can be shared by every
/// entry point, including across threads.
#[derive(Debug)]
pub struct PrimeContext {
    root: PathBuf,
    root_variable: String,
    locator: ExecutableLocator,
}

impl PrimeContext {
    pub fn new(root: PathBuf, root_variable: impl Into<String>, locator: ExecutableLocator) -> Self {
        Self {
            root,
            root_variable: root_variable.into(),
            locator,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Placeholder the runtime substitutes with the staged root, e.g. `$SNAP`.
    pub fn root_variable(&self) -> &str {
        &self.root_variable
    }

    /// The root variable followed by a path separator, e.g. `$SNAP/`.
    pub fn root_prefix(&self) -> String {
        format!("{}/", self.root_variable)
    }

    pub fn locator(&self) -> &ExecutableLocator {
        &self.locator
    }
}
