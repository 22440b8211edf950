//! Staged-tree fixtures shared by unit tests.
use crate::context::PrimeContext;
use crate::locator::{ExecutableLocator, StaticResolver, TreeSearch};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub(crate) struct StagedTree {
    temp: TempDir,
}

impl StagedTree {
    pub(crate) fn new() -> Self {
        Self {
            temp: TempDir::new().expect("create staged root"),
        }
    }

    pub(crate) fn root(&self) -> &Path {
        self.temp.path()
    }

    pub(crate) fn write(&self, rel: &str, contents: &str, mode: u32) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent directory");
        }
        fs::write(&path, contents).expect("write staged file");
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).expect("chmod staged file");
        path
    }

    pub(crate) fn executable(&self, rel: &str) -> PathBuf {
        self.write(rel, "\x7fELF", 0o755)
    }

    pub(crate) fn script(&self, rel: &str, shebang: &str) -> PathBuf {
        self.write(rel, &format!("{shebang}\necho hi\n"), 0o755)
    }

    pub(crate) fn context(&self, host: StaticResolver) -> PrimeContext {
        self.context_with(host, TreeSearch::Full)
    }

    pub(crate) fn context_with(&self, host: StaticResolver, tree_search: TreeSearch) -> PrimeContext {
        let locator = ExecutableLocator::new(
            vec![PathBuf::from("usr/bin"), PathBuf::from("bin")],
            tree_search,
            Box::new(host),
        );
        PrimeContext::new(self.root().to_path_buf(), "$SNAP", locator)
    }
}
