use std::fs;
use std::path::Path;

#[cfg(unix)]
const ANY_EXECUTE_BITS: u32 = 0o111;

/// True when `path` exists, is a regular file (after following symlinks),
/// and carries at least one execute bit for owner, group, or other.
pub fn is_executable_file(path: &Path) -> bool {
    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };
    if !metadata.is_file() {
        return false;
    }
    has_execute_bit(&metadata)
}

#[cfg(unix)]
fn has_execute_bit(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & ANY_EXECUTE_BITS != 0
}

#[cfg(not(unix))]
fn has_execute_bit(_metadata: &fs::Metadata) -> bool {
    true
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    fn write_with_mode(dir: &Path, name: &str, mode: u32) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, "#!/bin/sh\n").expect("write file");
        fs::set_permissions(&path, fs::Permissions::from_mode(mode)).expect("chmod");
        path
    }

    #[test]
    fn any_execute_bit_is_enough() {
        let temp = TempDir::new().expect("tempdir");
        assert!(is_executable_file(&write_with_mode(temp.path(), "owner", 0o744)));
        assert!(is_executable_file(&write_with_mode(temp.path(), "group", 0o654)));
        assert!(is_executable_file(&write_with_mode(temp.path(), "other", 0o645)));
        assert!(!is_executable_file(&write_with_mode(temp.path(), "plain", 0o644)));
    }

    #[test]
    fn directories_and_missing_paths_are_not_executable() {
        let temp = TempDir::new().expect("tempdir");
        let dir = temp.path().join("bin");
        fs::create_dir(&dir).expect("mkdir");
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).expect("chmod");
        assert!(!is_executable_file(&dir));
        assert!(!is_executable_file(&temp.path().join("missing")));
    }
}
