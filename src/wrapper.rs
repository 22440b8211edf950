use crate::error::{PrimeError, Result};
use std::fs;
use std::path::Path;

#[cfg(unix)]
const WRAPPER_MODE: u32 = 0o755;

/// Two-line POSIX script that execs `invoked` with the wrapper's arguments.
///
/// `invoked` is inserted as-is; it was already split and re-joined, so no
/// further quoting is applied.
pub fn wrapper_script(invoked: &str) -> String {
    format!("#!/bin/sh\nexec {invoked} \"$@\"\n")
}

pub fn write_wrapper(path: &Path, invoked: &str) -> Result<()> {
    fs::write(path, wrapper_script(invoked)).map_err(|err| PrimeError::io(path, err))?;
    set_executable(path)?;
    tracing::info!(path = %path.display(), invoked, "wrote command wrapper");
    Ok(())
}

#[cfg(unix)]
fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(WRAPPER_MODE))
        .map_err(|err| PrimeError::io(path, err))
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    #[test]
    fn script_forwards_all_arguments() {
        assert_eq!(
            wrapper_script("$SNAP/bin/foo --flag"),
            "#!/bin/sh\nexec $SNAP/bin/foo --flag \"$@\"\n"
        );
    }

    #[test]
    fn written_wrapper_is_executable_by_everyone() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("command-app.wrapper");

        write_wrapper(&path, "/opt/tool/bin/run-it").expect("write wrapper");

        let contents = fs::read_to_string(&path).expect("read wrapper");
        assert_eq!(contents, "#!/bin/sh\nexec /opt/tool/bin/run-it \"$@\"\n");
        let mode = fs::metadata(&path).expect("stat wrapper").permissions().mode();
        assert_eq!(mode & 0o777, 0o755);
    }

    #[test]
    fn existing_wrapper_is_replaced() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("command-app.wrapper");
        fs::write(&path, "stale").expect("seed stale wrapper");

        write_wrapper(&path, "/bin/true").expect("write wrapper");

        let contents = fs::read_to_string(&path).expect("read wrapper");
        assert_eq!(contents, "#!/bin/sh\nexec /bin/true \"$@\"\n");
    }
}
