//! Failures raised while finalizing entry-point commands.
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = PrimeError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum PrimeError {
    /// The primary command token was not found under the staged root, in the
    /// tree walk, or on the host.
    #[error("failed to find command {command:?}: it is not in the staged tree or on the host")]
    CommandNotFound { command: String },

    #[error(
        "the command {command:?} for app {app:?} must be relative to the staged root \
         and conform to the runtime command pattern, and no wrapper may be generated here"
    )]
    InvalidCommandFormat { app: String, command: String },

    #[error("the command {command:?} for app {app:?} is not an executable file in the staged root")]
    CommandNotExecutable { app: String, command: String },

    #[error("no closing quotation in {text:?}")]
    UnbalancedQuotes { text: String },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PrimeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
