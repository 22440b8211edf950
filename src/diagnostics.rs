//! Ordered record of what happened while resolving a command.
//!
//! Resolution produces events; reporting them is left to the caller so the
//! same pass can be logged by the CLI, serialized into a report, or asserted
//! on in tests.
use crate::error::PrimeError;
use crate::locator::SearchSource;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Advisory,
    Fatal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The primary command token was found nowhere.
    CommandNotFound { command: String },
    /// The primary command token was found only by searching.
    CommandSearched {
        command: String,
        resolved: String,
        source: SearchSource,
    },
    /// A shebang interpreter was found nowhere; the token is kept as written.
    InterpreterUnresolved { interpreter: String },
    /// A shebang interpreter was found only by searching.
    InterpreterSearched {
        interpreter: String,
        command: String,
        resolved: String,
        source: SearchSource,
    },
    /// The command started with a root prefix that the runtime adds anyway.
    RedundantRootPrefix { command: String, prefix: String },
    /// The command was rewritten to invoke its interpreter explicitly.
    RewrittenForInterpreter { command: String, rewritten: String },
    RewrittenCommand { command: String, rewritten: String },
    /// The command needs a wrapper because it does not satisfy the grammar.
    WrapperGenerated { app: String, command: String },
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Self::CommandNotFound { .. } => Severity::Fatal,
            _ => Severity::Advisory,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }

    /// True when a compatibility search (tree walk or host) was needed.
    pub fn used_search_fallback(&self) -> bool {
        match self {
            Self::CommandSearched { source, .. } | Self::InterpreterSearched { source, .. } => {
                source.is_fallback()
            }
            _ => false,
        }
    }

    fn to_error(&self) -> Option<PrimeError> {
        match self {
            Self::CommandNotFound { command } => Some(PrimeError::CommandNotFound {
                command: command.clone(),
            }),
            _ => None,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CommandNotFound { command } => {
                write!(f, "failed to find command {command:?}")
            }
            Self::CommandSearched {
                command, resolved, ..
            } => write!(
                f,
                "the command {command:?} was not found in the staged root, but found {resolved:?}"
            ),
            Self::InterpreterUnresolved { interpreter } => {
                write!(f, "unable to find interpreter in any paths: {interpreter:?}")
            }
            Self::InterpreterSearched {
                interpreter,
                command,
                resolved,
                ..
            } => write!(
                f,
                "the interpreter {interpreter:?} for {command:?} was resolved to {resolved:?}"
            ),
            Self::RedundantRootPrefix { command, prefix } => {
                write!(f, "found unneeded {prefix:?} in command {command:?}")
            }
            Self::RewrittenForInterpreter { command, rewritten } => write!(
                f,
                "the command {command:?} has been changed to {rewritten:?} to safely account for the interpreter"
            ),
            Self::RewrittenCommand { command, rewritten } => {
                write!(f, "the command {command:?} has been changed to {rewritten:?}")
            }
            Self::WrapperGenerated { command, .. } => write!(
                f,
                "a shell wrapper will be generated for command {command:?} as it does not conform \
                 with the command pattern expected by the runtime. Commands must be relative to \
                 the staged root and can only consist of alphanumeric characters, spaces, and \
                 the following special characters: / . _ # : $ -"
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics(Vec<Diagnostic>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.0.push(diagnostic);
    }

    pub fn extend(&mut self, other: Diagnostics) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn advisories(&self) -> impl Iterator<Item = &Diagnostic> {
        self.0.iter().filter(|diagnostic| !diagnostic.is_fatal())
    }

    /// The first fatal event as an error, if any.
    pub fn first_fatal(&self) -> Option<PrimeError> {
        self.0.iter().find_map(Diagnostic::to_error)
    }

    /// Emit every advisory as a warning, in order.
    pub fn report(&self, app: &str, command_name: &str) {
        for diagnostic in self.advisories() {
            tracing::warn!(app, command_name, "{diagnostic}");
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_commands_are_fatal() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::InterpreterUnresolved {
            interpreter: "widget-lang".to_string(),
        });
        diagnostics.push(Diagnostic::CommandNotFound {
            command: "missing".to_string(),
        });

        assert_eq!(diagnostics.advisories().count(), 1);
        let err = diagnostics.first_fatal().expect("fatal event");
        assert!(matches!(err, PrimeError::CommandNotFound { command } if command == "missing"));
    }

    #[test]
    fn serializes_with_kind_tags() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(Diagnostic::CommandSearched {
            command: "foo".to_string(),
            resolved: "bin/foo".to_string(),
            source: SearchSource::BinaryDirectory,
        });
        let json = serde_json::to_value(&diagnostics).expect("serialize diagnostics");
        assert_eq!(
            json,
            serde_json::json!([{
                "kind": "command_searched",
                "command": "foo",
                "resolved": "bin/foo",
                "source": "binary_directory",
            }])
        );
    }
}
