//! Per-entry-point command state and finalization.
use crate::context::PrimeContext;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{PrimeError, Result};
use crate::grammar::{is_grammar_valid, needs_wrapper};
use crate::lexer::split_preserving_quotes;
use crate::normalize::normalize_command;
use crate::probe::is_executable_file;
use crate::wrapper::write_wrapper;
use std::fmt;
use std::path::PathBuf;

/// One declared entry point of an application, such as its `command` or
/// `stop-command`.
///
/// `command` only moves forward: raw text, then normalized text, then (when a
/// wrapper is needed) the wrapper file name. Once `wrapped_command` is set it
/// holds the text the wrapper execs and is never replaced.
#[derive(Debug, Clone)]
pub struct AppCommand {
    app_name: String,
    command_name: String,
    command: String,
    wrapped_command: Option<String>,
    diagnostics: Diagnostics,
}

impl AppCommand {
    pub fn new(
        app_name: impl Into<String>,
        command_name: impl Into<String>,
        command: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            command_name: command_name.into(),
            command: command.into(),
            wrapped_command: None,
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn command_name(&self) -> &str {
        &self.command_name
    }

    /// The public command text.
    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn wrapped_command(&self) -> Option<&str> {
        self.wrapped_command.as_deref()
    }

    /// Events recorded by every finalization of this command, in order.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Root-relative name of the wrapper, `<command-name>-<app-name>.wrapper`.
    pub fn wrapper_file_name(&self) -> String {
        format!("{}-{}.wrapper", self.command_name, self.app_name)
    }

    pub fn requires_wrapper(&self) -> bool {
        needs_wrapper(self.wrapped_command.as_deref().unwrap_or(&self.command))
    }

    /// Settle the public command text.
    ///
    /// With `apply_massage` the raw text is normalized first. Commands that
    /// are absolute or outside the grammar are redirected to a wrapper when
    /// `allow_wrapper` permits it; everything else must name an executable
    /// file under the staged root.
    pub fn finalize(
        &mut self,
        allow_wrapper: bool,
        apply_massage: bool,
        context: &PrimeContext,
    ) -> Result<String> {
        if self.wrapped_command.is_some() {
            return Ok(self.command.clone());
        }

        if apply_massage {
            let normalization = normalize_command(&self.command, context)?;
            let fatal = normalization.diagnostics.first_fatal();
            self.diagnostics.extend(normalization.diagnostics);
            if let Some(err) = fatal {
                return Err(err);
            }
            if let Some(command) = normalization.command {
                self.command = command;
            }
        }

        if self.requires_wrapper() {
            if !allow_wrapper {
                return Err(PrimeError::InvalidCommandFormat {
                    app: self.app_name.clone(),
                    command: self.command.clone(),
                });
            }
            if !is_grammar_valid(&self.command) {
                self.diagnostics.push(Diagnostic::WrapperGenerated {
                    app: self.app_name.clone(),
                    command: self.command.clone(),
                });
            }
            let wrapper = self.wrapper_file_name();
            self.wrapped_command = Some(std::mem::replace(&mut self.command, wrapper));
        } else {
            self.check_executable(context)?;
        }

        tracing::debug!(
            app = %self.app_name,
            command_name = %self.command_name,
            command = %self.command,
            "finalized command"
        );
        Ok(self.command.clone())
    }

    fn check_executable(&self, context: &PrimeContext) -> Result<()> {
        let not_executable = || PrimeError::CommandNotExecutable {
            app: self.app_name.clone(),
            command: self.command.clone(),
        };
        let parts = split_preserving_quotes(&self.command)?;
        let first = parts.first().ok_or_else(not_executable)?;
        if is_executable_file(&context.root().join(first)) {
            Ok(())
        } else {
            Err(not_executable())
        }
    }

    /// Write the wrapper for this command, if finalization asked for one.
    ///
    /// Relative commands are anchored to the root variable, since a wrapper
    /// cannot exec a relative path.
    pub fn write_wrapper(&self, context: &PrimeContext) -> Result<Option<PathBuf>> {
        let Some(wrapped) = self.wrapped_command.as_deref() else {
            return Ok(None);
        };
        let invoked = if wrapped.starts_with('/') {
            wrapped.to_string()
        } else {
            format!("{}{wrapped}", context.root_prefix())
        };
        let path = context.root().join(self.wrapper_file_name());
        write_wrapper(&path, &invoked)?;
        Ok(Some(path))
    }
}

impl fmt::Display for AppCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command)
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
