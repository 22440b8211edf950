//! Rewriting raw entry-point commands into a form the runtime can invoke.
//!
//! Two things happen here:
//! - **interpreters**: when the command file starts with a shebang, the
//!   interpreter is prepended explicitly and the script path is anchored to
//!   the root variable so the interpreter can find it at run time;
//! - **paths**: an ambiguous command name is searched for and replaced by
//!   its root-relative (or host) path.
//!
//! Absolute commands are left alone; they always end up behind a wrapper.
use crate::context::PrimeContext;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::Result;
use crate::lexer::split_preserving_quotes;
use crate::resolve::{resolve_command_path, strip_command_leaders, ResolvedPath};
use crate::shebang::read_shebang;

const ENV_LAUNCHER: &str = "/usr/bin/env";

/// Result of one normalization pass.
///
/// `command` is `None` exactly when `diagnostics` holds a fatal event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalization {
    pub command: Option<String>,
    pub diagnostics: Diagnostics,
}

impl Normalization {
    fn unchanged(raw: &str) -> Self {
        Self {
            command: Some(raw.to_string()),
            diagnostics: Diagnostics::new(),
        }
    }

    fn failed(diagnostics: Diagnostics) -> Self {
        Self {
            command: None,
            diagnostics,
        }
    }
}

pub fn normalize_command(raw: &str, context: &PrimeContext) -> Result<Normalization> {
    if raw.starts_with('/') {
        return Ok(Normalization::unchanged(raw));
    }

    let root_prefix = context.root_prefix();
    let stripped = raw.strip_prefix(root_prefix.as_str()).unwrap_or(raw);
    let mut command_parts = split_preserving_quotes(stripped)?;
    let mut diagnostics = Diagnostics::new();

    let Some(first) = command_parts.first().cloned() else {
        diagnostics.push(Diagnostic::CommandNotFound {
            command: raw.to_string(),
        });
        return Ok(Normalization::failed(diagnostics));
    };

    let command_path = context
        .root()
        .join(strip_command_leaders(&first, context));
    let mut shebang_parts = if command_path.is_file() {
        read_shebang(&command_path)?.into_parts()
    } else {
        Vec::new()
    };
    let interpreted = !shebang_parts.is_empty();

    if interpreted {
        resolve_interpreter(&mut shebang_parts, &first, context, &mut diagnostics);
    }

    let resolved = resolve_command_path(&first, context);
    let mut resolved_command = match &resolved {
        ResolvedPath::NotFound => {
            diagnostics.push(Diagnostic::CommandNotFound { command: first });
            return Ok(Normalization::failed(diagnostics));
        }
        ResolvedPath::Literal(path) => path.clone(),
        ResolvedPath::Searched { path, source } => {
            diagnostics.push(Diagnostic::CommandSearched {
                command: first.clone(),
                resolved: path.clone(),
                source: *source,
            });
            path.clone()
        }
    };
    if interpreted && !resolved_command.starts_with('/') {
        resolved_command = format!("{root_prefix}{resolved_command}");
    }
    command_parts[0] = resolved_command;

    shebang_parts.extend(command_parts);
    let massaged = shebang_parts.join(" ");

    if massaged != raw {
        let explanation = if raw.starts_with(root_prefix.as_str()) {
            Diagnostic::RedundantRootPrefix {
                command: raw.to_string(),
                prefix: root_prefix,
            }
        } else if interpreted {
            Diagnostic::RewrittenForInterpreter {
                command: raw.to_string(),
                rewritten: massaged.clone(),
            }
        } else {
            Diagnostic::RewrittenCommand {
                command: raw.to_string(),
                rewritten: massaged.clone(),
            }
        };
        diagnostics.push(explanation);
    }

    Ok(Normalization {
        command: Some(massaged),
        diagnostics,
    })
}

/// Replace the interpreter token with its resolved path when one is found.
///
/// A missing interpreter is not an error: the runtime may still provide it.
fn resolve_interpreter(
    shebang_parts: &mut Vec<String>,
    command: &str,
    context: &PrimeContext,
    diagnostics: &mut Diagnostics,
) {
    if shebang_parts.len() > 1 && shebang_parts[0] == ENV_LAUNCHER {
        shebang_parts.remove(0);
    }
    let interpreter = shebang_parts[0].clone();
    if interpreter == ENV_LAUNCHER {
        diagnostics.push(Diagnostic::InterpreterUnresolved { interpreter });
        return;
    }

    match resolve_command_path(&interpreter, context) {
        ResolvedPath::NotFound => {
            diagnostics.push(Diagnostic::InterpreterUnresolved { interpreter });
        }
        ResolvedPath::Literal(path) => shebang_parts[0] = path,
        ResolvedPath::Searched { path, source } => {
            diagnostics.push(Diagnostic::InterpreterSearched {
                interpreter,
                command: command.to_string(),
                resolved: path.clone(),
                source,
            });
            shebang_parts[0] = path;
        }
    }
}

#[cfg(test)]
#[path = "normalize_tests.rs"]
mod tests;
