//! Finalizing every entry point of a package in one pass.
//!
//! All commands are finalized before any wrapper is written, so a failure
//! leaves the staged tree untouched.
use crate::command::AppCommand;
use crate::config::{Adapter, AppsFile};
use crate::context::PrimeContext;
use crate::diagnostics::Diagnostics;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub app: String,
    pub name: String,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<PathBuf>,
    #[serde(skip_serializing_if = "Diagnostics::is_empty")]
    pub diagnostics: Diagnostics,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PrimeReport {
    pub entries: Vec<EntryReport>,
}

impl PrimeReport {
    pub fn wrappers(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.iter().filter_map(|entry| entry.wrapper.as_ref())
    }
}

fn finalize_entry(
    command: &mut AppCommand,
    adapter: Adapter,
    context: &PrimeContext,
) -> Result<()> {
    let outcome = command.finalize(adapter.allow_wrapper(), adapter.apply_massage(), context);
    command
        .diagnostics()
        .report(command.app_name(), command.command_name());
    outcome.with_context(|| {
        format!(
            "finalize {} for app {}",
            command.command_name(),
            command.app_name()
        )
    })?;
    Ok(())
}

pub fn prime_apps(apps: &AppsFile, context: &PrimeContext) -> Result<PrimeReport> {
    let mut commands = apps.app_commands();
    tracing::info!(
        entries = commands.len(),
        root = %context.root().display(),
        root_variable = context.root_variable(),
        tree_search = %context.locator().tree_search(),
        "finalizing entry points"
    );
    for (command, adapter) in &mut commands {
        finalize_entry(command, *adapter, context)?;
    }

    let mut report = PrimeReport::default();
    for (command, _) in commands {
        let wrapper = command
            .write_wrapper(context)
            .with_context(|| format!("write wrapper {}", command.wrapper_file_name()))?;
        report.entries.push(EntryReport {
            app: command.app_name().to_string(),
            name: command.command_name().to_string(),
            command: command.command().to_string(),
            wrapper,
            diagnostics: command.diagnostics().clone(),
        });
    }
    Ok(report)
}
