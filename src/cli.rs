//! CLI argument parsing for entry-point finalization.
//!
//! The CLI only wires inputs to the library; resolution policy lives in the
//! library so other packaging front ends can reuse it.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "primecmd",
    version,
    about = "Finalize packaged application entry points into runtime-invocable commands",
    after_help = "Commands:\n  prime --root <dir> --apps <file>  Finalize every entry point and write wrappers\n  check <command>                   Report whether a command needs a wrapper\n\nExamples:\n  primecmd prime --root prime --apps apps.json\n  primecmd prime --root prime --apps apps.json --bin-dir opt/tool/bin --json\n  primecmd check '/opt/tool/bin/run-it --flag'",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Log resolution details (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Prime(PrimeArgs),
    Check(CheckArgs),
}

/// Prime command inputs for one staged tree.
#[derive(Parser, Debug)]
#[command(about = "Finalize entry-point commands and write wrappers")]
pub struct PrimeArgs {
    /// Staged root holding the package's installed-file layout
    #[arg(long, value_name = "DIR")]
    pub root: PathBuf,

    /// JSON document declaring apps and their entry-point commands
    #[arg(long, value_name = "FILE")]
    pub apps: PathBuf,

    /// Optional JSON config (root variable, binary dirs, tree search)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Known binary directory relative to the root; replaces the configured list
    #[arg(long = "bin-dir", value_name = "DIR")]
    pub bin_dirs: Vec<String>,

    /// Legacy whole-tree search: "full", "disabled", or a maximum depth
    #[arg(long, value_name = "MODE")]
    pub tree_search: Option<String>,

    /// Placeholder the runtime substitutes with the staged root
    #[arg(long, value_name = "TOKEN")]
    pub root_variable: Option<String>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

/// Check command inputs for a single command text.
#[derive(Parser, Debug)]
#[command(about = "Check a command against the runtime command grammar")]
pub struct CheckArgs {
    /// Command text as it would appear in the runtime manifest
    pub command: String,
}
