use anyhow::{anyhow, Context, Result};
use clap::Parser;
use primecmd::config::{self, PrimeConfig};
use primecmd::grammar::{is_grammar_valid, needs_wrapper};
use primecmd::locator::{TreeSearch, WhichResolver};
use primecmd::prime::{prime_apps, PrimeReport};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{CheckArgs, Command, PrimeArgs, RootArgs};

fn main() -> Result<ExitCode> {
    let args = RootArgs::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Prime(args) => run_prime(args),
        Command::Check(args) => Ok(run_check(&args)),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_prime(args: PrimeArgs) -> Result<ExitCode> {
    let root = args
        .root
        .canonicalize()
        .with_context(|| format!("resolve staged root {}", args.root.display()))?;
    if !root.is_dir() {
        return Err(anyhow!("staged root {} is not a directory", root.display()));
    }

    let config = resolve_config(&args)?;
    let apps = config::load_apps(&args.apps)?;
    let context = config.context(root, Box::new(WhichResolver));
    let report = prime_apps(&apps, &context)?;

    if args.json {
        let text = serde_json::to_string_pretty(&report).context("serialize prime report")?;
        println!("{text}");
    } else {
        print_report(&report);
    }
    Ok(ExitCode::SUCCESS)
}

fn resolve_config(args: &PrimeArgs) -> Result<PrimeConfig> {
    let mut config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => PrimeConfig::default(),
    };
    if !args.bin_dirs.is_empty() {
        config.bin_dirs = args.bin_dirs.clone();
    }
    if let Some(mode) = args.tree_search.as_deref() {
        config.tree_search = parse_tree_search(mode)?;
    }
    if let Some(token) = &args.root_variable {
        config.root_variable = token.clone();
    }
    config::validate_config(&config)?;
    Ok(config)
}

fn parse_tree_search(mode: &str) -> Result<TreeSearch> {
    match mode {
        "full" => Ok(TreeSearch::Full),
        "disabled" => Ok(TreeSearch::Disabled),
        depth => depth
            .parse()
            .map(|max_depth| TreeSearch::Bounded { max_depth })
            .map_err(|_| {
                anyhow!("--tree-search must be \"full\", \"disabled\", or a depth (got {mode:?})")
            }),
    }
}

fn print_report(report: &PrimeReport) {
    for entry in &report.entries {
        println!("{}.{}: {}", entry.app, entry.name, entry.command);
        if let Some(wrapper) = &entry.wrapper {
            println!("  wrapper: {}", wrapper.display());
        }
    }
}

fn run_check(args: &CheckArgs) -> ExitCode {
    let valid = is_grammar_valid(&args.command);
    let wrapper = needs_wrapper(&args.command);
    println!("grammar_valid: {valid}");
    println!("requires_wrapper: {wrapper}");
    if wrapper {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
