//! yurimerge CLI

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use yurimerge_core::config::{MergeConfig, DEFAULT_GUARD, DEFAULT_OUTPUT};
use yurimerge_core::filter::LineFilter;
use yurimerge_core::merge::{amalgamate, check, render, CheckOutcome};
use yurimerge_core::output::{write_report_json, write_report_ndjson};

/// CLI entrypoint for yurimerge.
#[derive(Debug, Parser)]
#[command(
    name = "yurimerge",
    version,
    about = "Fold the split libyuri headers into a single yuri.h"
)]
pub struct Cli {
    /// Headers to merge, in order (default: reflect.h serializer.h deserializer.h)
    #[arg(value_hint = ValueHint::FilePath)]
    sources: Vec<PathBuf>,

    /// Directory that relative paths are resolved against
    #[arg(short = 'C', long = "dir", default_value = ".", value_hint = ValueHint::DirPath)]
    dir: PathBuf,

    /// Where the merged header is written
    #[arg(short = 'o', long = "output", default_value = DEFAULT_OUTPUT, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Include guard symbol for the merged header
    #[arg(short = 'g', long = "guard", default_value = DEFAULT_GUARD)]
    guard: String,

    /// Additional line prefix to drop (repeatable)
    #[arg(long = "drop-prefix", value_hint = ValueHint::Other)]
    drop_prefixes: Vec<String>,

    /// Print the merged header to stdout instead of writing the output file
    #[arg(long = "stdout", action = ArgAction::SetTrue, conflicts_with = "check")]
    stdout: bool,

    /// Fail if the output file is missing or differs from a fresh merge
    #[arg(long = "check", action = ArgAction::SetTrue)]
    check: bool,

    /// Print the merge report as a JSON document
    #[arg(
        long = "json",
        action = ArgAction::SetTrue,
        conflicts_with_all = ["ndjson", "stdout", "check"]
    )]
    json: bool,

    /// Print one JSON line per merged header
    #[arg(long = "ndjson", action = ArgAction::SetTrue, conflicts_with_all = ["stdout", "check"])]
    ndjson: bool,

    /// Log every merged header
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,
}

/// Parse CLI args and run the merge.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    execute(&cli)
}

fn execute(cli: &Cli) -> Result<()> {
    let config = build_config(cli);
    debug!(?config, "resolved merge configuration");

    if cli.check {
        return run_check(&config);
    }

    if cli.stdout {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        render(&config, &mut handle).context("merge failed")?;
        handle.flush()?;
        return Ok(());
    }

    let report = amalgamate(&config).context("merge failed")?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.ndjson {
        write_report_ndjson(&report, &mut handle)?;
    } else if cli.json {
        write_report_json(&report, &mut handle)?;
    }

    Ok(())
}

fn build_config(cli: &Cli) -> MergeConfig {
    let filter = LineFilter::new().with_extra_prefixes(cli.drop_prefixes.iter().cloned());

    let mut config = MergeConfig::new()
        .with_base_dir(&cli.dir)
        .with_output(&cli.output)
        .with_guard(&cli.guard)
        .with_filter(filter);

    if !cli.sources.is_empty() {
        config = config.with_sources(cli.sources.iter().cloned());
    }

    config
}

fn run_check(config: &MergeConfig) -> Result<()> {
    let output = config.output_path();

    match check(config).context("check failed")? {
        CheckOutcome::UpToDate => Ok(()),
        CheckOutcome::Missing => Err(anyhow!("{} does not exist", output.display())),
        CheckOutcome::Stale => Err(anyhow!(
            "{} is out of date; rerun yurimerge",
            output.display()
        )),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // A second init (tests) keeps the first subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .try_init()
        .ok();
}

#[cfg(test)]
mod tests;
