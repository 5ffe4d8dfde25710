//! Command-line driver for the star-join encoding benchmark.
//!
//! Resolves the configuration, runs the sweep through `starjoin-core`, writes
//! the CSV result files and prints the aggregated comparison.

pub mod cli;
pub mod csv_sink;
pub mod logging;
pub mod report;

use anyhow::Context;
use cli::{Cli, Command, SizingArgs};
use csv_sink::CsvSink;
use starjoin_core::{RecordingSink, Summary, Tee, run_sweep};
use std::path::Path;
use tracing::info;

/// Execute the parsed command line
pub fn execute(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Command::Run { sizing, summary_json } => run(sizing, summary_json.as_deref()),
        Command::Plan { sizing } => plan(sizing),
    }
}

fn run(sizing: &SizingArgs, summary_json: Option<&Path>) -> anyhow::Result<()> {
    let config = sizing.resolve().context("invalid benchmark configuration")?;
    let mut csv = CsvSink::create(&config.output_dir).context("failed to open result files")?;
    let mut recording = RecordingSink::new();

    let plan = run_sweep(&config, &mut Tee(&mut csv, &mut recording))?;
    if plan.is_empty() {
        info!("No dimension count produces enough tuples; nothing was measured");
    }

    let summary = Summary::from_records(recording.records());
    print!("{}", report::render_summary(&summary));

    if let Some(path) = summary_json {
        report::RunReport::new(&config, &plan, &summary)
            .write_json(path)
            .with_context(|| format!("failed to write summary to {}", path.display()))?;
        info!(path = %path.display(), "Wrote JSON summary");
    }
    Ok(())
}

fn plan(sizing: &SizingArgs) -> anyhow::Result<()> {
    let config = sizing.resolve().context("invalid benchmark configuration")?;
    let plan = config.plan();
    print!("{}", report::render_plan(&config, &plan));
    Ok(())
}
