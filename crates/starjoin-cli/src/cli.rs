//! Command-line interface definition.

use clap::{Args, Parser, Subcommand};
use starjoin_core::{BenchmarkConfig, StarJoinResult};
use std::path::PathBuf;

/// Foreign-key versus direct-reference star-join benchmark
#[derive(Parser, Debug)]
#[command(name = "starjoin")]
#[command(about = "Measures star-join cost with foreign keys versus direct references")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the benchmark sweep and write the result files
    Run {
        #[command(flatten)]
        sizing: SizingArgs,

        /// Also write the aggregated summary as JSON
        #[arg(long)]
        summary_json: Option<PathBuf>,
    },

    /// Show which dimension counts would run or be skipped
    Plan {
        #[command(flatten)]
        sizing: SizingArgs,
    },
}

/// Settings shared by every subcommand. Flags override the environment,
/// which overrides the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct SizingArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Rows in every dimension table
    #[arg(short = 'k', long)]
    pub rows_per_dimension: Option<usize>,

    /// Maximum number of tuples in a fact table
    #[arg(short = 'l', long)]
    pub fact_row_limit: Option<usize>,

    /// Repetitions per dimension count
    #[arg(short, long)]
    pub repetitions: Option<usize>,

    /// Smallest dimension count to evaluate
    #[arg(long)]
    pub min_dimensions: Option<usize>,

    /// Largest dimension count to evaluate
    #[arg(long)]
    pub max_dimensions: Option<usize>,

    /// Directory for results.csv and results_build.csv
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

impl SizingArgs {
    /// Layer defaults, file, environment and flags into a validated config
    pub fn resolve(&self) -> StarJoinResult<BenchmarkConfig> {
        let mut config = match &self.config {
            Some(path) => BenchmarkConfig::from_file(path)?,
            None => BenchmarkConfig::default(),
        };
        config.apply_env_overrides()?;
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_to(&self, config: &mut BenchmarkConfig) {
        if let Some(k) = self.rows_per_dimension {
            config.rows_per_dimension = k;
        }
        if let Some(limit) = self.fact_row_limit {
            config.fact_row_limit = limit;
        }
        if let Some(repetitions) = self.repetitions {
            config.repetitions = repetitions;
        }
        if let Some(min) = self.min_dimensions {
            config.min_dimensions = min;
        }
        if let Some(max) = self.max_dimensions {
            config.max_dimensions = max;
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
    }
}
