use clap::Parser;
use starjoin_cli::cli::Cli;
use starjoin_core::StarJoinError;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    starjoin_cli::logging::init(cli.verbose, cli.json);

    info!(version = env!("CARGO_PKG_VERSION"), "Starting star-join benchmark");

    if let Err(err) = starjoin_cli::execute(&cli) {
        let category = err
            .downcast_ref::<StarJoinError>()
            .map(|cause| cause.category().to_string())
            .unwrap_or_else(|| "other".to_string());
        error!(%category, error = %format!("{err:#}"), "Benchmark failed");
        return Err(err);
    }
    Ok(())
}
