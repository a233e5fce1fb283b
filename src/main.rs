use clap::Parser;
use tracing_subscriber::EnvFilter;

use wcvp_solver::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on the debug flag
    let filter = if cli.debug {
        EnvFilter::new("wcvp_solver=debug,info")
    } else {
        EnvFilter::new("wcvp_solver=warn")
    };

    // stdout carries the corrected rows
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Resolve(args) => {
            cli::resolve::run(args)?;
        }
        cli::Commands::Lookup(args) => {
            cli::lookup::run(args)?;
        }
        cli::Commands::Index(args) => {
            cli::index::run(args)?;
        }
    }

    Ok(())
}
