use clap::Parser;
use heatwatch_processor::cli::commands::setup_logging;
use heatwatch_processor::cli::{run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;
    run(cli)?;
    Ok(())
}
