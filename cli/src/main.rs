mod commands;
mod terminal;

use commands::{CommandLine, Commands, join, members, scan};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init();

    match commands.command {
        Commands::Scan { ranges, probe } => scan::scan(&ranges, &probe.to_config()).await,
        Commands::Members { talos } => members::members(&talos.to_client()).await,
        Commands::Join {
            ranges,
            probe,
            talos,
            worker_config,
        } => join::join(&ranges, &probe.to_config(), &talos.to_client(), &worker_config).await,
    }
}
