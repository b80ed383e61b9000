//! TCT CLI - Command line tool for cyclone track data.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "tct-cli",
    version,
    about = "Tropical cyclone track data toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: tct_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    tct_cmd::run(cli.command).await
}
