//! ClimACT CLI - browse climate projections for mainland Portugal.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "climact-cli",
    version,
    about = "ClimACT climate projections toolkit"
)]
struct Cli {
    #[command(flatten)]
    context: climact_cmd::Context,

    #[command(subcommand)]
    command: climact_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    climact_cmd::run(cli.context, cli.command).await
}
