//! Export all systems, with their tag names, as CSV

use clap::Parser;
use jcapi::cli::{self, ApiArgs, export};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "export-systems", version = jcapi::VERSION)]
struct Cli {
    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    api: ApiArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    cli::init_logging(cli.api.verbose);
    tracing::debug!(version = %jcapi::version_line(), "{}", jcapi::NAME);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let client = cli.api.client()?;
    let systems = client.list_systems(true).await?;
    export::write_systems(&systems, cli::open_output(cli.output.as_deref())?)?;
    Ok(())
}
