//! Export every system with the users bound to it, as CSV

use clap::Parser;
use jcapi::cli::{self, ApiArgs, export};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "export-users-per-system", version = jcapi::VERSION)]
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
    export::write_users_per_system(&client, cli::open_output(cli.output.as_deref())?).await?;
    Ok(())
}
