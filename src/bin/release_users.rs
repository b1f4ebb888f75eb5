//! Release users imported from an external directory so they are managed here

use clap::Parser;
use jcapi::cli::{self, ApiArgs, maintenance};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "release-users", version = jcapi::VERSION)]
struct Cli {
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
    let released = maintenance::release_users(&client).await?;
    println!("{} users released", released);
    Ok(())
}
