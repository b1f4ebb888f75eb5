//! Create or update users (and their per-host tags) from a CSV file

use anyhow::Context;
use clap::Parser;
use jcapi::cli::{self, ApiArgs, csv_import};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

/// Import users from CSV rows of
/// `first,last,USERNAME,EMAIL,uid,gid,SUDO,password,host,tag,admin...`
#[derive(Parser)]
#[command(name = "csv-importer", version = jcapi::VERSION)]
struct Cli {
    /// CSV file to import
    #[arg(long)]
    csv: PathBuf,

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
    let input = File::open(&cli.csv)
        .with_context(|| format!("could not open {}", cli.csv.display()))?;

    let summary = csv_import::run_import(&client, input).await?;
    println!("{}", summary);
    Ok(())
}
