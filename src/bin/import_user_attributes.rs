//! Set custom user attributes from a CSV file keyed by email

use anyhow::Context;
use clap::Parser;
use jcapi::cli::{self, ApiArgs, attributes};
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "import-user-attributes", version = jcapi::VERSION)]
struct Cli {
    /// CSV file: header `email,attr1,attr2...`, then one row per user
    #[arg(long = "input-file", visible_alias = "inputFile")]
    input_file: PathBuf,

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
    let input = File::open(&cli.input_file)
        .with_context(|| format!("could not open {}", cli.input_file.display()))?;

    let summary = attributes::run_attribute_import(&client, input).await?;
    println!("{}", summary);
    Ok(())
}
