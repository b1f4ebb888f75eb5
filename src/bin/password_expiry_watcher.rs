//! Report users whose password expires soon, as CSV

use clap::Parser;
use jcapi::cli::{self, ApiArgs, maintenance};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "password-expiry-watcher", version = jcapi::VERSION)]
struct Cli {
    /// Report file
    #[arg(short, long)]
    output: PathBuf,

    /// Look this many days ahead
    #[arg(long, default_value_t = 30)]
    days: i64,

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
    let users = maintenance::expiring_users(&client, cli.days).await?;
    maintenance::write_expiring_users(&users, cli::open_output(Some(&cli.output))?)?;
    println!("{} users with passwords expiring in {} days", users.len(), cli.days);
    Ok(())
}
