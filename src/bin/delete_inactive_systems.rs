//! Delete inactive systems that have not reported in a while

use clap::Parser;
use jcapi::cli::{self, ApiArgs, maintenance};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "delete-inactive-systems", version = jcapi::VERSION)]
struct Cli {
    /// Inactive systems that last connected this many days ago or more are deleted
    #[arg(long, default_value_t = 30)]
    days_since_last_connect: i64,

    /// Only list the systems that would be deleted
    #[arg(long)]
    dry_run: bool,

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
    let deleted =
        maintenance::delete_inactive_systems(&client, cli.days_since_last_connect, cli.dry_run)
            .await?;

    for system in &deleted {
        println!("{} ({}) last contact {}", system.hostname, system.id, system.last_contact);
    }
    let verb = if cli.dry_run { "would be deleted" } else { "deleted" };
    println!("{} systems {}", deleted.len(), verb);
    Ok(())
}
