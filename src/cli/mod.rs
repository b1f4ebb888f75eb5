//! Support code for the command-line programs in `src/bin`
//!
//! The binaries only parse arguments and print summaries; the work lives here
//! so it can be tested against a mock service.

pub mod attributes;
pub mod csv_import;
pub mod export;
pub mod maintenance;

use crate::client::JcClient;
use crate::config::{API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL};
use crate::errors::Result;
use clap::Args;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter for the programs
pub const LOG_ENV: &str = "JCAPI_LOG";

/// Connection arguments shared by every program
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Administrator API key
    #[arg(
        short = 'k',
        long = "key",
        visible_alias = "api-key",
        env = API_KEY_ENV,
        hide_env_values = true
    )]
    pub key: String,

    /// Base API URL override
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Log every request
    #[arg(short, long)]
    pub verbose: bool,
}

impl ApiArgs {
    pub fn client(&self) -> Result<JcClient> {
        JcClient::with_key(&self.key, &self.url)
    }
}

/// Install the log subscriber.
///
/// `JCAPI_LOG` takes precedence; otherwise `--verbose` selects debug output
/// for this crate. Logs go to stderr so CSV written to stdout stays clean.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "jcapi=debug" } else { "jcapi=info" })
    });

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Output sink: the named file, or stdout when none is given
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    })
}
