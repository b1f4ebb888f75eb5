//! # jcapi
//!
//! Client library for the JumpCloud directory REST API, plus the support code
//! behind the bulk import/export programs in `src/bin`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use jcapi::{ClientConfig, JcClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JcClient::new(ClientConfig::from_env()?)?;
//!
//!     for user in client.list_users(true).await? {
//!         println!("{} {:?}", user.email, jcapi::tag_names(&user.tags));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Every operation is a sequence of awaited requests. List operations page
//! through the whole collection and either return all of it or fail.

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod cli;
pub mod client;
pub mod config;
pub mod errors;
pub mod models;
pub mod search;

// Re-export main types
pub use client::{JcClient, Op};
pub use config::{ClientConfig, ClientSettings, ConfigBuilder};
pub use errors::{JcError, Result};
pub use models::{
    Command, CommandResult, IdSource, RadiusServer, Resource, System, SystemUserBinding, Tag,
    User, UserAttribute, tag_names, truthy, truthy_value,
};
pub use search::{FieldValue, SearchOutcome, Searchable, find_by, find_by_field, find_by_id, find_by_regex};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Build information stamped by `build.rs`
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Seconds since the Unix epoch
    pub build_time: &'static str,
    pub git_hash: &'static str,
}

/// Version, build time and git revision of this build
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
        git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
    }
}

/// One-line version string for `--version` output
pub fn version_line() -> String {
    let info = build_info();
    format!("{} ({}, built {})", info.version, info.git_hash, info.build_time)
}
