//! Resource records exchanged with the directory service
//!
//! Each record is a flat snapshot of what the service holds. The service is
//! the source of truth; nothing here is cached between calls.

pub mod codec;
pub mod command;
pub mod command_result;
pub mod enrich;
pub mod id_source;
pub mod radius_server;
pub mod system;
pub mod tag;
pub mod user;

pub use codec::{truthy, truthy_value};
pub use command::Command;
pub use command_result::{CommandData, CommandResponse, CommandResult};
pub use enrich::{Taggable, attach_tags};
pub use id_source::IdSource;
pub use radius_server::RadiusServer;
pub use system::{NetworkInterface, SshdParam, System, SystemUserBinding};
pub use tag::{Tag, tag_names};
pub use user::{User, UserAttribute};

use crate::client::Op;
use crate::errors::Result;
use serde::de::DeserializeOwned;

/// A record type with its own collection endpoint
pub trait Resource: DeserializeOwned + Clone {
    /// Singular name used in errors and logs
    const KIND: &'static str;
    /// Collection path relative to the base URL
    const PATH: &'static str;
    /// Sort key passed to the collection endpoint while paging
    const SORT_KEY: &'static str;

    /// Service-assigned identifier; empty until created
    fn id(&self) -> &str;

    /// Field the service must echo back unchanged after a create or update.
    ///
    /// `None` disables the check for resources without a stable natural key.
    fn natural_key(&self) -> Option<&str>;

    /// Request body for the given operation
    fn encode(&self, op: Op) -> Result<Vec<u8>>;

    /// Decode the body returned by a create or update
    fn decode_saved(bytes: &[u8]) -> Result<Self> {
        codec::decode_one(Self::KIND, bytes)
    }
}
