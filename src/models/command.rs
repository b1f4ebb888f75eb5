//! Saved commands (`/commands`)

use super::Resource;
use super::codec::null_as_default;
use crate::client::Op;
use crate::errors::Result;
use crate::search::{FieldValue, Searchable};
use serde::{Deserialize, Serialize};

/// Root as the run-as user
pub const ROOT_USER_ID: &str = "000000000000000000000000";

/// A command the agent can run on systems
///
/// `systems` and `tags` are mutually exclusive targets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub command: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub command_runners: Vec<String>,
    /// linux, windows or mac
    #[serde(default)]
    pub command_type: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub user: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub files: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub systems: Vec<String>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    /// manual, add-delete-user, repeated or scheduled
    #[serde(default)]
    pub launch_type: String,
    #[serde(default)]
    pub listens_to: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub schedule: String,
    #[serde(default)]
    pub scheduled_run_date: String,
    #[serde(default)]
    pub scheduled_run_time: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub trigger: String,
    /// Seconds before the agent kills the command
    #[serde(default)]
    pub timeout: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub organization: String,
    #[serde(default)]
    pub sudo: bool,
}

impl Resource for Command {
    const KIND: &'static str = "command";
    const PATH: &'static str = "/commands";
    const SORT_KEY: &'static str = "name";

    fn id(&self) -> &str {
        &self.id
    }

    /// Names are not unique, so saves are not cross-checked
    fn natural_key(&self) -> Option<&str> {
        None
    }

    fn encode(&self, _op: Op) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Searchable for Command {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Str(&self.id),
            "name" => FieldValue::Str(&self.name),
            "command" => FieldValue::Str(&self.command),
            "command_type" => FieldValue::Str(&self.command_type),
            "user" => FieldValue::Str(&self.user),
            "launch_type" => FieldValue::Str(&self.launch_type),
            "schedule" => FieldValue::Str(&self.schedule),
            "organization" => FieldValue::Str(&self.organization),
            "sudo" => FieldValue::Bool(self.sudo),
            "systems" => FieldValue::List(&self.systems),
            "tags" => FieldValue::List(&self.tags),
            _ => return None,
        })
    }
}
