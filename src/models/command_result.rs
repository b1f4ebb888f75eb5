//! Command results (`/commandresults`), read-only

use super::Resource;
use super::codec::{self, null_as_default};
use crate::client::Op;
use crate::errors::{JcError, Result};
use crate::search::{FieldValue, Searchable};
use serde::{Deserialize, Serialize};

/// Output of one command run on one system
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub request_time: String,
    #[serde(default)]
    pub response_time: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub sudo: bool,
    /// Hostname of the system the result came from
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub workflow_id: String,
    #[serde(default)]
    pub workflow_instance_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub response: CommandResponse,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: CommandData,
    #[serde(default, deserialize_with = "null_as_default")]
    pub error: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandData {
    #[serde(default, deserialize_with = "null_as_default")]
    pub output: String,
    #[serde(rename = "exitCode", default)]
    pub exit_code: i64,
}

impl CommandResult {
    pub fn succeeded(&self) -> bool {
        self.response.error.is_empty() && self.response.data.exit_code == 0
    }
}

impl Resource for CommandResult {
    const KIND: &'static str = "command result";
    const PATH: &'static str = "/commandresults";
    const SORT_KEY: &'static str = "-requestTime";

    fn id(&self) -> &str {
        &self.id
    }

    fn natural_key(&self) -> Option<&str> {
        None
    }

    fn encode(&self, _op: Op) -> Result<Vec<u8>> {
        Err(JcError::InvalidRequest(
            "command results are produced by the service and cannot be written".to_string(),
        ))
    }
}

impl Searchable for CommandResult {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Str(&self.id),
            "name" => FieldValue::Str(&self.name),
            "command" => FieldValue::Str(&self.command),
            "system" => FieldValue::Str(&self.system),
            "request_time" => FieldValue::Str(&self.request_time),
            "response_time" => FieldValue::Str(&self.response_time),
            "sudo" => FieldValue::Bool(self.sudo),
            "exit_code" => FieldValue::Int(self.response.data.exit_code),
            _ => return None,
        })
    }
}

/// Decode the bare array returned by `/commands/<id>/results`
pub fn decode_list(bytes: &[u8]) -> Result<Vec<CommandResult>> {
    codec::decode_one(CommandResult::KIND, bytes)
}
