//! RADIUS servers (`/radiusservers`)

use super::Resource;
use super::codec::null_as_default;
use crate::client::Op;
use crate::errors::Result;
use crate::search::{FieldValue, Searchable};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadiusServer {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(rename = "networkSourceIp", default, skip_serializing_if = "String::is_empty")]
    pub network_source_ip: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub shared_secret: String,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
}

impl fmt::Debug for RadiusServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadiusServer")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("network_source_ip", &self.network_source_ip)
            .field("shared_secret", &"<redacted>")
            .field("tags", &self.tags)
            .finish()
    }
}

impl Resource for RadiusServer {
    const KIND: &'static str = "radius server";
    const PATH: &'static str = "/radiusservers";
    const SORT_KEY: &'static str = "name";

    fn id(&self) -> &str {
        &self.id
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn encode(&self, _op: Op) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Searchable for RadiusServer {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Str(&self.id),
            "name" => FieldValue::Str(&self.name),
            "network_source_ip" => FieldValue::Str(&self.network_source_ip),
            "tags" => FieldValue::List(&self.tags),
            _ => return None,
        })
    }
}
