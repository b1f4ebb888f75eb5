//! Tags (`/tags`)
//!
//! A tag groups systems and users; membership is held on the tag as two id
//! lists.

use super::Resource;
use super::codec::{self, null_as_default};
use crate::client::Op;
use crate::errors::{JcError, Result};
use crate::search::{FieldValue, Searchable};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub name: String,
    #[serde(rename = "groupname", default)]
    pub group_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub systems: Vec<String>,
    #[serde(rename = "systemusers", default, deserialize_with = "null_as_default")]
    pub system_users: Vec<String>,
    #[serde(
        rename = "regularExpressions",
        default,
        deserialize_with = "null_as_default"
    )]
    pub regular_expressions: Vec<String>,
    #[serde(rename = "expirationTime", default, deserialize_with = "null_as_default")]
    pub expiration_time: String,
    #[serde(default)]
    pub expired: bool,
    #[serde(default)]
    pub selected: bool,

    #[serde(rename = "externallyManaged", default)]
    pub externally_managed: bool,
    #[serde(rename = "externalDN", default, skip_serializing_if = "String::is_empty")]
    pub external_dn: String,
    #[serde(
        rename = "externalSourceType",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub external_source_type: String,
}

impl Tag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn has_system(&self, system_id: &str) -> bool {
        self.systems.iter().any(|id| id == system_id)
    }

    pub fn has_user(&self, user_id: &str) -> bool {
        self.system_users.iter().any(|id| id == user_id)
    }

    /// Add a system id unless already present
    pub fn add_system(&mut self, system_id: &str) {
        if !self.has_system(system_id) {
            self.systems.push(system_id.to_string());
        }
    }

    /// Add a user id unless already present
    pub fn add_user(&mut self, user_id: &str) {
        if !self.has_user(user_id) {
            self.system_users.push(user_id.to_string());
        }
    }
}

impl Resource for Tag {
    const KIND: &'static str = "tag";
    const PATH: &'static str = "/tags";
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

    /// Saves answer with either the bare tag or a results envelope
    fn decode_saved(bytes: &[u8]) -> Result<Self> {
        decode_tags(bytes)?
            .into_iter()
            .next()
            .ok_or_else(|| JcError::decode(Self::KIND, "response contained no tag"))
    }
}

impl Searchable for Tag {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Str(&self.id),
            "name" => FieldValue::Str(&self.name),
            "group_name" => FieldValue::Str(&self.group_name),
            "expiration_time" => FieldValue::Str(&self.expiration_time),
            "expired" => FieldValue::Bool(self.expired),
            "selected" => FieldValue::Bool(self.selected),
            "externally_managed" => FieldValue::Bool(self.externally_managed),
            "external_dn" => FieldValue::Str(&self.external_dn),
            "systems" => FieldValue::List(&self.systems),
            "system_users" => FieldValue::List(&self.system_users),
            _ => return None,
        })
    }
}

/// Tags from a body holding either one tag or a results envelope
pub fn decode_tags(bytes: &[u8]) -> Result<Vec<Tag>> {
    codec::decode_one_or_many(Tag::KIND, bytes)
}

/// Names of the given tags, in order
pub fn tag_names(tags: &[Tag]) -> Vec<String> {
    tags.iter().map(|tag| tag.name.clone()).collect()
}
