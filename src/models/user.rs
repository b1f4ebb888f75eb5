//! System users (`/systemusers`)

use super::codec::{self, null_as_default, numeric_string, rfc3339_opt};
use super::enrich::Taggable;
use super::{Resource, Tag};
use crate::client::Op;
use crate::errors::Result;
use crate::search::{FieldValue, Searchable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A directory user
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "username", default, skip_serializing_if = "String::is_empty")]
    pub user_name: String,
    #[serde(rename = "firstname", default, skip_serializing_if = "String::is_empty")]
    pub first_name: String,
    #[serde(rename = "lastname", default, skip_serializing_if = "String::is_empty")]
    pub last_name: String,
    /// Natural key; required on every record the service returns
    pub email: String,

    /// Only ever sent, never logged. An empty password on create makes the
    /// service mail the user an activation request instead.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub password_date: String,
    #[serde(default)]
    pub activated: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub activation_key: String,
    #[serde(default)]
    pub expired_warned: bool,
    #[serde(default)]
    pub password_expired: bool,
    #[serde(
        default,
        with = "rfc3339_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub password_expiration_date: Option<DateTime<Utc>>,
    #[serde(rename = "pendingProvisioning", default)]
    pub pending_provisioning: bool,

    #[serde(default)]
    pub sudo: bool,
    #[serde(
        rename = "unix_uid",
        default,
        deserialize_with = "numeric_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub uid: String,
    #[serde(
        rename = "unix_guid",
        default,
        deserialize_with = "numeric_string",
        skip_serializing_if = "String::is_empty"
    )]
    pub gid: String,
    #[serde(default)]
    pub enable_managed_uid: bool,

    /// Ids of the tags this user should belong to
    #[serde(
        rename = "tags",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tag_ids: Vec<String>,

    #[serde(default)]
    pub externally_managed: bool,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub external_dn: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub external_source_type: String,

    /// Tags containing this user, filled in by enrichment
    #[serde(skip)]
    pub tags: Vec<Tag>,
}

impl User {
    /// Clear the external directory provenance so the user is managed here
    pub fn release_external_management(&mut self) -> bool {
        if !self.externally_managed {
            return false;
        }
        self.externally_managed = false;
        self.external_dn.clear();
        self.external_source_type.clear();
        true
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// Manual so the password can never reach a log line.
impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("user_name", &self.user_name)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("sudo", &self.sudo)
            .field("uid", &self.uid)
            .field("gid", &self.gid)
            .field("enable_managed_uid", &self.enable_managed_uid)
            .field("activated", &self.activated)
            .field("password_expired", &self.password_expired)
            .field("pending_provisioning", &self.pending_provisioning)
            .field("externally_managed", &self.externally_managed)
            .field("external_dn", &self.external_dn)
            .field("external_source_type", &self.external_source_type)
            .field("tags", &tag_list(&self.tags))
            .finish_non_exhaustive()
    }
}

fn tag_list(tags: &[Tag]) -> Vec<&str> {
    tags.iter().map(|t| t.name.as_str()).collect()
}

impl Resource for User {
    const KIND: &'static str = "user";
    const PATH: &'static str = "/systemusers";
    const SORT_KEY: &'static str = "username";

    fn id(&self) -> &str {
        &self.id
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.email)
    }

    fn encode(&self, _op: Op) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Taggable for User {
    fn member_id(&self) -> &str {
        &self.id
    }

    fn members(tag: &Tag) -> &[String] {
        &tag.system_users
    }

    /// Also records the tag ids so a later update keeps the memberships
    fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tag_ids = tags.iter().map(|t| t.id.clone()).collect();
        self.tags = tags;
    }
}

impl Searchable for User {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Str(&self.id),
            "user_name" => FieldValue::Str(&self.user_name),
            "first_name" => FieldValue::Str(&self.first_name),
            "last_name" => FieldValue::Str(&self.last_name),
            "email" => FieldValue::Str(&self.email),
            "uid" => FieldValue::Str(&self.uid),
            "gid" => FieldValue::Str(&self.gid),
            "external_dn" => FieldValue::Str(&self.external_dn),
            "external_source_type" => FieldValue::Str(&self.external_source_type),
            "sudo" => FieldValue::Bool(self.sudo),
            "activated" => FieldValue::Bool(self.activated),
            "password_expired" => FieldValue::Bool(self.password_expired),
            "externally_managed" => FieldValue::Bool(self.externally_managed),
            "enable_managed_uid" => FieldValue::Bool(self.enable_managed_uid),
            "tag_ids" => FieldValue::List(&self.tag_ids),
            _ => return None,
        })
    }
}

/// Custom attribute set on a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

/// Decode a user record, as returned by `/systemusers/<id>`
pub fn decode(bytes: &[u8]) -> Result<User> {
    codec::decode_one(User::KIND, bytes)
}
