//! Managed systems (`/systems`)

use super::codec::null_as_default;
use super::enrich::Taggable;
use super::{Resource, Tag};
use crate::client::Op;
use crate::errors::Result;
use crate::search::{FieldValue, Searchable};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A machine running the directory agent
///
/// The derived impls are inherent (`remote = "Self"`); the trait impls below
/// reconcile the two id keys before delegating to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self", rename_all = "camelCase")]
pub struct System {
    /// Full records carry `_id`, list projections `id`, and some both
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub agent_version: String,
    #[serde(default)]
    pub arch: String,
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub organization: String,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub last_contact: String,
    #[serde(rename = "remoteIP", default)]
    pub remote_ip: String,
    #[serde(
        rename = "amazonInstanceID",
        default,
        skip_serializing_if = "String::is_empty"
    )]
    pub amazon_instance_id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub system_timezone: f64,
    #[serde(default)]
    pub active: bool,

    #[serde(default)]
    pub allow_ssh_root_login: bool,
    #[serde(default)]
    pub ssh_root_enabled: bool,
    #[serde(default)]
    pub ssh_pass_enabled: bool,
    #[serde(rename = "allowPublicKeyAuthentication", default)]
    pub allow_public_key_auth: bool,
    #[serde(default)]
    pub allow_ssh_password_authentication: bool,
    #[serde(default)]
    pub allow_multi_factor_authentication: bool,
    #[serde(rename = "modifySSHDConfig", default)]
    pub modify_sshd_config: bool,

    #[serde(default, deserialize_with = "null_as_default")]
    pub sshd_params: Vec<SshdParam>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub network_interfaces: Vec<NetworkInterface>,

    /// Ids of the tags this system should belong to
    #[serde(
        rename = "tags",
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tag_ids: Vec<String>,

    /// Tags containing this system, filled in by enrichment
    #[serde(skip)]
    pub tags: Vec<Tag>,
}

impl Serialize for System {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        System::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for System {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        if let Some(short) = fields.remove("id") {
            fields.entry("_id").or_insert(short);
        }
        System::deserialize(Value::Object(fields)).map_err(D::Error::custom)
    }
}

/// One `sshd_config` directive managed by the agent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshdParam {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkInterface {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub internal: bool,
    #[serde(default)]
    pub family: String,
    #[serde(default)]
    pub address: String,
}

/// A user bound to a system (`/systems/<id>/systemusers`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BindingKeys")]
pub struct SystemUserBinding {
    #[serde(rename = "userId")]
    pub user_id: String,
}

/// Every key a binding has been seen to carry the user id under
#[derive(Deserialize)]
struct BindingKeys {
    #[serde(rename = "userId")]
    user_id: Option<String>,
    #[serde(rename = "_id")]
    record_id: Option<String>,
    id: Option<String>,
}

impl TryFrom<BindingKeys> for SystemUserBinding {
    type Error = String;

    fn try_from(keys: BindingKeys) -> std::result::Result<Self, Self::Error> {
        keys.user_id
            .or(keys.record_id)
            .or(keys.id)
            .map(|user_id| SystemUserBinding { user_id })
            .ok_or_else(|| "binding has no user id".to_string())
    }
}

impl System {
    /// The enriched tag with the given name
    pub fn tag_named(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.name == name)
    }
}

impl Resource for System {
    const KIND: &'static str = "system";
    const PATH: &'static str = "/systems";
    const SORT_KEY: &'static str = "hostname";

    fn id(&self) -> &str {
        &self.id
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.hostname)
    }

    fn encode(&self, _op: Op) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl Taggable for System {
    fn member_id(&self) -> &str {
        &self.id
    }

    fn members(tag: &Tag) -> &[String] {
        &tag.systems
    }

    fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
    }
}

impl Searchable for System {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Str(&self.id),
            "hostname" => FieldValue::Str(&self.hostname),
            "display_name" => FieldValue::Str(&self.display_name),
            "os" => FieldValue::Str(&self.os),
            "version" => FieldValue::Str(&self.version),
            "agent_version" => FieldValue::Str(&self.agent_version),
            "arch" => FieldValue::Str(&self.arch),
            "organization" => FieldValue::Str(&self.organization),
            "last_contact" => FieldValue::Str(&self.last_contact),
            "remote_ip" => FieldValue::Str(&self.remote_ip),
            "amazon_instance_id" => FieldValue::Str(&self.amazon_instance_id),
            "system_timezone" => FieldValue::Float(self.system_timezone),
            "active" => FieldValue::Bool(self.active),
            "allow_ssh_root_login" => FieldValue::Bool(self.allow_ssh_root_login),
            "allow_public_key_auth" => FieldValue::Bool(self.allow_public_key_auth),
            "modify_sshd_config" => FieldValue::Bool(self.modify_sshd_config),
            "tag_ids" => FieldValue::List(&self.tag_ids),
            _ => return None,
        })
    }
}
