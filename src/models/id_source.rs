//! External identity sources (`/idsources`)

use super::Resource;
use super::codec::flexible_bool;
use crate::client::Op;
use crate::errors::Result;
use crate::search::{FieldValue, Searchable};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdSource {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub organization: String,
    #[serde(rename = "type", default)]
    pub source_type: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub ip_address: String,
    #[serde(default)]
    pub last_update_time: String,
    #[serde(default)]
    pub dn: String,
    #[serde(default, deserialize_with = "flexible_bool")]
    pub active: bool,
}

impl Resource for IdSource {
    const KIND: &'static str = "id source";
    const PATH: &'static str = "/idsources";
    const SORT_KEY: &'static str = "name";

    fn id(&self) -> &str {
        &self.id
    }

    fn natural_key(&self) -> Option<&str> {
        Some(&self.name)
    }

    /// `active` is only sent on create; an update must not overwrite a value
    /// an administrator changed after this record was read.
    fn encode(&self, op: Op) -> Result<Vec<u8>> {
        let mut body = Map::new();

        if !self.id.is_empty() {
            body.insert("_id".to_string(), Value::from(self.id.as_str()));
        }
        body.insert("name".to_string(), Value::from(self.name.as_str()));
        body.insert(
            "organization".to_string(),
            Value::from(self.organization.as_str()),
        );
        body.insert("type".to_string(), Value::from(self.source_type.as_str()));
        body.insert("version".to_string(), Value::from(self.version.as_str()));
        body.insert("ipAddress".to_string(), Value::from(self.ip_address.as_str()));
        body.insert(
            "lastUpdateTime".to_string(),
            Value::from(self.last_update_time.as_str()),
        );
        body.insert("dn".to_string(), Value::from(self.dn.as_str()));

        if op == Op::Insert {
            body.insert("active".to_string(), Value::from(self.active.to_string()));
        }

        Ok(serde_json::to_vec(&Value::Object(body))?)
    }
}

impl Searchable for IdSource {
    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "id" => FieldValue::Str(&self.id),
            "name" => FieldValue::Str(&self.name),
            "organization" => FieldValue::Str(&self.organization),
            "source_type" => FieldValue::Str(&self.source_type),
            "version" => FieldValue::Str(&self.version),
            "ip_address" => FieldValue::Str(&self.ip_address),
            "dn" => FieldValue::Str(&self.dn),
            "active" => FieldValue::Bool(self.active),
            _ => return None,
        })
    }
}
