//! Tolerant JSON decoding shared by every resource type
//!
//! The service returns partial projections from its list endpoints and full
//! records from its get-by-id endpoints, so absent fields decode to their zero
//! value. Wrong-typed fields and missing required fields become
//! [`JcError::Decode`] instead of panicking.

use crate::errors::{JcError, Result};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// `{"results": [...]}` envelope used by the collection and search endpoints
#[derive(Debug, Deserialize)]
struct Envelope {
    results: Vec<Value>,
}

/// One decoded page of a collection
#[derive(Debug)]
pub struct Page<T> {
    /// Number of entries the service sent, including any that failed to decode
    pub received: usize,
    pub records: Vec<T>,
}

/// Decode a single JSON object
pub fn decode_one<T: DeserializeOwned>(resource: &'static str, bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| JcError::decode(resource, e))
}

/// Decode a results envelope.
///
/// A record that does not decode is logged and skipped; the envelope itself
/// must be well formed.
pub fn decode_page<T: DeserializeOwned>(resource: &'static str, bytes: &[u8]) -> Result<Page<T>> {
    let envelope: Envelope =
        serde_json::from_slice(bytes).map_err(|e| JcError::decode(resource, e))?;

    let received = envelope.results.len();
    let mut records = Vec::with_capacity(received);

    for (position, value) in envelope.results.into_iter().enumerate() {
        match serde_json::from_value::<T>(value) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!(resource, position, error = %e, "skipping record that failed to decode");
            }
        }
    }

    Ok(Page { received, records })
}

/// Decode a body that is either a single object or a results envelope.
///
/// Some endpoints answer with the bare record, others wrap it.
pub fn decode_one_or_many<T: DeserializeOwned>(
    resource: &'static str,
    bytes: &[u8],
) -> Result<Vec<T>> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| JcError::decode(resource, e))?;

    if value.get("results").is_some() {
        return Ok(decode_page(resource, bytes)?.records);
    }

    serde_json::from_value::<T>(value)
        .map(|record| vec![record])
        .map_err(|e| JcError::decode(resource, e))
}

/// Coerce loosely written boolean text.
///
/// Accepts any non-empty prefix of `true` or `yes` (so `T`, `y`, `Yes`) and `1`,
/// ignoring case and surrounding whitespace.
pub fn truthy(input: &str) -> bool {
    let lowered = input.trim().to_lowercase();
    if lowered.is_empty() {
        return false;
    }
    lowered == "1" || "true".starts_with(&lowered) || "yes".starts_with(&lowered)
}

/// Boolean coercion for arbitrary JSON values
pub fn truthy_value(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => truthy(s),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

/// Treat an explicit JSON `null` like an absent field
pub fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer-valued string fields (POSIX uid/gid).
///
/// They are posted as strings but the service may hand them back as floats;
/// floats truncate toward zero.
pub fn numeric_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(i.to_string())
            } else if let Some(u) = n.as_u64() {
                Ok(u.to_string())
            } else {
                let f = n
                    .as_f64()
                    .ok_or_else(|| D::Error::custom("number is not representable"))?;
                Ok((f.trunc() as i64).to_string())
            }
        }
        other => Err(D::Error::custom(format!(
            "expected a number or numeric string, found {}",
            other
        ))),
    }
}

/// Booleans the service writes either as JSON booleans or as `"true"`/`"false"`
pub fn flexible_bool<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(false),
        Value::Bool(b) => Ok(b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" => Ok(true),
            "false" | "" => Ok(false),
            _ => Err(D::Error::custom(format!("expected a boolean, found '{}'", s))),
        },
        other => Err(D::Error::custom(format!(
            "expected a boolean, found {}",
            other
        ))),
    }
}

/// Optional RFC 3339 timestamps; `null` and `""` mean unset
pub mod rfc3339_opt {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(&s)
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(|e| D::Error::custom(format!("invalid timestamp '{}': {}", s, e))),
        }
    }
}
