//! Linear search over in-memory record lists
//!
//! Records expose their fields by name through [`Searchable`]. A search has
//! three distinct negative outcomes: nothing matched, the field does not exist
//! on the record type, or the field exists with a type that cannot be compared
//! to the probe. None of them is an error.

use crate::models::Resource;
use regex::Regex;

/// Borrowed view of a single record field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Str(&'a str),
    Bool(bool),
    Int(i64),
    Float(f64),
    List(&'a [String]),
}

impl FieldValue<'_> {
    /// Type name used in mismatch reports
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Str(_) => "string",
            FieldValue::Bool(_) => "bool",
            FieldValue::Int(_) => "integer",
            FieldValue::Float(_) => "float",
            FieldValue::List(_) => "list",
        }
    }

    fn same_kind(&self, other: &FieldValue<'_>) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Field access by name
pub trait Searchable {
    /// Value of the named field, or `None` when the record has no such field
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

/// Result of a field search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Index of the first matching record
    Found(usize),
    NotFound,
    /// The record type has no field with this name
    NoSuchField(String),
    /// The field exists but cannot be compared with the probe
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl SearchOutcome {
    pub fn index(&self) -> Option<usize> {
        match self {
            SearchOutcome::Found(index) => Some(*index),
            _ => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// Find the first record whose `field` equals `expected`.
///
/// The field is validated against the first record before the scan, so an
/// empty list is always [`SearchOutcome::NotFound`].
pub fn find_by_field<T: Searchable>(
    records: &[T],
    field: &str,
    expected: &FieldValue<'_>,
) -> SearchOutcome {
    let Some(first) = records.first() else {
        return SearchOutcome::NotFound;
    };

    match first.field(field) {
        None => return SearchOutcome::NoSuchField(field.to_string()),
        Some(value) if !value.same_kind(expected) => {
            return SearchOutcome::TypeMismatch {
                field: field.to_string(),
                expected: value.kind(),
                found: expected.kind(),
            };
        }
        Some(_) => {}
    }

    records
        .iter()
        .position(|record| record.field(field).as_ref() == Some(expected))
        .map_or(SearchOutcome::NotFound, SearchOutcome::Found)
}

/// Find the first record whose string `field` matches `pattern`
pub fn find_by_regex<T: Searchable>(records: &[T], field: &str, pattern: &Regex) -> SearchOutcome {
    if records.is_empty() {
        return SearchOutcome::NotFound;
    }

    for (index, record) in records.iter().enumerate() {
        match record.field(field) {
            None => return SearchOutcome::NoSuchField(field.to_string()),
            Some(FieldValue::Str(value)) => {
                if pattern.is_match(value) {
                    return SearchOutcome::Found(index);
                }
            }
            Some(other) => {
                return SearchOutcome::TypeMismatch {
                    field: field.to_string(),
                    expected: other.kind(),
                    found: "string",
                };
            }
        }
    }

    SearchOutcome::NotFound
}

/// Index of the first record satisfying `predicate`
pub fn find_by<T>(records: &[T], predicate: impl Fn(&T) -> bool) -> Option<usize> {
    records.iter().position(predicate)
}

/// Record with the given service id
pub fn find_by_id<'a, T: Resource>(records: &'a [T], id: &str) -> Option<&'a T> {
    find_by(records, |record| record.id() == id).map(|index| &records[index])
}
