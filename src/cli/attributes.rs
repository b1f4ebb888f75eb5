//! Custom attribute import
//!
//! The header row is `email, attr1, attr2, ...`; each following row gives one
//! user's email and that user's attribute values in header order.

use crate::client::JcClient;
use crate::errors::{JcError, Result};
use crate::models::UserAttribute;
use csv::{ReaderBuilder, StringRecord};
use std::fmt;
use std::io::Read;
use tracing::{info, warn};

#[derive(Debug, Default)]
pub struct AttributeImportSummary {
    pub processed: usize,
    pub imported: usize,
    pub unknown_users: Vec<String>,
    /// Email and reason for each user that could not be updated
    pub errors: Vec<(String, String)>,
}

impl fmt::Display for AttributeImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Import complete:")?;
        writeln!(f, "  {} users processed", self.processed)?;
        writeln!(f, "  {} users imported", self.imported)?;
        writeln!(f, "  {} users not found", self.unknown_users.len())?;
        write!(f, "  {} errors processing users", self.errors.len())?;

        if !self.unknown_users.is_empty() {
            write!(f, "\n\nUnknown Users:")?;
            for email in &self.unknown_users {
                write!(f, "\n  {}", email)?;
            }
        }
        if !self.errors.is_empty() {
            write!(f, "\n\nUser Errors:")?;
            for (email, reason) in &self.errors {
                write!(f, "\n  {}: {}", email, reason)?;
            }
        }
        Ok(())
    }
}

/// Pair a row's values with the attribute names.
///
/// Rows may stop early; missing trailing values become empty strings.
pub fn build_attributes(record: &StringRecord, names: &[String]) -> Vec<UserAttribute> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| UserAttribute {
            name: name.clone(),
            value: record.get(i + 1).unwrap_or_default().to_string(),
        })
        .collect()
}

/// Apply every row of `input`
pub async fn run_attribute_import<R: Read>(
    client: &JcClient,
    input: R,
) -> Result<AttributeImportSummary> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);

    let header = reader.headers()?.clone();
    if header.len() < 2 {
        return Err(JcError::InvalidRequest(
            "header row must name the user column and at least one attribute".to_string(),
        ));
    }
    let names: Vec<String> = header.iter().skip(1).map(|n| n.trim().to_string()).collect();

    let mut summary = AttributeImportSummary::default();

    for record in reader.records() {
        let record = record?;
        summary.processed += 1;

        let email = record.get(0).unwrap_or_default().trim().to_string();
        let users = match client.get_users_by_email(&email, false).await {
            Ok(users) => users,
            Err(e) => {
                summary.errors.push((email, e.to_string()));
                continue;
            }
        };

        let Some(user) = users.first() else {
            warn!(email = %email, "no user with this email");
            summary.unknown_users.push(email);
            continue;
        };

        let attributes = build_attributes(&record, &names);
        match client.set_user_attributes(user, &attributes).await {
            Ok(()) => {
                info!(email = %email, count = attributes.len(), "attributes set");
                summary.imported += 1;
            }
            Err(e) => summary.errors.push((email, e.to_string())),
        }
    }

    Ok(summary)
}
