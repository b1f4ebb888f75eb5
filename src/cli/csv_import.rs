//! Bulk user import from CSV
//!
//! Each row is
//! `first, last, USERNAME, EMAIL, uid, gid, SUDO, password, host, tag, admin...`
//! where upper-case columns are required. A row creates the user, or updates
//! the existing user with the same username. When `host` names a known system
//! the row also creates or updates the tag `"<host> - <first> <last>"`, which
//! binds the user and any listed admins to that system.
//!
//! A failing row is reported and skipped; the rest of the file is processed.

use crate::client::JcClient;
use crate::errors::{JcError, Result};
use crate::models::{System, Tag, User, truthy};
use csv::{ReaderBuilder, StringRecord};
use std::fmt;
use std::io::Read;
use tracing::{info, warn};

const ADMINS_FROM: usize = 10;

/// One parsed import row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportRow {
    pub user: User,
    pub host: String,
    /// Carried for completeness; the tag name is derived from host and name
    pub tag: String,
    pub admins: Vec<String>,
}

impl ImportRow {
    /// Name of the per-user tag on `host`
    pub fn tag_name(&self) -> String {
        format!(
            "{} - {} {}",
            self.host, self.user.first_name, self.user.last_name
        )
    }
}

/// What happened to the tag for one row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagOutcome {
    /// The row named no host
    NotRequested,
    /// The host is not a known system
    UnknownHost(String),
    Created(String),
    Updated(String),
    /// The user was saved but the tag was not
    Failed(String),
}

/// Result of a successfully processed row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordOutcome {
    pub user_id: String,
    pub created: bool,
    pub tag: TagOutcome,
}

/// Totals for a whole import run
#[derive(Debug, Default)]
pub struct ImportSummary {
    pub records: usize,
    pub users_created: usize,
    pub users_updated: usize,
    pub tags_created: usize,
    pub tags_updated: usize,
    pub tag_failures: usize,
    /// Line number and reason for each skipped row
    pub failures: Vec<(usize, String)>,
}

impl ImportSummary {
    fn record(&mut self, outcome: &RecordOutcome) {
        if outcome.created {
            self.users_created += 1;
        } else {
            self.users_updated += 1;
        }
        match outcome.tag {
            TagOutcome::Created(_) => self.tags_created += 1,
            TagOutcome::Updated(_) => self.tags_updated += 1,
            TagOutcome::Failed(_) => self.tag_failures += 1,
            TagOutcome::NotRequested | TagOutcome::UnknownHost(_) => {}
        }
    }
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processed {} records", self.records)?;
        writeln!(
            f,
            "  users: {} created, {} updated",
            self.users_created, self.users_updated
        )?;
        writeln!(
            f,
            "  tags: {} created, {} updated, {} failed",
            self.tags_created, self.tags_updated, self.tag_failures
        )?;
        write!(f, "  skipped rows: {}", self.failures.len())?;
        for (line, reason) in &self.failures {
            write!(f, "\n    line {}: {}", line, reason)?;
        }
        Ok(())
    }
}

/// Parse one CSV row into the user it describes
pub fn parse_record(record: &StringRecord) -> Result<ImportRow> {
    let field = |i: usize| record.get(i).unwrap_or_default().trim().to_string();

    let user = User {
        first_name: field(0),
        last_name: field(1),
        user_name: field(2),
        email: field(3),
        uid: field(4),
        gid: field(5),
        sudo: truthy(&field(6)),
        password: field(7),
        ..Default::default()
    };

    if user.user_name.is_empty() {
        return Err(JcError::InvalidRequest("username is required".to_string()));
    }
    if user.email.is_empty() {
        return Err(JcError::InvalidRequest(format!(
            "email is required for '{}'",
            user.user_name
        )));
    }

    let admins = record
        .iter()
        .skip(ADMINS_FROM)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect();

    Ok(ImportRow {
        user,
        host: field(8),
        tag: field(9),
        admins,
    })
}

/// Directory state the importer works against.
///
/// Fetched once and kept current as rows are saved, so later rows see users
/// and tags created by earlier ones.
#[derive(Debug, Default)]
pub struct ImportContext {
    pub users: Vec<User>,
    pub systems: Vec<System>,
}

impl ImportContext {
    pub async fn load(client: &JcClient) -> Result<Self> {
        let systems = client.list_systems(true).await?;
        let users = client.list_users(false).await?;
        info!(
            users = users.len(),
            systems = systems.len(),
            "loaded directory state"
        );
        Ok(Self { users, systems })
    }

    fn user_id(&self, user_name: &str) -> Option<&str> {
        self.users
            .iter()
            .find(|u| u.user_name == user_name)
            .map(|u| u.id.as_str())
    }

    fn remember_user(&mut self, user: &User, id: &str) {
        match self.users.iter_mut().find(|u| u.user_name == user.user_name) {
            Some(existing) => existing.id = id.to_string(),
            None => {
                let mut saved = user.clone();
                saved.id = id.to_string();
                saved.password.clear();
                self.users.push(saved);
            }
        }
    }
}

/// Save the row's user, then its host tag
pub async fn process_record(
    client: &JcClient,
    context: &mut ImportContext,
    row: &ImportRow,
) -> Result<RecordOutcome> {
    let mut user = row.user.clone();
    let existing = context.user_id(&user.user_name).map(str::to_string);

    let created = existing.is_none();
    let user_id = match existing {
        Some(id) => {
            user.id = id;
            client.update_user(&user).await?
        }
        None => client.create_user(&user).await?,
    };
    context.remember_user(&user, &user_id);
    info!(user_id = %user_id, username = %user.user_name, created, "processed user");

    let tag = save_host_tag(client, context, row, &user_id).await;
    Ok(RecordOutcome {
        user_id,
        created,
        tag,
    })
}

async fn save_host_tag(
    client: &JcClient,
    context: &mut ImportContext,
    row: &ImportRow,
    user_id: &str,
) -> TagOutcome {
    if row.host.is_empty() {
        return TagOutcome::NotRequested;
    }

    let Some(position) = context.systems.iter().position(|s| s.hostname == row.host) else {
        warn!(host = %row.host, "host is not a known system; no tag created");
        return TagOutcome::UnknownHost(row.host.clone());
    };

    let name = row.tag_name();
    let system = &context.systems[position];
    let mut tag = Tag::new(&name);
    if let Some(existing) = system.tag_named(&name) {
        tag.id = existing.id.clone();
    }
    tag.add_system(&system.id);
    tag.add_user(user_id);

    for admin in &row.admins {
        match context.user_id(admin) {
            Some(admin_id) => tag.add_user(admin_id),
            None => warn!(admin = %admin, tag = %name, "unknown admin username skipped"),
        }
    }

    let updating = !tag.id.is_empty();
    let result = if updating {
        client.update_tag(&tag).await
    } else {
        client.create_tag(&tag).await
    };

    match result {
        Ok(id) => {
            info!(tag_id = %id, tag = %name, "processed tag");
            tag.id = id.clone();
            let system = &mut context.systems[position];
            system.tags.retain(|t| t.name != name);
            system.tags.push(tag);
            if updating {
                TagOutcome::Updated(id)
            } else {
                TagOutcome::Created(id)
            }
        }
        Err(e) => {
            warn!(tag = %name, error = %e, "could not save tag");
            TagOutcome::Failed(e.to_string())
        }
    }
}

/// Import every row of `input`.
///
/// A malformed CSV stream stops the run; a row the service rejects does not.
pub async fn run_import<R: Read>(client: &JcClient, input: R) -> Result<ImportSummary> {
    let mut context = ImportContext::load(client).await?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut summary = ImportSummary::default();

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let line = record.position().map_or(index + 1, |p| p.line() as usize);
        summary.records += 1;

        let outcome = match parse_record(&record) {
            Ok(row) => process_record(client, &mut context, &row).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(outcome) => summary.record(&outcome),
            Err(e) => {
                warn!(line, error = %e, "skipping row");
                summary.failures.push((line, e.to_string()));
            }
        }
    }

    Ok(summary)
}
