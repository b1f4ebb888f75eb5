//! Bulk maintenance jobs
//!
//! These stop at the first failure: they change or delete records, and a
//! partial run is easier to reason about than one that kept going.

use crate::client::JcClient;
use crate::errors::{JcError, Result};
use crate::models::{System, User};
use chrono::{DateTime, Duration, Utc};
use csv::Writer;
use std::io::Write;
use tracing::info;

/// Whether an inactive system last reported before `cutoff`.
///
/// Active systems are never stale. An inactive system whose last contact
/// cannot be parsed is an error.
pub fn is_stale(system: &System, cutoff: DateTime<Utc>) -> Result<bool> {
    if system.active {
        return Ok(false);
    }

    let last_contact = DateTime::parse_from_rfc3339(&system.last_contact).map_err(|e| {
        JcError::decode(
            "system",
            format!(
                "last contact '{}' of '{}' ({}): {}",
                system.last_contact, system.hostname, system.id, e
            ),
        )
    })?;

    Ok(last_contact.with_timezone(&Utc) < cutoff)
}

/// Delete inactive systems that have not reported for `days` days.
///
/// Returns the systems deleted (or that would be, on a dry run).
pub async fn delete_inactive_systems(
    client: &JcClient,
    days: i64,
    dry_run: bool,
) -> Result<Vec<System>> {
    let cutoff = Utc::now() - Duration::days(days);
    let mut deleted = Vec::new();

    for system in client.list_systems(false).await? {
        if !is_stale(&system, cutoff)? {
            continue;
        }

        if dry_run {
            info!(hostname = %system.hostname, last_contact = %system.last_contact, "would delete");
        } else {
            client.delete_system(&system).await?;
            info!(hostname = %system.hostname, "deleted");
        }
        deleted.push(system);
    }

    Ok(deleted)
}

/// Hand every externally managed user over to the directory.
///
/// List records are partial projections, so each candidate is re-read by id
/// and the update is built from the full record. Returns how many users were
/// released.
pub async fn release_users(client: &JcClient) -> Result<usize> {
    let mut released = 0;

    for listed in client.list_users(false).await? {
        if !listed.externally_managed {
            continue;
        }

        let mut user = client.get_user_by_id(&listed.id, false).await?;
        if !user.release_external_management() {
            continue;
        }
        let id = client.update_user(&user).await?;
        info!(user_id = %id, email = %user.email, "released");
        released += 1;
    }

    Ok(released)
}

/// `[now, now + days]`
pub fn expiry_window(now: DateTime<Utc>, days: i64) -> (DateTime<Utc>, DateTime<Utc>) {
    (now, now + Duration::days(days))
}

/// CSV of users and their password expiry dates
pub fn write_expiring_users<W: Write>(users: &[User], out: W) -> Result<()> {
    let mut csv = Writer::from_writer(out);
    csv.write_record(["FIRSTNAME", "LASTNAME", "EMAIL", "PASSWORD EXPIRY DATE"])?;

    for user in users {
        let expiry = user
            .password_expiration_date
            .map(|d| d.to_rfc3339())
            .unwrap_or_default();
        csv.write_record([
            user.first_name.as_str(),
            user.last_name.as_str(),
            user.email.as_str(),
            expiry.as_str(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Users whose password expires within the next `days` days
pub async fn expiring_users(client: &JcClient, days: i64) -> Result<Vec<User>> {
    let (from, to) = expiry_window(Utc::now(), days);
    client.get_users_by_password_expiry(from, to).await
}
