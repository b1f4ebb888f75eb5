//! CSV exports of users and systems
//!
//! Tag names and bound users trail each row as extra columns, so rows have
//! varying lengths.

use crate::client::JcClient;
use crate::errors::Result;
use crate::models::{System, User};
use csv::{Writer, WriterBuilder};
use std::collections::HashMap;
use std::io::Write;
use tracing::warn;

const USER_HEADERS: [&str; 10] = [
    "Username",
    "FirstName",
    "LastName",
    "Email",
    "UID",
    "GID",
    "Activated",
    "PasswordExpired",
    "Sudo",
    "Tags",
];

const SYSTEM_HEADERS: [&str; 10] = [
    "Id",
    "DisplayName",
    "HostName",
    "Active",
    "Instance ID",
    "OS",
    "OSVersion",
    "AgentVersion",
    "CreatedDate",
    "LastContactDate",
];

fn writer<W: Write>(out: W) -> Writer<W> {
    WriterBuilder::new().flexible(true).from_writer(out)
}

fn system_columns(system: &System) -> Vec<String> {
    vec![
        system.id.clone(),
        system.display_name.clone(),
        system.hostname.clone(),
        system.active.to_string(),
        system.amazon_instance_id.clone(),
        system.os.clone(),
        system.version.clone(),
        system.agent_version.clone(),
        system.created.clone(),
        system.last_contact.clone(),
    ]
}

/// One row per user, followed by the names of its tags
pub fn write_users<W: Write>(users: &[User], out: W) -> Result<()> {
    let mut csv = writer(out);
    csv.write_record(USER_HEADERS)?;

    for user in users {
        let mut row = vec![
            user.user_name.clone(),
            user.first_name.clone(),
            user.last_name.clone(),
            user.email.clone(),
            user.uid.clone(),
            user.gid.clone(),
            user.activated.to_string(),
            user.password_expired.to_string(),
            user.sudo.to_string(),
        ];
        row.extend(user.tags.iter().map(|tag| tag.name.clone()));
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

/// One row per system, followed by the names of its tags
pub fn write_systems<W: Write>(systems: &[System], out: W) -> Result<()> {
    let mut csv = writer(out);
    csv.write_record(SYSTEM_HEADERS.iter().chain(["Tags"].iter()))?;

    for system in systems {
        let mut row = system_columns(system);
        row.extend(system.tags.iter().map(|tag| tag.name.clone()));
        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}

/// One row per system, followed by `username (email)` for each bound user.
///
/// A system whose bindings cannot be read is still written, without users.
pub async fn write_users_per_system<W: Write>(client: &JcClient, out: W) -> Result<()> {
    let systems = client.list_systems(false).await?;
    let users = client.list_users(false).await?;
    let by_id: HashMap<&str, &User> = users.iter().map(|u| (u.id.as_str(), u)).collect();

    let mut csv = writer(out);
    csv.write_record(SYSTEM_HEADERS.iter().chain(["Users"].iter()))?;

    for system in &systems {
        let mut row = system_columns(system);

        match client.get_system_user_bindings(&system.id).await {
            Ok(bindings) => {
                for binding in bindings {
                    match by_id.get(binding.user_id.as_str()) {
                        Some(user) => row.push(format!("{} ({})", user.user_name, user.email)),
                        None => warn!(user_id = %binding.user_id, "bound user not found"),
                    }
                }
            }
            Err(e) => {
                warn!(hostname = %system.hostname, error = %e, "could not read user bindings");
            }
        }

        csv.write_record(&row)?;
    }

    csv.flush()?;
    Ok(())
}
