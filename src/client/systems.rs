//! System operations

use super::client::JcClient;
use super::transport::{Op, item_path};
use crate::errors::Result;
use crate::models::codec;
use crate::models::{Resource, System, SystemUserBinding};
use serde_json::json;
use tracing::warn;

const SEARCH_PATH: &str = "/search/systems";

impl JcClient {
    /// All systems sorted by hostname
    pub async fn list_systems(&self, with_tags: bool) -> Result<Vec<System>> {
        self.list_tagged(with_tags).await
    }

    pub async fn get_system_by_id(&self, id: &str, with_tags: bool) -> Result<System> {
        let mut system = self.fetch::<System>(id).await?;
        if with_tags {
            self.enrich(std::slice::from_mut(&mut system)).await?;
        }
        Ok(system)
    }

    /// Systems whose hostname matches exactly
    pub async fn get_systems_by_hostname(
        &self,
        hostname: &str,
        with_tags: bool,
    ) -> Result<Vec<System>> {
        let filter = json!({ "filter": [{ "hostname": hostname }] });
        let body = self
            .execute(Op::Insert, SEARCH_PATH, Some(serde_json::to_vec(&filter)?))
            .await?;
        let mut systems = codec::decode_page::<System>(System::KIND, &body)?.records;
        if with_tags {
            self.enrich(&mut systems).await?;
        }
        Ok(systems)
    }

    /// Systems are created by their agent; only updates are possible here
    pub async fn update_system(&self, system: &System) -> Result<String> {
        self.save(Op::Update, system).await
    }

    /// Delete a system.
    ///
    /// This also deauthorizes the agent on the machine, which then has to be
    /// reinstalled to report again.
    pub async fn delete_system(&self, system: &System) -> Result<()> {
        warn!(hostname = %system.hostname, id = %system.id, "deleting system; its agent will be deauthorized");
        self.remove::<System>(&system.id).await
    }

    /// Users bound to a system, paged like any collection
    pub async fn get_system_user_bindings(&self, system_id: &str) -> Result<Vec<SystemUserBinding>> {
        let base = format!("{}/systemusers", item_path(System::PATH, system_id)?);
        self.collect_pages("system user binding", |skip, limit| {
            format!("{}?skip={}&limit={}", base, skip, limit)
        })
        .await
    }
}
