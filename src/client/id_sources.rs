//! ID source operations

use super::client::JcClient;
use super::transport::Op;
use crate::errors::Result;
use crate::models::IdSource;

impl JcClient {
    pub async fn list_id_sources(&self) -> Result<Vec<IdSource>> {
        self.list_all::<IdSource>().await
    }

    /// The first ID source with this name, if any
    pub async fn get_id_source_by_name(&self, name: &str) -> Result<Option<IdSource>> {
        Ok(self
            .list_id_sources()
            .await?
            .into_iter()
            .find(|source| source.name == name))
    }

    /// Create an ID source; `active` is sent with it
    pub async fn create_id_source(&self, source: &IdSource) -> Result<String> {
        self.save(Op::Insert, source).await
    }

    /// Update an ID source; `active` is left as the service has it
    pub async fn update_id_source(&self, source: &IdSource) -> Result<String> {
        self.save(Op::Update, source).await
    }

    pub async fn delete_id_source(&self, source: &IdSource) -> Result<()> {
        self.remove::<IdSource>(&source.id).await
    }
}
