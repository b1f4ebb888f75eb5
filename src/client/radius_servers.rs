//! RADIUS server operations

use super::client::JcClient;
use super::transport::Op;
use crate::errors::Result;
use crate::models::RadiusServer;

impl JcClient {
    pub async fn list_radius_servers(&self) -> Result<Vec<RadiusServer>> {
        self.list_all::<RadiusServer>().await
    }

    pub async fn create_radius_server(&self, server: &RadiusServer) -> Result<String> {
        self.save(Op::Insert, server).await
    }

    pub async fn update_radius_server(&self, server: &RadiusServer) -> Result<String> {
        self.save(Op::Update, server).await
    }

    pub async fn delete_radius_server(&self, server: &RadiusServer) -> Result<()> {
        self.remove::<RadiusServer>(&server.id).await
    }
}
