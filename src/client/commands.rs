//! Command operations

use super::client::JcClient;
use super::transport::Op;
use crate::errors::{JcError, Result};
use crate::models::{Command, Resource};
use tracing::info;

const RUN_COMMAND_PATH: &str = "/runCommand";

impl JcClient {
    pub async fn list_commands(&self) -> Result<Vec<Command>> {
        self.list_all::<Command>().await
    }

    pub async fn get_command_by_id(&self, id: &str) -> Result<Command> {
        self.fetch::<Command>(id).await
    }

    pub async fn create_command(&self, command: &Command) -> Result<String> {
        self.save(Op::Insert, command).await
    }

    pub async fn update_command(&self, command: &Command) -> Result<String> {
        self.save(Op::Update, command).await
    }

    pub async fn delete_command(&self, command: &Command) -> Result<()> {
        self.remove::<Command>(&command.id).await
    }

    /// Trigger a saved command on its targets now
    pub async fn run_command(&self, command: &Command) -> Result<()> {
        if command.id.is_empty() {
            return Err(JcError::InvalidRequest(format!(
                "command '{}' must be saved before it can run",
                command.name
            )));
        }

        self.execute(
            Op::Insert,
            RUN_COMMAND_PATH,
            Some(command.encode(Op::Insert)?),
        )
        .await?;

        info!(command = %command.name, id = %command.id, "command triggered");
        Ok(())
    }
}
