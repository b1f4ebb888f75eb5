//! Command result operations

use super::client::JcClient;
use super::transport::{Op, item_path};
use crate::errors::{JcError, Result};
use crate::models::command_result::decode_list;
use crate::models::{Command, CommandResult, Resource};
use url::form_urlencoded;

impl JcClient {
    /// All results, newest first
    pub async fn list_command_results(&self) -> Result<Vec<CommandResult>> {
        self.list_all::<CommandResult>().await
    }

    /// Full result, including output
    pub async fn get_command_result_by_id(&self, id: &str) -> Result<CommandResult> {
        self.fetch::<CommandResult>(id).await
    }

    /// Results of every run of commands called `name`, newest first
    pub async fn get_command_results_by_name(&self, name: &str) -> Result<Vec<CommandResult>> {
        if name.is_empty() {
            return Err(JcError::InvalidRequest(
                "name is required to search command results".to_string(),
            ));
        }

        let search = form_urlencoded::Serializer::new(String::new())
            .append_pair("search[fields][]", "name")
            .append_pair("search[searchTerm]", name)
            .finish();

        self.collect_pages(CommandResult::KIND, |skip, limit| {
            format!(
                "{}?skip={}&limit={}&sort={}&{}",
                CommandResult::PATH,
                skip,
                limit,
                CommandResult::SORT_KEY,
                search
            )
        })
        .await
    }

    /// Results of one saved command; the endpoint answers with a bare array
    pub async fn get_command_results_for_command(
        &self,
        command_id: &str,
    ) -> Result<Vec<CommandResult>> {
        let path = format!("{}/results", item_path(Command::PATH, command_id)?);
        let body = self.execute(Op::Read, &path, None).await?;
        decode_list(&body)
    }

    pub async fn delete_command_result(&self, id: &str) -> Result<()> {
        self.remove::<CommandResult>(id).await
    }
}
