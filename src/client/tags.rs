//! Tag operations

use super::client::JcClient;
use super::transport::{Op, item_path};
use crate::errors::{JcError, Result};
use crate::models::tag::decode_tags;
use crate::models::{Resource, Tag};

impl JcClient {
    /// All tags sorted by name
    pub async fn list_tags(&self) -> Result<Vec<Tag>> {
        self.list_all::<Tag>().await
    }

    /// The tag with this name, if any.
    ///
    /// A missing tag is `Ok(None)`; the service answers 404 for it.
    pub async fn get_tag_by_name(&self, name: &str) -> Result<Option<Tag>> {
        let path = item_path(Tag::PATH, name)?;
        match self.execute(Op::Read, &path, None).await {
            Ok(body) => Ok(decode_tags(&body)?.into_iter().next()),
            Err(JcError::Status { status, .. }) if status.starts_with("404") => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn create_tag(&self, tag: &Tag) -> Result<String> {
        self.save(Op::Insert, tag).await
    }

    pub async fn update_tag(&self, tag: &Tag) -> Result<String> {
        self.save(Op::Update, tag).await
    }

    pub async fn delete_tag(&self, tag: &Tag) -> Result<()> {
        self.remove::<Tag>(&tag.id).await
    }
}
