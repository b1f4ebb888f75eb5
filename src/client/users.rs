//! User operations

use super::client::JcClient;
use super::transport::{Op, item_path};
use crate::errors::{JcError, Result};
use crate::models::codec;
use crate::models::{Resource, User, UserAttribute};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

const SEARCH_PATH: &str = "/search/systemusers";
const REACTIVATE_PATH: &str = "/systemusers/reactivate";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivationRequest<'a> {
    is_select_all: bool,
    models: &'a [User],
}

#[derive(Serialize)]
struct AttributeUpdate<'a> {
    attributes: &'a [UserAttribute],
}

fn stamp_password(user: &User) -> User {
    let mut user = user.clone();
    if !user.password.is_empty() {
        user.password_date = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    }
    user
}

impl JcClient {
    /// All users sorted by username
    pub async fn list_users(&self, with_tags: bool) -> Result<Vec<User>> {
        self.list_tagged(with_tags).await
    }

    pub async fn get_user_by_id(&self, id: &str, with_tags: bool) -> Result<User> {
        let mut user = self.fetch::<User>(id).await?;
        if with_tags {
            self.enrich(std::slice::from_mut(&mut user)).await?;
        }
        Ok(user)
    }

    /// Users whose email matches exactly; usually zero or one
    pub async fn get_users_by_email(&self, email: &str, with_tags: bool) -> Result<Vec<User>> {
        let filter = json!({ "filter": [{ "email": email }] });
        self.search_users(filter, with_tags).await
    }

    /// Users whose password expires within `[from, to]`
    pub async fn get_users_by_password_expiry(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<User>> {
        if to < from {
            return Err(JcError::InvalidRequest(format!(
                "password expiry window ends ({}) before it starts ({})",
                to, from
            )));
        }

        let filter = json!({
            "filter": {
                "password_expiration_date": {
                    "$gte": from.to_rfc3339(),
                    "$lte": to.to_rfc3339(),
                }
            }
        });
        self.search_users(filter, false).await
    }

    async fn search_users(&self, filter: serde_json::Value, with_tags: bool) -> Result<Vec<User>> {
        let body = self
            .execute(Op::Insert, SEARCH_PATH, Some(serde_json::to_vec(&filter)?))
            .await?;
        let mut users = codec::decode_page::<User>(User::KIND, &body)?.records;
        if with_tags {
            self.enrich(&mut users).await?;
        }
        Ok(users)
    }

    /// Create a user and return its id.
    ///
    /// A supplied password gets its `password_date` set to now.
    pub async fn create_user(&self, user: &User) -> Result<String> {
        self.save(Op::Insert, &stamp_password(user)).await
    }

    pub async fn update_user(&self, user: &User) -> Result<String> {
        self.save(Op::Update, &stamp_password(user)).await
    }

    pub async fn delete_user(&self, user: &User) -> Result<()> {
        warn!(email = %user.email, "deleting user");
        self.remove::<User>(&user.id).await
    }

    /// Ask the service to mail activation links to `users`.
    ///
    /// Every user must already exist; nothing is sent otherwise.
    pub async fn send_activation_email(&self, users: &[User]) -> Result<()> {
        if let Some(user) = users.iter().find(|u| u.id.is_empty()) {
            return Err(JcError::InvalidRequest(format!(
                "cannot resend activation email to '{}' without a user id",
                user.email
            )));
        }

        let request = ActivationRequest {
            is_select_all: false,
            models: users,
        };
        self.execute(
            Op::Insert,
            REACTIVATE_PATH,
            Some(serde_json::to_vec(&request)?),
        )
        .await?;

        info!(count = users.len(), "activation emails requested");
        Ok(())
    }

    /// Replace the custom attributes of an existing user
    pub async fn set_user_attributes(&self, user: &User, attributes: &[UserAttribute]) -> Result<()> {
        let path = item_path(User::PATH, &user.id)?;
        let body = serde_json::to_vec(&AttributeUpdate { attributes })?;
        self.execute(Op::Update, &path, Some(body)).await?;
        Ok(())
    }
}
