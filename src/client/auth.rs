//! Credential check against the directory

use super::client::JcClient;
use super::transport::Op;
use crate::errors::Result;
use reqwest::StatusCode;
use serde::Serialize;
use std::fmt;
use tracing::debug;

const AUTHENTICATE_PATH: &str = "/authenticate";

#[derive(Serialize)]
struct AuthRequest<'a> {
    username: &'a str,
    password: &'a str,
    tag: &'a str,
}

impl fmt::Debug for AuthRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("username", &self.username)
            .field("password", &"<hidden>")
            .field("tag", &self.tag)
            .finish()
    }
}

impl JcClient {
    /// Check a username and password, optionally scoped to a tag.
    ///
    /// Any status other than `200 OK` means the credentials were rejected.
    /// Only a failure to reach the service is an error.
    pub async fn authenticate(&self, username: &str, password: &str, tag: &str) -> Result<bool> {
        let request = AuthRequest {
            username,
            password,
            tag,
        };
        debug!(?request, "authenticating");

        let response = self
            .send(
                Op::Insert,
                AUTHENTICATE_PATH,
                Some(serde_json::to_vec(&request)?),
            )
            .await?;

        Ok(response.status() == StatusCode::OK)
    }
}
