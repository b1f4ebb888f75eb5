//! Single request/response exchange with the service

use super::client::JcClient;
use crate::errors::{JcError, Result};
use bytes::Bytes;
use reqwest::{Method, StatusCode};
use tracing::debug;
use url::Url;

/// Logical operation, mapped onto an HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Read,
    Insert,
    Update,
    Delete,
    /// The service's non-standard `LIST` verb
    List,
}

impl Op {
    pub fn as_str(&self) -> &'static str {
        match self {
            Op::Read => "GET",
            Op::Insert => "POST",
            Op::Update => "PUT",
            Op::Delete => "DELETE",
            Op::List => "LIST",
        }
    }

    pub(crate) fn method(&self) -> Result<Method> {
        Ok(match self {
            Op::Read => Method::GET,
            Op::Insert => Method::POST,
            Op::Update => Method::PUT,
            Op::Delete => Method::DELETE,
            Op::List => Method::from_bytes(self.as_str().as_bytes())
                .map_err(|e| JcError::transport("LIST", e))?,
        })
    }
}

/// `<collection>/<id>` with the id percent-encoded as one path segment
pub(crate) fn item_path(collection: &str, id: &str) -> Result<String> {
    if id.is_empty() {
        return Err(JcError::InvalidRequest(format!(
            "an id is required to address {}",
            collection
        )));
    }

    let mut url = Url::parse("http://localhost")
        .map_err(|e| JcError::InvalidRequest(e.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| JcError::InvalidRequest("cannot build item path".to_string()))?
        .pop_if_empty()
        .push(id);

    Ok(format!("{}{}", collection, url.path()))
}

impl JcClient {
    /// Send one request and return the raw response, whatever its status
    pub(crate) async fn send(
        &self,
        op: Op,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.config.base_url, path);
        let operation = format!("{} {}", op.as_str(), path);

        debug!("{}", operation);

        let mut request = self
            .http_client
            .request(op.method()?, &url)
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .header("x-api-key", &self.config.api_key);

        if let Some(body) = body {
            request = request.body(body);
        }

        request
            .send()
            .await
            .map_err(|e| JcError::transport(operation, e))
    }

    /// Send one request and return the body of a `200 OK` response.
    ///
    /// Every other status, including the rest of the 2xx range, is an error.
    pub(crate) async fn execute(&self, op: Op, path: &str, body: Option<Vec<u8>>) -> Result<Bytes> {
        let response = self.send(op, path, body).await?;
        let operation = format!("{} {}", op.as_str(), path);

        let status = response.status();
        if status != StatusCode::OK {
            debug!(%status, "{} rejected", operation);
            return Err(JcError::Status {
                operation,
                status: status.to_string(),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| JcError::transport(operation, e))
    }
}
