//! A mock directory service
//!
//! Collections are served under `/api`, the way the real service is reached
//! through its base URL.

use super::fixtures;
use jcapi::{ConfigBuilder, JcClient};
use serde_json::Value;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_KEY: &str = "test-key";

pub struct MockDirectory {
    pub server: MockServer,
}

impl MockDirectory {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn base_url(&self) -> String {
        format!("{}/api", self.server.uri())
    }

    pub fn client(&self, page_size: usize) -> JcClient {
        let config = ConfigBuilder::new()
            .api_key(API_KEY)
            .base_url(&self.base_url())
            .page_size(page_size)
            .build()
            .expect("valid test config");
        JcClient::new(config).expect("client")
    }

    /// Serve `records` from `collection` in pages of `page_size`.
    ///
    /// Every page the client should ask for is mounted with an exact call
    /// count, including the trailing empty page a full last page implies.
    pub async fn mount_list(&self, collection: &str, records: Vec<Value>, page_size: usize) {
        let mut skip = 0;
        loop {
            let end = (skip + page_size).min(records.len());
            let chunk = if skip < records.len() {
                &records[skip..end]
            } else {
                &[][..]
            };

            Mock::given(method("GET"))
                .and(path(format!("/api{}", collection)))
                .and(query_param("skip", skip.to_string()))
                .and(query_param("limit", page_size.to_string()))
                .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::page(chunk)))
                .expect(1)
                .mount(&self.server)
                .await;

            if chunk.len() != page_size {
                break;
            }
            skip += page_size;
        }
    }

    /// Answer `verb collection` with `body` and status 200
    pub async fn mount_json(&self, verb: &str, route: &str, body: Value) {
        Mock::given(method(verb))
            .and(path(format!("/api{}", route)))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mount_status(&self, verb: &str, route: &str, status: u16) {
        Mock::given(method(verb))
            .and(path(format!("/api{}", route)))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Requests the server saw, by method and path
    pub async fn requests(&self) -> Vec<(String, String)> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|r| (r.method.to_string(), r.url.path().to_string()))
            .collect()
    }
}
