//! Credential checks

#[cfg(test)]
mod tests {
    use crate::common::MockDirectory;
    use crate::{assert_err, assert_ok};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    #[tokio::test]
    async fn test_accepted_credentials() {
        let directory = MockDirectory::start().await;
        Mock::given(method("POST"))
            .and(path("/api/authenticate"))
            .and(body_json(json!({"username": "joe", "password": "pw", "tag": ""})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&directory.server)
            .await;

        let ok = assert_ok!(directory.client(100).authenticate("joe", "pw", "").await);
        assert!(ok);
    }

    #[tokio::test]
    async fn test_rejected_credentials_are_not_an_error() {
        let directory = MockDirectory::start().await;
        directory.mount_status("POST", "/authenticate", 401).await;

        let ok = assert_ok!(directory.client(100).authenticate("joe", "bad", "web").await);
        assert!(!ok);
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let client = assert_ok!(jcapi::JcClient::with_key("k", "http://127.0.0.1:1/api"));
        let err = assert_err!(client.authenticate("joe", "pw", "").await);
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
    }
}
