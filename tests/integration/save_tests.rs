//! Creating and updating records

#[cfg(test)]
mod tests {
    use crate::common::{MockDirectory, fixtures};
    use crate::{assert_err, assert_ok};
    use jcapi::{IdSource, User};
    use serde_json::Value;

    fn user(id: &str, email: &str) -> User {
        User {
            id: id.to_string(),
            user_name: "joe".to_string(),
            email: email.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_update_returns_saved_id() {
        let directory = MockDirectory::start().await;
        directory
            .mount_json("PUT", "/systemusers/u1", fixtures::user("u1", "joe", "joe@x.com"))
            .await;

        let id = assert_ok!(directory.client(100).update_user(&user("u1", "joe@x.com")).await);
        assert_eq!(id, "u1");
    }

    #[tokio::test]
    async fn test_identity_mismatch_is_an_integrity_error() {
        let directory = MockDirectory::start().await;
        directory
            .mount_json(
                "PUT",
                "/systemusers/u1",
                fixtures::user("u1", "joe", "someone-else@x.com"),
            )
            .await;

        let err = assert_err!(directory.client(100).update_user(&user("u1", "joe@x.com")).await);
        assert!(err.is_integrity());
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn test_rejected_save_is_a_status_error() {
        let directory = MockDirectory::start().await;
        directory.mount_status("POST", "/systemusers", 400).await;

        let err = assert_err!(directory.client(100).create_user(&user("", "joe@x.com")).await);
        assert_eq!(err.status(), Some("400 Bad Request"));
    }

    #[tokio::test]
    async fn test_garbage_response_is_a_decode_error() {
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, ResponseTemplate};

        let directory = MockDirectory::start().await;
        Mock::given(method("POST"))
            .and(path("/api/systemusers"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&directory.server)
            .await;

        let err = assert_err!(directory.client(100).create_user(&user("", "joe@x.com")).await);
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_id_source_active_flag_only_sent_on_create() {
        let directory = MockDirectory::start().await;
        directory
            .mount_json("POST", "/idsources", fixtures::id_source("i1", "ldap-east"))
            .await;
        directory
            .mount_json("PUT", "/idsources/i1", fixtures::id_source("i1", "ldap-east"))
            .await;
        let client = directory.client(100);

        let mut source = IdSource {
            name: "ldap-east".to_string(),
            source_type: "ldap".to_string(),
            active: true,
            ..Default::default()
        };
        source.id = assert_ok!(client.create_id_source(&source).await);
        assert_eq!(source.id, "i1");
        assert_ok!(client.update_id_source(&source).await);

        let bodies: Vec<Value> = directory
            .server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| serde_json::from_slice(&r.body).unwrap())
            .collect();
        assert_eq!(bodies.len(), 2);
        assert_eq!(bodies[0]["active"], "true");
        assert!(bodies[1].get("active").is_none());
        assert_eq!(bodies[1]["_id"], "i1");
    }
}
