//! Export and maintenance jobs

#[cfg(test)]
mod tests {
    use crate::common::{MockDirectory, fixtures};
    use crate::{assert_err, assert_ok};
    use jcapi::cli::{self, export, maintenance};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn inactive_system(id: &str, hostname: &str, last_contact: &str) -> serde_json::Value {
        let mut system = fixtures::system(id, hostname);
        system["active"] = json!(false);
        system["lastContact"] = json!(last_contact);
        system
    }

    #[tokio::test]
    async fn test_dry_run_deletes_nothing() {
        let directory = MockDirectory::start().await;
        directory
            .mount_list(
                "/systems",
                vec![
                    fixtures::system("s1", "live"),
                    inactive_system("s2", "gone", "2020-01-01T00:00:00Z"),
                ],
                100,
            )
            .await;

        let client = directory.client(100);
        let stale = assert_ok!(maintenance::delete_inactive_systems(&client, 30, true).await);
        assert_eq!(stale.len(), 1);
        assert_eq!(stale[0].hostname, "gone");

        let requests = directory.requests().await;
        assert!(requests.iter().all(|(verb, _)| verb == "GET"));
    }

    #[tokio::test]
    async fn test_stale_systems_are_deleted() {
        let directory = MockDirectory::start().await;
        directory
            .mount_list(
                "/systems",
                vec![inactive_system("s2", "gone", "2020-01-01T00:00:00Z")],
                100,
            )
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/systems/s2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&directory.server)
            .await;

        let deleted = assert_ok!(
            maintenance::delete_inactive_systems(&directory.client(100), 30, false).await
        );
        assert_eq!(deleted.len(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_last_contact_stops_the_job() {
        let directory = MockDirectory::start().await;
        directory
            .mount_list("/systems", vec![inactive_system("s3", "odd", "yesterday")], 100)
            .await;

        let err = assert_err!(
            maintenance::delete_inactive_systems(&directory.client(100), 30, false).await
        );
        assert!(err.is_decode());
    }

    #[tokio::test]
    async fn test_only_externally_managed_users_are_released() {
        let directory = MockDirectory::start().await;
        // list projections carry only a few fields
        directory
            .mount_list(
                "/systemusers",
                vec![
                    json!({"_id": "u1", "username": "local", "email": "local@x.com"}),
                    json!({
                        "_id": "u2",
                        "username": "ext",
                        "email": "ext@x.com",
                        "externally_managed": true
                    }),
                ],
                100,
            )
            .await;

        let mut full = fixtures::user("u2", "ext", "ext@x.com");
        full["sudo"] = json!(true);
        full["activated"] = json!(true);
        full["enable_managed_uid"] = json!(true);
        full["unix_uid"] = json!(5001);
        full["externally_managed"] = json!(true);
        full["external_dn"] = json!("CN=ext,DC=corp");
        Mock::given(method("GET"))
            .and(path("/api/systemusers/u2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(full.clone()))
            .expect(1)
            .mount(&directory.server)
            .await;

        full["externally_managed"] = json!(false);
        full["external_dn"] = json!("");
        Mock::given(method("PUT"))
            .and(path("/api/systemusers/u2"))
            .and(body_partial_json(json!({
                "externally_managed": false,
                "sudo": true,
                "activated": true,
                "enable_managed_uid": true,
                "unix_uid": "5001"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(full))
            .expect(1)
            .mount(&directory.server)
            .await;

        let released = assert_ok!(maintenance::release_users(&directory.client(100)).await);
        assert_eq!(released, 1);

        let requests = directory.requests().await;
        assert!(!requests.iter().any(|(_, path)| path == "/api/systemusers/u1"));
    }

    #[tokio::test]
    async fn test_password_expiry_report_is_written() {
        let directory = MockDirectory::start().await;
        let mut expiring = fixtures::user("u1", "js", "joe@x.com");
        expiring["password_expiration_date"] = json!("2030-05-01T00:00:00Z");
        Mock::given(method("POST"))
            .and(path("/api/search/systemusers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::page(&[expiring])))
            .expect(1)
            .mount(&directory.server)
            .await;

        let users = assert_ok!(maintenance::expiring_users(&directory.client(100), 30).await);

        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("expiring.csv");
        let out = assert_ok!(cli::open_output(Some(&report)));
        assert_ok!(maintenance::write_expiring_users(&users, out));

        let text = std::fs::read_to_string(&report).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("FIRSTNAME,LASTNAME,EMAIL,PASSWORD EXPIRY DATE"));
        assert_eq!(lines.next(), Some("Test,User,joe@x.com,2030-05-01T00:00:00+00:00"));
    }

    #[tokio::test]
    async fn test_users_per_system_export() {
        let directory = MockDirectory::start().await;
        directory
            .mount_list(
                "/systems",
                vec![fixtures::system("s1", "web1"), fixtures::system("s2", "web2")],
                100,
            )
            .await;
        directory
            .mount_list(
                "/systemusers",
                vec![fixtures::user("u1", "js", "joe@x.com")],
                100,
            )
            .await;
        directory
            .mount_list("/systems/s1/systemusers", vec![json!({"userId": "u1"})], 100)
            .await;
        directory
            .mount_status("GET", "/systems/s2/systemusers", 500)
            .await;

        let mut out = Vec::new();
        assert_ok!(export::write_users_per_system(&directory.client(100), &mut out).await);

        let text = String::from_utf8(out).unwrap();
        let rows: Vec<&str> = text.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("s1,"));
        assert!(rows[1].ends_with("js (joe@x.com)"));
        assert!(rows[2].starts_with("s2,"));
        assert!(!rows[2].contains("joe@x.com"));
    }
}
