//! Paging through collections

#[cfg(test)]
mod tests {
    use crate::{assert_err, assert_ok};
    use crate::common::{MockDirectory, fixtures};

    async fn list_users_with(count: usize, page_size: usize) -> (MockDirectory, Vec<jcapi::User>) {
        let directory = MockDirectory::start().await;
        directory
            .mount_list("/systemusers", fixtures::users(count), page_size)
            .await;

        let client = directory.client(page_size);
        let users = assert_ok!(client.list_users(false).await);
        (directory, users)
    }

    #[tokio::test]
    async fn test_empty_collection_is_one_request() {
        let (directory, users) = list_users_with(0, 100).await;
        assert!(users.is_empty());
        assert_eq!(directory.requests().await.len(), 1);
    }

    #[tokio::test]
    async fn test_exact_multiple_costs_an_extra_request() {
        let (directory, users) = list_users_with(100, 100).await;
        assert_eq!(users.len(), 100);
        assert_eq!(directory.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_short_last_page_ends_paging() {
        let (directory, users) = list_users_with(150, 100).await;
        assert_eq!(users.len(), 150);
        assert_eq!(directory.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_order_is_preserved_across_pages() {
        let (_directory, users) = list_users_with(25, 10).await;
        let names: Vec<_> = users.iter().map(|u| u.user_name.clone()).collect();
        let expected: Vec<_> = (0..25).map(|i| format!("user{:04}", i)).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_sort_key_is_sent() {
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, ResponseTemplate};

        let directory = MockDirectory::start().await;
        Mock::given(method("GET"))
            .and(path("/api/systems"))
            .and(query_param("sort", "hostname"))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::page(&[
                fixtures::system("s1", "alpha"),
                fixtures::system("s2", "beta"),
            ])))
            .expect(1)
            .mount(&directory.server)
            .await;

        let systems = assert_ok!(directory.client(100).list_systems(false).await);
        assert_eq!(systems.len(), 2);
        assert_eq!(systems[0].hostname, "alpha");
    }

    #[tokio::test]
    async fn test_undecodable_record_is_skipped_but_counted() {
        let directory = MockDirectory::start().await;
        let mut records = fixtures::users(2);
        // no email
        records.insert(1, serde_json::json!({"_id": "broken", "username": "broken"}));
        directory.mount_list("/systemusers", records, 3).await;

        let client = directory.client(3);
        let users = assert_ok!(client.list_users(false).await);

        // the full first page still asked for a second one
        assert_eq!(users.len(), 2);
        assert_eq!(directory.requests().await.len(), 2);
    }

    #[tokio::test]
    async fn test_system_user_bindings_are_paged() {
        let directory = MockDirectory::start().await;
        let bindings: Vec<_> = (0..3)
            .map(|i| serde_json::json!({"userId": format!("u{}", i)}))
            .collect();
        directory.mount_list("/systems/s1/systemusers", bindings, 2).await;

        let client = directory.client(2);
        let found = assert_ok!(client.get_system_user_bindings("s1").await);
        let ids: Vec<_> = found.iter().map(|b| b.user_id.as_str()).collect();
        assert_eq!(ids, ["u0", "u1", "u2"]);
    }

    #[tokio::test]
    async fn test_failed_later_page_fails_the_listing() {
        use wiremock::matchers::{method, path, query_param};
        use wiremock::{Mock, ResponseTemplate};

        let directory = MockDirectory::start().await;
        Mock::given(method("GET"))
            .and(path("/api/systemusers"))
            .and(query_param("skip", "0"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(fixtures::page(&fixtures::users(2))),
            )
            .expect(1)
            .mount(&directory.server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/systemusers"))
            .and(query_param("skip", "2"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&directory.server)
            .await;

        let err = assert_err!(directory.client(2).list_users(false).await);
        assert_eq!(err.status(), Some("500 Internal Server Error"));
    }

    #[tokio::test]
    async fn test_systems_with_both_id_keys_are_listed() {
        let directory = MockDirectory::start().await;
        let mut system = fixtures::system("S1", "web1");
        system["id"] = serde_json::json!("S1");
        directory.mount_list("/systems", vec![system], 100).await;

        let systems = assert_ok!(directory.client(100).list_systems(false).await);
        assert_eq!(systems.len(), 1);
        assert_eq!(systems[0].id, "S1");
        assert_eq!(systems[0].hostname, "web1");
    }
}
