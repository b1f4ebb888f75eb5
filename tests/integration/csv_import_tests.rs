//! The CSV user import against a mock directory

#[cfg(test)]
mod tests {
    use crate::assert_ok;
    use crate::common::{MockDirectory, fixtures};
    use jcapi::cli::{attributes, csv_import};
    use serde_json::{Value, json};
    use std::fs::File;
    use std::io::Write;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    async fn directory_with_host() -> MockDirectory {
        let directory = MockDirectory::start().await;
        directory
            .mount_list("/systems", vec![fixtures::system("s1", "host1")], 100)
            .await;
        directory.mount_list("/tags", vec![], 100).await;
        directory
            .mount_list(
                "/systemusers",
                vec![fixtures::user("a1", "admin1", "admin1@x.com")],
                100,
            )
            .await;
        directory
    }

    #[tokio::test]
    async fn test_new_user_and_host_tag_are_created() {
        let directory = directory_with_host().await;
        Mock::given(method("POST"))
            .and(path("/api/systemusers"))
            .and(body_partial_json(json!({
                "username": "js",
                "email": "joe@x.com",
                "firstname": "Joe",
                "sudo": true
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(fixtures::user("u9", "js", "joe@x.com")),
            )
            .expect(1)
            .mount(&directory.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/tags"))
            .and(body_partial_json(json!({
                "name": "host1 - Joe Smith",
                "systems": ["s1"],
                "systemusers": ["u9", "a1"]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::tag(
                "t1",
                "host1 - Joe Smith",
                &["s1"],
                &["u9", "a1"],
            )))
            .expect(1)
            .mount(&directory.server)
            .await;

        let file = csv_file("Joe,Smith,js,joe@x.com,,,T,,host1,tag1,admin1,nobody\n");
        let summary = assert_ok!(
            csv_import::run_import(&directory.client(100), File::open(file.path()).unwrap()).await
        );

        assert_eq!(summary.records, 1);
        assert_eq!(summary.users_created, 1);
        assert_eq!(summary.tags_created, 1);
        assert!(summary.failures.is_empty());
    }

    #[tokio::test]
    async fn test_existing_user_is_updated_and_bad_rows_skipped() {
        let directory = directory_with_host().await;
        Mock::given(method("PUT"))
            .and(path("/api/systemusers/a1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(fixtures::user("a1", "admin1", "admin1@x.com")),
            )
            .expect(1)
            .mount(&directory.server)
            .await;

        // second row has no email
        let file = csv_file("Ann,Admin,admin1,admin1@x.com,,,F,,,\nNo,Email,nomail,,,,F,,,\n");
        let summary = assert_ok!(
            csv_import::run_import(&directory.client(100), File::open(file.path()).unwrap()).await
        );

        assert_eq!(summary.records, 2);
        assert_eq!(summary.users_updated, 1);
        assert_eq!(summary.tags_created, 0);
        assert_eq!(summary.failures.len(), 1);
        assert_eq!(summary.failures[0].0, 2);
    }

    #[tokio::test]
    async fn test_attribute_import_sets_attributes_by_email() {
        let directory = MockDirectory::start().await;
        Mock::given(method("POST"))
            .and(path("/api/search/systemusers"))
            .and(body_partial_json(json!({"filter": [{"email": "joe@x.com"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::page(&[
                fixtures::user("u1", "js", "joe@x.com"),
            ])))
            .mount(&directory.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/search/systemusers"))
            .and(body_partial_json(json!({"filter": [{"email": "ghost@x.com"}]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::page(&[])))
            .mount(&directory.server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/systemusers/u1"))
            .and(body_partial_json(json!({
                "attributes": [
                    {"name": "department", "value": "ops"},
                    {"name": "site", "value": "east"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(Value::Object(Default::default())))
            .expect(1)
            .mount(&directory.server)
            .await;

        let file = csv_file("email,department,site\njoe@x.com,ops,east\nghost@x.com,dev,west\n");
        let summary = assert_ok!(
            attributes::run_attribute_import(
                &directory.client(100),
                File::open(file.path()).unwrap()
            )
            .await
        );

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.unknown_users, ["ghost@x.com"]);
    }
}
