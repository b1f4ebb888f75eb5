//! JSON records as the directory service returns them

use serde_json::{Value, json};

pub fn user(id: &str, username: &str, email: &str) -> Value {
    json!({
        "_id": id,
        "username": username,
        "email": email,
        "firstname": "Test",
        "lastname": "User",
        "activated": true,
        "tags": null
    })
}

/// `count` users named `user0000`, `user0001`, ...
pub fn users(count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            let name = format!("user{:04}", i);
            user(&format!("u{}", i), &name, &format!("{}@example.com", name))
        })
        .collect()
}

pub fn system(id: &str, hostname: &str) -> Value {
    json!({
        "_id": id,
        "hostname": hostname,
        "displayName": hostname,
        "os": "Ubuntu",
        "active": true,
        "lastContact": "2024-01-01T00:00:00.000Z",
        "systemTimezone": -300,
        "tags": []
    })
}

pub fn tag(id: &str, name: &str, systems: &[&str], users: &[&str]) -> Value {
    json!({
        "_id": id,
        "name": name,
        "systems": systems,
        "systemusers": users,
        "regularExpressions": null,
        "expirationTime": null
    })
}

pub fn id_source(id: &str, name: &str) -> Value {
    json!({
        "_id": id,
        "name": name,
        "type": "ldap",
        "active": "true"
    })
}

/// A list envelope
pub fn page(results: &[Value]) -> Value {
    json!({ "totalCount": results.len(), "results": results })
}
