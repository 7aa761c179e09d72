//! End-to-end tests for the configuration API.

use serde_json::Value;

mod common;

const AUTH_CONFIG: &str = r#"
version: 1
database:
  host: "localhost"
  port: 5432
"#;

#[tokio::test]
async fn test_create_then_autoassign_next_version() {
    let (base, shutdown) = common::start_test_app().await;
    let client = reqwest::Client::new();

    // Explicit version 1.
    let res = client
        .post(format!("{base}/config/auth"))
        .body(AUTH_CONFIG)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["service"], "auth");
    assert_eq!(body["version"], 1);
    assert_eq!(body["status"], "saved");

    // No version field: the service assigns 2.
    let res = client
        .post(format!("{base}/config/auth"))
        .body("database:\n  host: \"localhost\"\n  port: 5432\n")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["version"], 2);

    // The stored payload kept the database section and the assigned version.
    let res = client
        .get(format!("{base}/config/auth"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["version"], 2);
    assert_eq!(payload["database"]["host"], "localhost");
    assert_eq!(payload["database"]["port"], 5432);

    shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_yaml_is_unprocessable() {
    let (base, shutdown) = common::start_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base}/config/auth"))
        .body("invalid: yaml: content:")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 422);
    let body: Value = res.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(message.starts_with("Validation errors:"));

    // Nothing was stored.
    let res = client
        .get(format!("{base}/config/auth"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_schema_violations_are_reported_together() {
    let (base, shutdown) = common::start_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base}/config/auth"))
        .body("version: 0\ndatabase:\n  host: \"\"\n  port: 99999\n")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 422);
    let body: Value = res.json().await.unwrap();
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("Field 'version' must be a positive integer"));
    assert!(message.contains("database.host must be a non-empty string"));
    assert!(message.contains("database.port must be an integer between 1 and 65535"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_empty_body_is_bad_request() {
    let (base, shutdown) = common::start_test_app().await;

    let res = reqwest::Client::new()
        .post(format!("{base}/config/auth"))
        .body("   \n")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Empty request body");

    shutdown.trigger();
}

#[tokio::test]
async fn test_get_exact_version_and_not_found() {
    let (base, shutdown) = common::start_test_app().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/config/auth"))
        .body(AUTH_CONFIG)
        .send()
        .await
        .unwrap();

    let res = client
        .get(format!("{base}/config/auth?version=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["version"], 1);

    let res = client
        .get(format!("{base}/config/auth?version=9"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);
    let body: Value = res.json().await.unwrap();
    assert_eq!(
        body["error"],
        "Configuration not found for service 'auth' version 9"
    );

    let res = client
        .get(format!("{base}/config/auth?version=two"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid version parameter");

    shutdown.trigger();
}

#[tokio::test]
async fn test_template_rendering_with_query_parameters() {
    let (base, shutdown) = common::start_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base}/config/web"))
        .body("version: 1\nwelcome_message: \"Hello {{ user }}!\"\n")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    // Raw read keeps the markers.
    let res = client
        .get(format!("{base}/config/web"))
        .send()
        .await
        .unwrap();
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["welcome_message"], "Hello {{ user }}!");

    // Rendered read substitutes the caller's variable.
    let res = client
        .get(format!("{base}/config/web?template=1&user=alice"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["welcome_message"], "Hello alice!");

    // Defaults cover variables the caller leaves out.
    let res = client
        .get(format!("{base}/config/web?template=1"))
        .send()
        .await
        .unwrap();
    let payload: Value = res.json().await.unwrap();
    assert_eq!(payload["welcome_message"], "Hello anonymous!");

    shutdown.trigger();
}

#[tokio::test]
async fn test_template_failure_is_bad_request() {
    let (base, shutdown) = common::start_test_app().await;
    let client = reqwest::Client::new();

    // An unbalanced construct is storable; it only fails at render time.
    let res = client
        .post(format!("{base}/config/web"))
        .body("version: 1\nbroken: \"{% if user %}open\"\n")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let res = client
        .get(format!("{base}/config/web?template=1"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 400);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Template processing failed:"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_duplicate_explicit_version_conflicts() {
    let (base, shutdown) = common::start_test_app().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base}/config/auth"))
        .body(AUTH_CONFIG)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 201);

    let res = client
        .post(format!("{base}/config/auth"))
        .body(AUTH_CONFIG)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 409);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("already exists"));

    shutdown.trigger();
}

#[tokio::test]
async fn test_history_is_descending() {
    let (base, shutdown) = common::start_test_app().await;
    let client = reqwest::Client::new();

    for _ in 0..3 {
        let res = client
            .post(format!("{base}/config/auth"))
            .body("database:\n  host: \"localhost\"\n  port: 5432\n")
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), 201);
    }

    let res = client
        .get(format!("{base}/config/auth/history"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);
    let history: Vec<Value> = res.json().await.unwrap();
    let versions: Vec<i64> = history.iter().map(|h| h["version"].as_i64().unwrap()).collect();
    assert_eq!(versions, vec![3, 2, 1]);
    assert!(history.iter().all(|h| h["created_at"].is_string()));

    let res = client
        .get(format!("{base}/config/unknown-service/history"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 404);

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_and_index() {
    let (base, shutdown) = common::start_test_app().await;
    let client = reqwest::Client::new();

    let res = client.get(format!("{base}/health")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"], "connected");

    let res = client.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    let body: Value = res.json().await.unwrap();
    assert!(body["endpoints"]["POST /config/{service}"].is_string());

    shutdown.trigger();
}
