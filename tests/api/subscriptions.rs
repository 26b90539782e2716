use std::collections::HashMap;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::{TestApp, INSERT_PATH};

#[tokio::test]
async fn subscribe_returns_201_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;
    let body = HashMap::from([("email", "frank@test.com")]);

    test_app.store_accepts_inserts().await;

    let response = test_app.post_subscription(body).await;

    assert_eq!(201, response.status().as_u16());
}

#[tokio::test]
async fn subscribe_inserts_the_lowercased_email_once() {
    let test_app = TestApp::spawn_app().await;
    let body = HashMap::from([("email", "Frank@Test.com")]);

    Mock::given(path(INSERT_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&test_app.store_server)
        .await;

    test_app.post_subscription(body).await;

    let rows = test_app.inserted_rows().await;

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["email"], "frank@test.com");
    let subscribed_at = rows[0]["subscribed_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(subscribed_at).is_ok());
}

#[tokio::test]
async fn subscribe_returns_409_when_email_is_already_subscribed() {
    let test_app = TestApp::spawn_app().await;
    let body = HashMap::from([("email", "frank@test.com")]);

    test_app.store_rejects_duplicates().await;

    let response = test_app.post_subscription(body).await;

    assert_eq!(409, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "This email is already subscribed!");
}

#[tokio::test]
async fn subscribe_returns_500_with_a_retry_message_when_the_store_fails() {
    let test_app = TestApp::spawn_app().await;
    let body = HashMap::from([("email", "frank@test.com")]);

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&test_app.store_server)
        .await;

    let response = test_app.post_subscription(body).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to subscribe. Please try again.");
}

#[tokio::test]
async fn subscribe_returns_400_when_body_require_field_is_missing() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.post_subscription(HashMap::new()).await;

    assert_eq!(400, response.status().as_u16());
}

#[tokio::test]
async fn subscribe_returns_400_when_email_is_not_valid() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&test_app.store_server)
        .await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases: Vec<(&str, &str, &str)> = vec![
        ("", "Please enter your email", "empty email"),
        ("   ", "Please enter your email", "whitespace email"),
        ("bad-email", "Please enter a valid email address", "missing @"),
        ("a@b", "Please enter a valid email address", "missing dot in domain"),
        ("@test.com", "Please enter a valid email address", "missing local part"),
    ];

    for (email, expected_message, description) in test_cases {
        let response = test_app
            .post_subscription(HashMap::from([("email", email)]))
            .await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            description
        );
        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], expected_message);
    }
}

#[tokio::test]
async fn subscribe_returns_500_with_a_generic_message_when_the_store_is_unreachable() {
    let test_app = TestApp::spawn_app_with(|config| {
        config.store.timeout_milliseconds = Some(200);
    })
    .await;
    let body = HashMap::from([("email", "frank@test.com")]);

    Mock::given(path(INSERT_PATH))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(201).set_delay(std::time::Duration::from_secs(2)))
        .mount(&test_app.store_server)
        .await;

    let response = test_app.post_subscription(body).await;

    assert_eq!(500, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Something went wrong. Please try again.");
}
