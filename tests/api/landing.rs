use wiremock::matchers::any;
use wiremock::{Mock, ResponseTemplate};

use crate::helpers::TestApp;

#[tokio::test]
async fn landing_page_is_served_as_html() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.get("/").await;

    assert_eq!(200, response.status().as_u16());
    assert!(response.headers()["Content-Type"]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let page = response.text().await.unwrap();
    assert!(page.contains("We&apos;re Launching!"));
    assert!(page.contains(r#"<form name="subscribe""#));
}

#[tokio::test]
async fn form_submission_shows_the_confirmation() {
    let test_app = TestApp::spawn_app().await;
    test_app.store_accepts_inserts().await;

    let page = test_app
        .post_landing_form("frank@test.com")
        .await
        .text()
        .await
        .unwrap();

    assert!(page.contains("You&apos;re on the list!"));
    assert!(page.contains("LinkedIn"));
    assert_eq!(test_app.inserted_rows().await.len(), 1);
}

#[tokio::test]
async fn form_submission_keeps_the_email_when_already_subscribed() {
    let test_app = TestApp::spawn_app().await;
    test_app.store_rejects_duplicates().await;

    let page = test_app
        .post_landing_form("frank@test.com")
        .await
        .text()
        .await
        .unwrap();

    assert!(page.contains("This email is already subscribed!"));
    assert!(!page.contains("Failed to subscribe"));
    assert!(page.contains(r#"value="frank@test.com""#));
}

#[tokio::test]
async fn invalid_form_submission_never_reaches_the_store() {
    let test_app = TestApp::spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&test_app.store_server)
        .await;

    let page = test_app
        .post_landing_form("bad-email")
        .await
        .text()
        .await
        .unwrap();

    assert!(page.contains("Please enter a valid email address"));
    assert!(page.contains(r#"value="bad-email""#));
}
