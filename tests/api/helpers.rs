use once_cell::sync::Lazy;
use reqwest::Response;
use std::collections::HashMap;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use coming_soon::{
    config::{get_configuration, Settings, StoreBackend},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};

pub const INSERT_PATH: &str = "/rest/v1/subscribers";

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = String::from("info");
    let subscriber_name = String::from("test");

    // Logs are dropped unless TEST_LOG is set, e.g. `TEST_LOG=1 cargo test | bunyan`
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub config: Settings,
    pub address: String,
    pub store_server: MockServer,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        TestApp::spawn_app_with(|_| {}).await
    }

    pub async fn spawn_app_with(customize: impl FnOnce(&mut Settings)) -> TestApp {
        Lazy::force(&TRACING);

        let mut config = get_configuration().expect("Missing configuration file.");
        let store_server = MockServer::start().await;

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);
        config.store.backend = StoreBackend::Rest;
        config.set_store_base_url(store_server.uri());
        customize(&mut config);

        let application = Application::build(config.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            config,
            store_server,
        }
    }

    pub async fn post_subscription(&self, body: HashMap<&str, &str>) -> Response {
        reqwest::Client::new()
            .post(&format!("{}/subscriptions", self.address))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_landing_form(&self, email: &str) -> Response {
        reqwest::Client::new()
            .post(&format!("{}/", self.address))
            .form(&[("email", email)])
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, route: &str) -> Response {
        reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap()
            .get(&format!("{}{}", self.address, route))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// The store accepts every insert.
    pub async fn store_accepts_inserts(&self) {
        Mock::given(path(INSERT_PATH))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&self.store_server)
            .await;
    }

    /// The store answers like a table that already holds the email.
    pub async fn store_rejects_duplicates(&self) {
        Mock::given(path(INSERT_PATH))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(409).set_body_json(serde_json::json!({
                "code": "23505",
                "message": "duplicate key value violates unique constraint \"subscribers_email_key\"",
                "details": "Key (email)=(frank@test.com) already exists.",
                "hint": null
            })))
            .mount(&self.store_server)
            .await;
    }

    pub async fn inserted_rows(&self) -> Vec<serde_json::Value> {
        self.store_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .flat_map(|request| {
                let rows: Vec<serde_json::Value> = serde_json::from_slice(&request.body).unwrap();
                rows
            })
            .collect()
    }
}
