use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time;

use crate::domain::new_subscriber::NewSubscriber;
use crate::store::{StoreError, SubscriberStore, UNIQUE_VIOLATION};

#[derive(Clone)]
pub struct RestSubscriberStore {
    http_client: Client,
    base_url: String,
    table: String,
    api_key: Secret<String>,
}

/// Error payload returned by the REST endpoint, every field is optional.
#[derive(serde::Deserialize, Debug, Default)]
struct RestErrorBody {
    code: Option<String>,
    message: Option<String>,
}

impl RestSubscriberStore {
    pub fn new(
        base_url: String,
        table: String,
        api_key: Secret<String>,
        timeout: Option<time::Duration>,
    ) -> Result<RestSubscriberStore, reqwest::Error> {
        let mut builder = Client::builder();

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(RestSubscriberStore {
            http_client: builder.build()?,
            base_url,
            table,
            api_key,
        })
    }

    fn insert_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }
}

impl SubscriberStore for RestSubscriberStore {
    #[tracing::instrument(
        name = "Insert a new subscriber through the REST store",
        skip(self, new_subscriber),
        fields(subscriber_email = %new_subscriber.email)
    )]
    async fn insert(&self, new_subscriber: &NewSubscriber) -> Result<(), StoreError> {
        let response = self
            .http_client
            .post(self.insert_url())
            .header("apikey", self.api_key.expose_secret())
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Prefer", "return=minimal")
            .json(&[new_subscriber.to_row()])
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        // A body that is not the usual error payload still tells us the status.
        let body: RestErrorBody = response.json().await.unwrap_or_default();

        if status == StatusCode::CONFLICT || body.code.as_deref() == Some(UNIQUE_VIOLATION) {
            return Err(StoreError::Conflict);
        }

        Err(StoreError::Rejected {
            status: status.as_u16(),
            code: body.code,
            message: body.message.unwrap_or_default(),
        })
    }
}
