use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::subscriber_email::{EmailError, SubscriberEmail};

/// A row ready to be inserted into the subscribers table.
#[derive(Debug, Clone)]
pub struct NewSubscriber {
    pub email: SubscriberEmail,
    pub subscribed_at: DateTime<Utc>,
}

#[derive(serde::Deserialize, Debug)]
pub struct NewSubscriberBody {
    pub email: String,
}

/// Wire shape of a subscriber row: `{ email, subscribed_at }`.
#[derive(serde::Serialize, Debug)]
pub struct SubscriberRow {
    pub email: String,
    pub subscribed_at: String,
}

impl NewSubscriber {
    pub fn parse(email: &str, subscribed_at: DateTime<Utc>) -> Result<Self, EmailError> {
        let email = SubscriberEmail::parse(email)?;

        Ok(NewSubscriber {
            email,
            subscribed_at,
        })
    }

    pub fn to_row(&self) -> SubscriberRow {
        SubscriberRow {
            email: String::from(self.email.as_ref()),
            // Millisecond precision with a `Z` suffix, e.g. 2026-12-01T09:00:00.000Z
            subscribed_at: self.subscribed_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
