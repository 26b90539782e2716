//! The validate -> insert -> classify sequence behind the email form.

use chrono::Utc;

use crate::domain::new_subscriber::NewSubscriber;
use crate::domain::subscriber_email::EmailError;
use crate::store::{StoreError, SubscriberStore};

/// Every variant renders as the message shown to the visitor.
#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("{0}")]
    Validation(#[from] EmailError),
    #[error("This email is already subscribed!")]
    AlreadySubscribed,
    #[error("Failed to subscribe. Please try again.")]
    Failed(#[source] StoreError),
    #[error("Something went wrong. Please try again.")]
    Unexpected(#[source] StoreError),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match std::error::Error::source(self) {
            Some(cause) => write!(f, "{}\nCaused by:\n\t({:?})", self, cause),
            None => write!(f, "{}", self),
        }
    }
}

impl From<StoreError> for SubscribeError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => SubscribeError::AlreadySubscribed,
            StoreError::Unreachable(_) => SubscribeError::Unexpected(err),
            StoreError::Rejected { .. } | StoreError::Database(_) => SubscribeError::Failed(err),
        }
    }
}

/// Validates `raw_email` and issues a single insert. There is no retry and no
/// deduplication, the store's uniqueness constraint rejects repeated emails.
#[tracing::instrument(name = "Subscribing an email", skip(store, raw_email))]
pub async fn subscribe<S: SubscriberStore>(
    store: &S,
    raw_email: &str,
) -> Result<NewSubscriber, SubscribeError> {
    let new_subscriber = NewSubscriber::parse(raw_email, Utc::now())?;

    insert_subscriber(store, &new_subscriber).await?;

    Ok(new_subscriber)
}

pub async fn insert_subscriber<S: SubscriberStore>(
    store: &S,
    new_subscriber: &NewSubscriber,
) -> Result<(), SubscribeError> {
    match store.insert(new_subscriber).await {
        Ok(()) => {
            tracing::info!("New subscriber {} has been saved", new_subscriber.email);
            Ok(())
        }
        Err(StoreError::Conflict) => {
            tracing::info!("{} is already subscribed", new_subscriber.email);
            Err(SubscribeError::AlreadySubscribed)
        }
        Err(err) => {
            tracing::error!("Failed to insert new subscriber: {:?}", err);
            Err(err.into())
        }
    }
}
