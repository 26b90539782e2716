//! Remote subscriber stores.
//!
//! The landing page only ever inserts rows, so a store exposes a single
//! operation. Two backends are available:
//!
//! - **rest** - a hosted PostgREST-style table (`POST /rest/v1/{table}`)
//! - **postgres** - a direct connection to the database behind it
//!
//! Both report a uniqueness violation on `email` as [`StoreError::Conflict`].

use std::future::Future;

use sqlx::postgres::PgPoolOptions;

use crate::config::{Settings, StoreBackend};
use crate::domain::new_subscriber::NewSubscriber;

pub mod postgres;
pub mod rest;

pub use postgres::PgSubscriberStore;
pub use rest::RestSubscriberStore;

/// Postgres error code for `unique_violation`.
pub const UNIQUE_VIOLATION: &str = "23505";

pub trait SubscriberStore: Send + Sync + 'static {
    fn insert(
        &self,
        new_subscriber: &NewSubscriber,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("The email is already present in the store.")]
    Conflict,
    #[error("The store rejected the insert with status {status} ({message}).")]
    Rejected {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("Failed to reach the store.")]
    Unreachable(#[from] reqwest::Error),
    #[error("Failed to execute the insert query.")]
    Database(#[source] sqlx::Error),
}

/// The store selected by configuration.
#[derive(Clone)]
pub enum Store {
    Rest(RestSubscriberStore),
    Postgres(PgSubscriberStore),
}

impl Store {
    pub fn from_settings(settings: &Settings) -> Result<Self, reqwest::Error> {
        match settings.store.backend {
            StoreBackend::Rest => Ok(Store::Rest(RestSubscriberStore::new(
                settings.get_store_base_url(),
                settings.store.table.clone(),
                settings.get_store_api_key(),
                settings.store.get_timeout(),
            )?)),
            StoreBackend::Postgres => {
                let db_pool = PgPoolOptions::new()
                    .acquire_timeout(std::time::Duration::from_secs(2))
                    .connect_lazy_with(settings.get_db_options());

                Ok(Store::Postgres(PgSubscriberStore::new(db_pool)))
            }
        }
    }
}

impl SubscriberStore for Store {
    async fn insert(&self, new_subscriber: &NewSubscriber) -> Result<(), StoreError> {
        match self {
            Store::Rest(store) => store.insert(new_subscriber).await,
            Store::Postgres(store) => store.insert(new_subscriber).await,
        }
    }
}
