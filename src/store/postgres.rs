use sqlx::PgPool;

use crate::domain::new_subscriber::NewSubscriber;
use crate::store::{StoreError, SubscriberStore, UNIQUE_VIOLATION};

#[derive(Clone)]
pub struct PgSubscriberStore {
    db_pool: PgPool,
}

impl PgSubscriberStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

impl SubscriberStore for PgSubscriberStore {
    #[tracing::instrument(
        name = "Insert a new subscriber into the database",
        skip(self, new_subscriber),
        fields(subscriber_email = %new_subscriber.email)
    )]
    async fn insert(&self, new_subscriber: &NewSubscriber) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO subscribers (email, subscribed_at)
            VALUES ($1, $2)
            "#,
        )
        .bind(new_subscriber.email.as_ref())
        .bind(new_subscriber.subscribed_at)
        .execute(&self.db_pool)
        .await
        .map_err(classify)?;

        Ok(())
    }
}

fn classify(err: sqlx::Error) -> StoreError {
    let is_unique_violation = err
        .as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code == UNIQUE_VIOLATION)
        .unwrap_or(false);

    if is_unique_violation {
        return StoreError::Conflict;
    }

    tracing::error!("Failed to execute query: {:?}", err);
    StoreError::Database(err)
}
