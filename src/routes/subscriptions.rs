use actix_web::{http::StatusCode, web, HttpResponse, ResponseError};

use crate::{
    domain::new_subscriber::NewSubscriberBody,
    store::Store,
    subscription::{subscribe, SubscribeError},
};

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

#[tracing::instrument(
    name = "Creating a new subscriber handler",
    skip(body, store),
    fields(
        subscriber_email = %body.email,
    )
)]
pub async fn handle_create_subscription(
    body: web::Json<NewSubscriberBody>,
    store: web::Data<Store>,
) -> Result<HttpResponse, SubscribeError> {
    subscribe(store.get_ref(), &body.email).await?;

    Ok(HttpResponse::Created().finish())
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::Validation(_) => StatusCode::BAD_REQUEST,
            SubscribeError::AlreadySubscribed => StatusCode::CONFLICT,
            SubscribeError::Failed(_) => StatusCode::INTERNAL_SERVER_ERROR,
            SubscribeError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
