use actix_web::{http::header::LOCATION, web, HttpResponse};

use crate::startup::RegistrationUrl;

/// The landing page links here with `target="_blank"`, so the event page
/// opens in a new browsing context.
#[tracing::instrument(name = "Register for the launch event", skip(registration_url))]
pub async fn handle_register(registration_url: web::Data<RegistrationUrl>) -> HttpResponse {
    tracing::info!("Redirecting visitor to {}", registration_url.0);

    HttpResponse::SeeOther()
        .insert_header((LOCATION, registration_url.0.as_str()))
        .finish()
}
