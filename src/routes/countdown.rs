use actix_web::{web, HttpResponse};

use crate::views::CountdownView;

#[tracing::instrument(name = "Countdown handler", skip(countdown))]
pub async fn get_countdown(countdown: web::Data<CountdownView>) -> HttpResponse {
    HttpResponse::Ok().json(countdown.snapshot())
}
