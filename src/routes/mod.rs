mod countdown;
mod health_check;
mod landing;
mod register;
mod subscriptions;

pub use countdown::get_countdown;
pub use health_check::health_check;
pub use landing::{landing_page, submit_landing_form};
pub use register::handle_register;
pub use subscriptions::handle_create_subscription;
