pub mod countdown;
pub mod new_subscriber;
pub mod subscriber_email;
