//! Headless view models for the landing page sections.

pub mod countdown;
pub mod register;
pub mod subscribe;

pub use countdown::{Clock, CountdownView, SystemClock};
pub use register::RegisterView;
pub use subscribe::{SubmitOutcome, SubscribeView, SubscriptionAttempt};
