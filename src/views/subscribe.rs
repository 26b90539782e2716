use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time;
use tokio::task::JoinHandle;

use crate::domain::new_subscriber::NewSubscriber;
use crate::store::SubscriberStore;
use crate::subscription::insert_subscriber;

/// State of the email form for one page view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionAttempt {
    pub email: String,
    pub submitted: bool,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A submission was already in flight, nothing happened.
    Ignored,
    /// The email failed validation, the store was not called.
    Invalid,
    Subscribed,
    Failed,
}

/// Drives a [`SubscriptionAttempt`] through validation and submission.
///
/// Clones share the same state. When the last clone is dropped any pending
/// revert of the `submitted` flag is cancelled.
pub struct SubscribeView<S> {
    shared: Arc<Shared<S>>,
}

struct Shared<S> {
    store: S,
    revert_after: time::Duration,
    state: Mutex<ViewState>,
}

#[derive(Default)]
struct ViewState {
    attempt: SubscriptionAttempt,
    revert: Option<JoinHandle<()>>,
}

impl ViewState {
    fn cancel_revert(&mut self) {
        if let Some(revert) = self.revert.take() {
            revert.abort();
        }
    }
}

impl Drop for ViewState {
    fn drop(&mut self) {
        self.cancel_revert();
    }
}

impl<S> Clone for SubscribeView<S> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<S: SubscriberStore> SubscribeView<S> {
    pub fn new(store: S, revert_after: time::Duration) -> Self {
        SubscribeView {
            shared: Arc::new(Shared {
                store,
                revert_after,
                state: Mutex::new(ViewState::default()),
            }),
        }
    }

    pub fn attempt(&self) -> SubscriptionAttempt {
        self.shared.state().attempt.clone()
    }

    /// Called on every keystroke.
    pub fn set_email(&self, email: impl Into<String>) {
        let mut state = self.shared.state();
        state.attempt.email = email.into();
        state.attempt.error = None;
    }

    /// Must be called from within a tokio runtime.
    pub async fn submit(&self) -> SubmitOutcome {
        let new_subscriber = {
            let mut state = self.shared.state();

            if state.attempt.loading {
                return SubmitOutcome::Ignored;
            }

            state.attempt.error = None;

            match NewSubscriber::parse(&state.attempt.email, chrono::Utc::now()) {
                Ok(new_subscriber) => {
                    // A new attempt replaces the confirmation, nothing is left to revert.
                    state.attempt.loading = true;
                    state.attempt.submitted = false;
                    state.cancel_revert();
                    new_subscriber
                }
                Err(err) => {
                    state.attempt.error = Some(err.to_string());
                    return SubmitOutcome::Invalid;
                }
            }
        };

        let result = insert_subscriber(&self.shared.store, &new_subscriber).await;

        let mut state = self.shared.state();
        state.attempt.loading = false;

        match result {
            Ok(()) => {
                state.attempt.email.clear();
                state.attempt.submitted = true;
                state.revert = Some(schedule_revert(
                    Arc::downgrade(&self.shared),
                    self.shared.revert_after,
                ));
                SubmitOutcome::Subscribed
            }
            Err(err) => {
                state.attempt.error = Some(err.to_string());
                SubmitOutcome::Failed
            }
        }
    }
}

impl<S> Shared<S> {
    fn state(&self) -> MutexGuard<'_, ViewState> {
        // The state stays consistent even if a holder panicked.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn schedule_revert<S: SubscriberStore>(
    shared: Weak<Shared<S>>,
    revert_after: time::Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(revert_after).await;

        if let Some(shared) = shared.upgrade() {
            let mut state = shared.state();
            state.attempt.submitted = false;
            state.revert = None;
        }
    })
}
