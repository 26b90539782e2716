use chrono::{DateTime, Utc};
use std::time;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::countdown::{AfterLaunch, CountdownDisplay};

const TICK_PERIOD: time::Duration = time::Duration::from_secs(1);

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Keeps a [`CountdownDisplay`] up to date once per second.
///
/// The ticker task lives exactly as long as the view: dropping the view
/// aborts it.
pub struct CountdownView {
    display: watch::Receiver<CountdownDisplay>,
    ticker: JoinHandle<()>,
}

impl CountdownView {
    /// Must be called from within a tokio runtime. The first refresh happens
    /// right away.
    pub fn start<C: Clock>(target: DateTime<Utc>, after_launch: AfterLaunch, clock: C) -> Self {
        let (sender, display) = watch::channel(CountdownDisplay::default());
        let ticker = tokio::spawn(tick(target, after_launch, clock, sender));

        tracing::info!(%target, ?after_launch, "Countdown started");

        CountdownView { display, ticker }
    }

    pub fn snapshot(&self) -> CountdownDisplay {
        *self.display.borrow()
    }
}

impl Drop for CountdownView {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

async fn tick<C: Clock>(
    target: DateTime<Utc>,
    after_launch: AfterLaunch,
    clock: C,
    sender: watch::Sender<CountdownDisplay>,
) {
    let mut interval = tokio::time::interval(TICK_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        sender.send_modify(|display| display.refresh(target, clock.now(), after_launch));
    }
}
