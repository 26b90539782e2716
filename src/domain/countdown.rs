use chrono::{DateTime, Utc};

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Whole days, hours, minutes and seconds left before the launch instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

/// What the countdown shows once the launch instant has passed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AfterLaunch {
    /// Keep the last value computed before launch.
    #[default]
    Freeze,
    /// Show all zeros.
    Zero,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct CountdownDisplay {
    #[serde(flatten)]
    pub countdown: Countdown,
    pub launched: bool,
}

impl Countdown {
    /// Returns `None` once `now` has reached `target`.
    pub fn remaining(target: DateTime<Utc>, now: DateTime<Utc>) -> Option<Countdown> {
        let diff = (target - now).num_milliseconds();

        if diff <= 0 {
            return None;
        }

        // diff is strictly positive here, the casts cannot lose the sign.
        Some(Countdown {
            days: (diff / MILLIS_PER_DAY) as u64,
            hours: ((diff / MILLIS_PER_HOUR) % 24) as u64,
            minutes: ((diff / MILLIS_PER_MINUTE) % 60) as u64,
            seconds: ((diff / MILLIS_PER_SECOND) % 60) as u64,
        })
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * 86_400 + self.hours * 3_600 + self.minutes * 60 + self.seconds
    }
}

impl CountdownDisplay {
    pub fn refresh(
        &mut self,
        target: DateTime<Utc>,
        now: DateTime<Utc>,
        after_launch: AfterLaunch,
    ) {
        match Countdown::remaining(target, now) {
            Some(countdown) => {
                self.countdown = countdown;
                self.launched = false;
            }
            None => {
                if after_launch == AfterLaunch::Zero {
                    self.countdown = Countdown::default();
                }
                self.launched = true;
            }
        }
    }
}
