//! Simulated clock for deterministic time-gate tests.

use std::sync::Mutex;

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeDelta, Utc};
use mockable::Clock;

/// A [`Clock`] frozen at a settable instant.
///
/// Each instance owns its state, so parallel test scenarios never share a
/// clock.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    /// Freeze the clock at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// Jump the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    /// Advance the clock by `delta`.
    pub fn advance(&self, delta: TimeDelta) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// UTC instant at `date` and the given wall-clock time.
///
/// # Panics
///
/// Panics on an invalid time of day; intended for literal test inputs.
pub fn instant(date: NaiveDate, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
    let time = match NaiveTime::from_hms_opt(hour, minute, second) {
        Some(time) => time,
        None => panic!("invalid test time {hour}:{minute}:{second}"),
    };
    DateTime::from_naive_utc_and_offset(date.and_time(time), Utc)
}
