//! Injectable local-time clock and session-close arithmetic
//!
//! The engine never reads the OS clock directly; the day-order reaper asks a
//! `Clock` for the current local civil time and computes how long to sleep
//! until shortly after the session close. Tests inject fake clocks.

use chrono::{Duration as ChronoDuration, Local, NaiveDateTime, NaiveTime};
use std::time::Duration;

/// Source of local civil time
pub trait Clock: Send + Sync {
    fn local_now(&self) -> NaiveDateTime;
}

/// Wall clock in the process-local timezone
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn local_now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Session close, local time
const SESSION_CLOSE_HOUR: u32 = 16;

/// Slack past the close target, absorbing clock-resolution races so the
/// sweep always wakes strictly after close.
const CLOSE_WAKE_SLACK: Duration = Duration::from_millis(100);

/// How long to sleep from `now` until the next session close plus slack:
/// today's 16:00 if `now` is strictly before it, tomorrow's otherwise.
pub(crate) fn until_next_close(now: NaiveDateTime) -> Duration {
    let close = NaiveTime::from_hms_opt(SESSION_CLOSE_HOUR, 0, 0).unwrap();
    let mut target = now.date().and_time(close);
    if now.time() >= close {
        target += ChronoDuration::days(1);
    }
    (target - now).to_std().unwrap_or_default() + CLOSE_WAKE_SLACK
}
