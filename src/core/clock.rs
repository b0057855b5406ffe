use chrono::{DateTime, Local, NaiveDate, Utc};
use chrono_tz::Tz;
use std::sync::{Mutex, PoisonError};

/// Source of "now" and of the calendar date used for daily cache invalidation.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Today's calendar date in the clock's timezone.
    fn today(&self) -> NaiveDate;
}

/// Wall clock. Dates are taken in the process-local timezone unless a fixed zone is given.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock {
    tz: Option<Tz>,
}

impl SystemClock {
    /// Dates follow the machine's local timezone.
    #[must_use]
    pub const fn local() -> Self {
        Self { tz: None }
    }

    /// Dates follow `tz` regardless of the machine's timezone.
    #[must_use]
    pub const fn in_timezone(tz: Tz) -> Self {
        Self { tz: Some(tz) }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        match self.tz {
            Some(tz) => Utc::now().with_timezone(&tz).date_naive(),
            None => Local::now().date_naive(),
        }
    }
}

/// A settable clock for tests and replays. Dates are UTC dates of the held instant.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock to `now`.
    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    /// Move the clock forward by `by`.
    pub fn advance(&self, by: chrono::Duration) {
        let mut guard = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}
