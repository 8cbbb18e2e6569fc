//! Injectable time source.
//!
//! Validation and the minimum-date affordance depend on "today"; routing that
//! through a trait lets tests pin the calendar instead of racing midnight.

use chrono::{DateTime, Local, NaiveDate};

/// Source of the current wall-clock time.
pub trait Clock {
    /// Current local date and time.
    fn now(&self) -> DateTime<Local>;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date_naive()
    }
}

/// Real system clock. The default outside of tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    /// Pin the clock to midnight on the given date.
    pub fn on(date: NaiveDate) -> Self {
        let midnight = date.and_hms_opt(0, 0, 0).expect("midnight is valid");
        Self(
            midnight
                .and_local_timezone(Local)
                .earliest()
                .expect("midnight resolves in local tz"),
        )
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
