//! Wall clock
//!
//! Workflow dates (registration, expiry, issue) are civil dates in Philippine time.

use jiff::{
    Timestamp,
    civil::Date,
    tz::{self, TimeZone},
};

/// Source of "now" and "today".
#[derive(Debug, Clone)]
pub struct Clock {
    zone: TimeZone,
    pinned: Option<Timestamp>,
}

impl Clock {
    /// The system clock in UTC+08:00.
    #[must_use]
    pub fn system() -> Self {
        Self {
            zone: TimeZone::fixed(tz::offset(8)),
            pinned: None,
        }
    }

    /// A clock stopped at `at`.
    #[must_use]
    pub fn pinned(at: Timestamp) -> Self {
        Self {
            pinned: Some(at),
            ..Self::system()
        }
    }

    #[must_use]
    pub fn now(&self) -> Timestamp {
        self.pinned.unwrap_or_else(Timestamp::now)
    }

    #[must_use]
    pub fn today(&self) -> Date {
        self.date_of(self.now())
    }

    /// Local calendar date of `at`.
    #[must_use]
    pub fn date_of(&self, at: Timestamp) -> Date {
        at.to_zoned(self.zone.clone()).date()
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn today_is_in_philippine_time() -> TestResult {
        let clock = Clock::pinned("2026-12-31T17:30:00Z".parse()?);

        assert_eq!(clock.today(), date(2027, 1, 1));

        Ok(())
    }
}
