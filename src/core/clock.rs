//! Cycle clock: converts an absolute instant into the cycle anchor date
//! and elapsed seconds since the scheduled start, always in the
//! organizational timezone.

use crate::config::Config;
use crate::errors::AppResult;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Where an instant falls inside its attendance cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CyclePoint {
    /// Calendar date in the organizational timezone; the uniqueness key
    /// for the week's attendance record.
    pub cycle_date: NaiveDate,
    /// Whole seconds since the scheduled start on `cycle_date`.
    /// Negative before the scheduled start ("not yet late").
    pub elapsed_secs: i64,
}

pub struct CycleClock {
    offset: FixedOffset,
    start: NaiveTime,
}

impl CycleClock {
    pub fn new(offset: FixedOffset, start: NaiveTime) -> Self {
        Self { offset, start }
    }

    pub fn from_config(cfg: &Config) -> AppResult<Self> {
        Ok(Self::new(cfg.org_offset()?, cfg.scheduled_start()?))
    }

    /// Evaluate `now` against the cycle schedule.
    ///
    /// The fee tiers are defined in organizational wall-clock terms, so
    /// everything here goes through `self.offset`; the server-local
    /// timezone must never leak into this computation.
    pub fn evaluate(&self, now: DateTime<Utc>) -> CyclePoint {
        let local = now.with_timezone(&self.offset);
        let cycle_date = local.date_naive();
        let scheduled = cycle_date.and_time(self.start);

        let elapsed_secs = local
            .naive_local()
            .signed_duration_since(scheduled)
            .num_seconds();

        CyclePoint {
            cycle_date,
            elapsed_secs,
        }
    }
}
