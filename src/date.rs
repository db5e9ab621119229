//! Calendar-date criteria over an entry's timestamps.
//!
//! Timestamps are converted to the local time zone and compared by calendar
//! date only; the time of day never takes part.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Local, NaiveDate};

use crate::entry::Entry;
use crate::error::SieveError;
use crate::traits::Matcher;

/// Which timestamp of an entry a date criterion looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateField {
    Created,
    #[default]
    Modified,
    Accessed,
}

impl DateField {
    fn select(self, entry: &Entry) -> Option<SystemTime> {
        match self {
            Self::Created => entry.created,
            Self::Modified => entry.modified,
            Self::Accessed => entry.accessed,
        }
    }
}

/// Convert a timestamp to local time, or `None` when it lies outside the
/// range chrono can represent.
fn to_local(time: SystemTime) -> Option<DateTime<Local>> {
    let (secs, nanos) = match time.duration_since(UNIX_EPOCH) {
        Ok(after) => (i64::try_from(after.as_secs()).ok()?, after.subsec_nanos()),
        Err(err) => {
            let before = err.duration();
            let secs = i64::try_from(before.as_secs()).ok()?.checked_neg()?;
            match before.subsec_nanos() {
                0 => (secs, 0),
                n => (secs.checked_sub(1)?, 1_000_000_000 - n),
            }
        }
    };
    DateTime::from_timestamp(secs, nanos).map(|utc| utc.with_timezone(&Local))
}

fn entry_date(entry: &Entry, field: DateField) -> Option<NaiveDate> {
    field
        .select(entry)
        .and_then(to_local)
        .map(|local| local.date_naive())
}

/// Whether the selected timestamp falls on `date`.
///
/// An entry without that timestamp (e.g. no birth time on the platform)
/// does not match.
pub fn match_by_date(entry: &Entry, date: NaiveDate, field: DateField) -> bool {
    entry_date(entry, field).map_or(false, |d| d == date)
}

/// Whether the selected timestamp falls between `lower` and `upper`,
/// inclusive on both ends.
pub fn match_by_date_range(
    entry: &Entry,
    lower: NaiveDate,
    upper: NaiveDate,
    field: DateField,
) -> bool {
    entry_date(entry, field).map_or(false, |d| lower <= d && d <= upper)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateCriterion {
    pub date: NaiveDate,
    pub field: DateField,
}

impl DateCriterion {
    pub fn new(date: NaiveDate, field: DateField) -> Self {
        Self { date, field }
    }
}

impl Matcher for DateCriterion {
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
        Ok(match_by_date(entry, self.date, self.field))
    }
}

/// An inclusive date range. A range with `lower > upper` matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangeCriterion {
    pub lower: NaiveDate,
    pub upper: NaiveDate,
    pub field: DateField,
}

impl DateRangeCriterion {
    pub fn new(lower: NaiveDate, upper: NaiveDate, field: DateField) -> Self {
        Self { lower, upper, field }
    }
}

impl Matcher for DateRangeCriterion {
    fn matches(&self, entry: &Entry) -> Result<bool, SieveError> {
        Ok(match_by_date_range(entry, self.lower, self.upper, self.field))
    }
}
