//! Calendar features derived from each record's issue date.
//!
//! Every record gains a "Day of the Week" and a "Month" taken from the first
//! ten characters of its issue date. Records whose date cannot be read are
//! handled according to a [`DatePolicy`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Month, NaiveDate, Weekday};
use tracing::{debug, warn};

use crate::error::{ParseError, UnknownDatePolicy};
use crate::record::ViolationRecord;

/// Weekdays in the order charts display them.
pub const WEEKDAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Months in calendar order.
pub const MONTH_ORDER: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Full English weekday name.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// What to do with a record whose issue date cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DatePolicy {
    /// Fail the whole load with the first [`ParseError`].
    #[default]
    Abort,
    /// Drop the record and keep going.
    Skip,
}

impl FromStr for DatePolicy {
    type Err = UnknownDatePolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "abort" => Ok(DatePolicy::Abort),
            "skip" => Ok(DatePolicy::Skip),
            _ => Err(UnknownDatePolicy(s.to_string())),
        }
    }
}

impl fmt::Display for DatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatePolicy::Abort => f.write_str("abort"),
            DatePolicy::Skip => f.write_str("skip"),
        }
    }
}

/// Calendar date, weekday and month of an issue date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarFeatures {
    pub date: NaiveDate,
    pub day_of_week: Weekday,
    pub month: Month,
}

impl CalendarFeatures {
    /// Reads the leading `YYYY-MM-DD` of `issue_date`; anything after it is ignored.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] (with row 0) if the prefix is not a valid date.
    pub fn from_issue_date(issue_date: &str) -> Result<Self, ParseError> {
        let invalid = || ParseError {
            row: 0,
            value: issue_date.to_string(),
        };

        let prefix = issue_date.get(..10).ok_or_else(invalid)?;
        let well_formed = prefix.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
        if !well_formed {
            return Err(invalid());
        }

        let year: i32 = prefix[0..4].parse().map_err(|_| invalid())?;
        let month: u32 = prefix[5..7].parse().map_err(|_| invalid())?;
        let day: u32 = prefix[8..10].parse().map_err(|_| invalid())?;
        let date = NaiveDate::from_ymd_opt(year, month, day)
            .filter(|_| year >= 1)
            .ok_or_else(invalid)?;

        Ok(CalendarFeatures {
            date,
            day_of_week: date.weekday(),
            month: MONTH_ORDER[date.month0() as usize],
        })
    }
}

/// A violation record with its derived calendar features.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentedRecord {
    pub record: ViolationRecord,
    pub features: CalendarFeatures,
}

impl AugmentedRecord {
    /// The "Day of the Week" column.
    pub fn day_of_week(&self) -> &'static str {
        weekday_name(self.features.day_of_week)
    }

    /// The "Month" column.
    pub fn month(&self) -> &'static str {
        self.features.month.name()
    }
}

/// Attaches calendar features to every record, preserving input order.
///
/// # Errors
///
/// Under [`DatePolicy::Abort`], returns the first unparseable issue date with
/// its 1-based row number. Under [`DatePolicy::Skip`] this never fails.
#[tracing::instrument(skip_all, fields(records = records.len(), %policy))]
pub fn derive_features(
    records: Vec<ViolationRecord>,
    policy: DatePolicy,
) -> Result<Vec<AugmentedRecord>, ParseError> {
    let mut augmented = Vec::with_capacity(records.len());
    let mut skipped = 0usize;

    for (i, record) in records.into_iter().enumerate() {
        match CalendarFeatures::from_issue_date(&record.issue_date) {
            Ok(features) => augmented.push(AugmentedRecord { record, features }),
            Err(e) => {
                let e = ParseError { row: i + 1, ..e };
                match policy {
                    DatePolicy::Abort => return Err(e),
                    DatePolicy::Skip => {
                        debug!(
                            row = e.row,
                            value = %e.value,
                            "Dropping record with invalid issue date"
                        );
                        skipped += 1;
                    }
                }
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = augmented.len(), "Records dropped for invalid issue dates");
    }

    Ok(augmented)
}

/// Recomputes the calendar features of already augmented records in place.
///
/// # Errors
///
/// Returns a [`ParseError`] if an issue date was altered into an invalid one.
pub fn rederive(records: &mut [AugmentedRecord]) -> Result<(), ParseError> {
    for (i, r) in records.iter_mut().enumerate() {
        r.features = CalendarFeatures::from_issue_date(&r.record.issue_date)
            .map_err(|e| ParseError { row: i + 1, ..e })?;
    }
    Ok(())
}
