// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Inclusive calendar date ranges and calendar-year clipping.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use time::macros::format_description;
use time::{Date, Month};

/// An inclusive range of whole calendar days.
///
/// Both endpoints belong to the range, so a range whose endpoints are equal
/// covers exactly one day. `to_date >= from_date` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLeaveRange")]
pub struct LeaveRange {
    #[serde(with = "iso_date")]
    from_date: Date,
    #[serde(with = "iso_date")]
    to_date: Date,
}

#[derive(Deserialize)]
struct RawLeaveRange {
    #[serde(with = "iso_date")]
    from_date: Date,
    #[serde(with = "iso_date")]
    to_date: Date,
}

impl TryFrom<RawLeaveRange> for LeaveRange {
    type Error = DomainError;

    fn try_from(raw: RawLeaveRange) -> Result<Self, Self::Error> {
        Self::new(raw.from_date, raw.to_date)
    }
}

impl LeaveRange {
    /// Creates a new inclusive range.
    ///
    /// # Arguments
    ///
    /// * `from_date` - The first day of leave
    /// * `to_date` - The last day of leave
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `to_date` precedes `from_date`.
    pub fn new(from_date: Date, to_date: Date) -> Result<Self, DomainError> {
        if to_date < from_date {
            return Err(DomainError::InvalidDateRange { from_date, to_date });
        }
        Ok(Self { from_date, to_date })
    }

    /// Returns the first day of the range.
    #[must_use]
    pub const fn from_date(&self) -> Date {
        self.from_date
    }

    /// Returns the last day of the range.
    #[must_use]
    pub const fn to_date(&self) -> Date {
        self.to_date
    }

    /// Returns the number of calendar days covered, counting both endpoints.
    #[must_use]
    pub fn day_count(&self) -> u32 {
        inclusive_days(self.from_date, self.to_date)
    }

    /// Returns true if the range touches more than one calendar year.
    #[must_use]
    pub fn spans_years(&self) -> bool {
        self.from_date.year() != self.to_date.year()
    }

    /// Returns the calendar years the range touches.
    #[must_use]
    pub fn years(&self) -> RangeInclusive<i32> {
        self.from_date.year()..=self.to_date.year()
    }

    /// Returns true if the range includes the given year.
    #[must_use]
    pub fn touches_year(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    /// Returns how many days of the range fall inside the given calendar year.
    ///
    /// The range is clipped to `[Jan 1, Dec 31]` of `year`, inclusive on
    /// both ends. A range that does not reach the year contributes zero.
    #[must_use]
    pub fn overlap_days_in_year(&self, year: i32) -> u32 {
        let Ok((year_start, year_end)) = year_bounds(year) else {
            return 0;
        };

        let start: Date = self.from_date.max(year_start);
        let end: Date = self.to_date.min(year_end);

        if start > end {
            0
        } else {
            inclusive_days(start, end)
        }
    }

    /// Returns true if the two ranges share at least one day.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.from_date <= other.to_date && other.from_date <= self.to_date
    }
}

impl std::fmt::Display for LeaveRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.from_date, self.to_date)
    }
}

/// Returns the first and last day of a calendar year.
///
/// # Errors
///
/// Returns an error if the year is outside the supported calendar range.
pub fn year_bounds(year: i32) -> Result<(Date, Date), DomainError> {
    let start: Date = Date::from_calendar_date(year, Month::January, 1).map_err(|e| {
        DomainError::DateArithmeticOverflow {
            operation: format!("computing start of year {year}: {e}"),
        }
    })?;
    let end: Date = Date::from_calendar_date(year, Month::December, 31).map_err(|e| {
        DomainError::DateArithmeticOverflow {
            operation: format!("computing end of year {year}: {e}"),
        }
    })?;
    Ok((start, end))
}

/// Returns the signed number of days from `earlier` to `later`.
///
/// Positive when `later` is after `earlier`.
#[must_use]
pub fn days_between(earlier: Date, later: Date) -> i64 {
    (later - earlier).whole_days()
}

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_iso_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

fn inclusive_days(start: Date, end: Date) -> u32 {
    let days: i64 = days_between(start, end) + 1;
    u32::try_from(days).unwrap_or(0)
}

/// Serde adapter storing dates as `YYYY-MM-DD` strings.
pub mod iso_date {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::Date;
    use time::macros::format_description;

    /// Serializes a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the date cannot be formatted.
    pub fn serialize<S: Serializer>(date: &Date, serializer: S) -> Result<S::Ok, S::Error> {
        let formatted: String = date
            .format(format_description!("[year]-[month]-[day]"))
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&formatted)
    }

    /// Deserializes a `YYYY-MM-DD` string into a date.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Date, D::Error> {
        let raw: String = String::deserialize(deserializer)?;
        super::parse_iso_date(&raw).map_err(serde::de::Error::custom)
    }
}
