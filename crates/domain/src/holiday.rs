// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::Date;

/// The set of public holidays used by the prefix/suffix adjacency rules.
///
/// The engine does not own holiday data; callers supply it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayCalendar {
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates an empty calendar.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            holidays: BTreeSet::new(),
        }
    }

    /// Adds a holiday.
    pub fn insert(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Returns true if the date is a holiday.
    #[must_use]
    pub fn is_holiday(&self, date: Date) -> bool {
        self.holidays.contains(&date)
    }

    /// Returns true if the calendar has no holidays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl FromIterator<Date> for HolidayCalendar {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self {
            holidays: iter.into_iter().collect(),
        }
    }
}
