// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Exact leave day arithmetic at half-day granularity.
//!
//! Leave is counted in whole calendar days except where a policy allows
//! half-day requests. Counts are stored as a number of half days so that
//! sums and differences never round.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A signed number of leave days with 0.5 granularity.
///
/// Serialized as a JSON number (`7`, `7.5`, `-0.5`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct DayCount {
    half_days: i32,
}

impl DayCount {
    /// Zero days.
    pub const ZERO: Self = Self { half_days: 0 };

    /// Half a day.
    pub const HALF: Self = Self { half_days: 1 };

    /// Creates a count of whole days.
    ///
    /// Saturates at the representable maximum.
    #[must_use]
    pub fn from_days(days: u32) -> Self {
        let whole: i32 = i32::try_from(days).unwrap_or(i32::MAX);
        Self {
            half_days: whole.saturating_mul(2),
        }
    }

    /// Creates a count from a number of half days.
    #[must_use]
    pub const fn from_half_days(half_days: i32) -> Self {
        Self { half_days }
    }

    /// Returns the count as a number of half days.
    #[must_use]
    pub const fn half_days(self) -> i32 {
        self.half_days
    }

    /// Returns true if the count ends in a half day.
    #[must_use]
    pub const fn is_fractional(self) -> bool {
        self.half_days % 2 != 0
    }

    /// Returns true if the count is below zero.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.half_days < 0
    }

    /// Returns the count as a floating point number of days.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.half_days) / 2.0
    }
}

impl Add for DayCount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            half_days: self.half_days.saturating_add(rhs.half_days),
        }
    }
}

impl AddAssign for DayCount {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for DayCount {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            half_days: self.half_days.saturating_sub(rhs.half_days),
        }
    }
}

impl SubAssign for DayCount {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for DayCount {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            half_days: self.half_days.saturating_neg(),
        }
    }
}

impl std::iter::Sum for DayCount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl From<DayCount> for f64 {
    fn from(value: DayCount) -> Self {
        value.as_f64()
    }
}

impl TryFrom<f64> for DayCount {
    type Error = DomainError;

    #[allow(clippy::cast_possible_truncation)]
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        let doubled: f64 = value * 2.0;
        if !doubled.is_finite()
            || doubled.fract() != 0.0
            || doubled > f64::from(i32::MAX)
            || doubled < f64::from(i32::MIN)
        {
            return Err(DomainError::InvalidDayCount {
                value: value.to_string(),
            });
        }
        Ok(Self {
            half_days: doubled as i32,
        })
    }
}

impl std::fmt::Display for DayCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign: &str = if self.half_days < 0 { "-" } else { "" };
        let magnitude: u32 = self.half_days.unsigned_abs();
        let whole: u32 = magnitude / 2;
        if magnitude % 2 == 0 {
            write!(f, "{sign}{whole}")
        } else {
            write!(f, "{sign}{whole}.5")
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_days_display_without_fraction() {
        assert_eq!(DayCount::from_days(7).to_string(), "7");
        assert_eq!(DayCount::ZERO.to_string(), "0");
    }

    #[test]
    fn test_half_days_display_with_fraction() {
        assert_eq!(DayCount::from_half_days(15).to_string(), "7.5");
        assert_eq!(DayCount::from_half_days(-1).to_string(), "-0.5");
        assert_eq!(DayCount::from_half_days(-5).to_string(), "-2.5");
    }

    #[test]
    fn test_arithmetic_is_exact() {
        let total: DayCount = [
            DayCount::HALF,
            DayCount::from_days(2),
            DayCount::HALF,
            DayCount::from_days(1),
        ]
        .into_iter()
        .sum();

        assert_eq!(total, DayCount::from_days(4));
        assert_eq!(DayCount::from_days(3) - DayCount::from_days(5), -DayCount::from_days(2));
    }

    #[test]
    fn test_try_from_accepts_half_steps() {
        let value: DayCount = DayCount::try_from(2.5).unwrap();
        assert_eq!(value.half_days(), 5);
        assert!(value.is_fractional());

        let negative: DayCount = DayCount::try_from(-3.0).unwrap();
        assert!(negative.is_negative());
    }

    #[test]
    fn test_try_from_rejects_quarter_days_and_nan() {
        assert!(DayCount::try_from(0.25).is_err());
        assert!(DayCount::try_from(f64::NAN).is_err());
        assert!(DayCount::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn test_serializes_as_number() {
        let json: String = serde_json::to_string(&DayCount::from_half_days(3)).unwrap();
        assert_eq!(json, "1.5");

        let parsed: DayCount = serde_json::from_str("12").unwrap();
        assert_eq!(parsed, DayCount::from_days(12));
        assert_eq!(f64::from(parsed), 12.0);
    }
}
