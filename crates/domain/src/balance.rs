// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Balance calculation.
//!
//! Balances are never stored. They are derived on demand from a policy
//! record and the employee's application history for one leave type.
//!
//! Rules:
//! - Only `Approved` applications consume balance
//! - A cross-year application contributes only its in-year days to each year
//! - The forwarded amount is the previous year's `remaining`, clamped to
//!   `[0, cap]`
//! - Years before the first approved application of the type are untouched
//! - `remaining` may be negative; admissibility is decided elsewhere

use crate::application::LeaveApplication;
use crate::day_count::DayCount;
use crate::policy::PolicyRecord;
use crate::types::LeaveTypeName;
use serde::{Deserialize, Serialize};

/// Derived balance for one employee, leave type and calendar year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    /// The leave type the balance is for.
    pub leave_type_name: LeaveTypeName,
    /// The reference calendar year.
    pub year: i32,
    /// Entitlement for the year, including any forwarded days.
    pub allowed: DayCount,
    /// The part of `allowed` carried from the previous year.
    pub forwarded: DayCount,
    /// Approved days falling in the year.
    pub used: DayCount,
    /// `allowed - used`. May be negative.
    pub remaining: DayCount,
}

impl Balance {
    /// Returns this balance with `days` more consumed.
    ///
    /// Used to show the projected balance after an accepted request.
    #[must_use]
    pub fn after_consuming(&self, days: DayCount) -> Self {
        Self {
            used: self.used + days,
            remaining: self.remaining - days,
            ..self.clone()
        }
    }

    /// Returns true if more days are used than allowed.
    #[must_use]
    pub const fn is_overdrawn(&self) -> bool {
        self.remaining.is_negative()
    }
}

/// Computes the balance for a leave type in a reference year.
///
/// `applications` is the employee's history; entries of other leave types
/// and entries that are not `Approved` are ignored. If an approved
/// application touching the year carries a policy snapshot, the snapshot of
/// the earliest-created one governs the year instead of `policy`.
///
/// # Arguments
///
/// * `policy` - The live policy record for the leave type
/// * `year` - The reference calendar year
/// * `applications` - The employee's application history
#[must_use]
pub fn compute_balance(
    policy: &PolicyRecord,
    year: i32,
    applications: &[LeaveApplication],
) -> Balance {
    let governing: &PolicyRecord = policy_for_year(policy, year, applications);
    let used: DayCount = used_in_year(&governing.leave_type_name, year, applications);
    let forwarded: DayCount = forwarded_into(policy, year, applications);
    let allowed: DayCount = DayCount::from_days(governing.allowed_balance) + forwarded;

    Balance {
        leave_type_name: policy.leave_type_name.clone(),
        year,
        allowed,
        forwarded,
        used,
        remaining: allowed - used,
    }
}

/// Returns the policy record governing a year.
///
/// This is the snapshot carried by the earliest-created approved
/// application touching the year, or `live` when no such snapshot exists.
#[must_use]
pub fn policy_for_year<'a>(
    live: &'a PolicyRecord,
    year: i32,
    applications: &'a [LeaveApplication],
) -> &'a PolicyRecord {
    applications
        .iter()
        .filter(|application| {
            application.is_approved()
                && application.leave_type == live.leave_type_name
                && application.range.touches_year(year)
        })
        .filter_map(|application| {
            application
                .policy_snapshot
                .as_ref()
                .map(|snapshot| (application.created_at, snapshot.policy()))
        })
        .min_by_key(|(created_at, _)| *created_at)
        .map_or(live, |(_, snapshot)| snapshot)
}

/// Sums approved days of a leave type falling in a year.
#[must_use]
pub fn used_in_year(
    leave_type: &LeaveTypeName,
    year: i32,
    applications: &[LeaveApplication],
) -> DayCount {
    approved_of_type(leave_type, applications)
        .map(|application| application.days_in_year(year))
        .sum()
}

/// Sums approved days of a leave type over all years.
#[must_use]
pub fn used_over_service(leave_type: &LeaveTypeName, applications: &[LeaveApplication]) -> DayCount {
    approved_of_type(leave_type, applications)
        .map(LeaveApplication::requested_days)
        .sum()
}

/// Returns how many days of a balance may be encashed.
///
/// A negative balance encashes nothing; otherwise the remaining days are
/// capped at the policy's encashment limit.
#[must_use]
pub fn encashable_days(balance: &Balance, policy: &PolicyRecord) -> DayCount {
    if balance.remaining.is_negative() {
        return DayCount::ZERO;
    }
    let cap: DayCount = DayCount::from_days(policy.max_encashable_balance);
    balance.remaining.min(cap)
}

fn approved_of_type<'a>(
    leave_type: &'a LeaveTypeName,
    applications: &'a [LeaveApplication],
) -> impl Iterator<Item = &'a LeaveApplication> + 'a {
    applications
        .iter()
        .filter(move |application| application.is_approved() && &application.leave_type == leave_type)
}

/// Unused days carried from `year - 1`.
///
/// This is exactly the `remaining` that [`compute_balance`] reports for the
/// previous year, clamped to `[0, cap]` of the policy governing `year`. The
/// chain is walked forward from the first year touched by an approved
/// application; every earlier year is untouched and governed by `live`.
fn forwarded_into(live: &PolicyRecord, year: i32, applications: &[LeaveApplication]) -> DayCount {
    let untouched_remaining: DayCount =
        DayCount::from_days(live.allowed_balance) + untouched_carry(live);

    let Some((first, last)) = approved_years(&live.leave_type_name, applications) else {
        return carry(live, untouched_remaining);
    };
    if year <= first {
        return carry(policy_for_year(live, year, applications), untouched_remaining);
    }

    let mut forwarded: DayCount =
        carry(policy_for_year(live, first, applications), untouched_remaining);
    for current in first..year {
        let governing: &PolicyRecord = policy_for_year(live, current, applications);
        let remaining: DayCount = DayCount::from_days(governing.allowed_balance) + forwarded
            - used_in_year(&governing.leave_type_name, current, applications);
        let next: DayCount = carry(policy_for_year(live, current + 1, applications), remaining);

        // Past the last approved year nothing changes once the carry settles.
        if current > last && next == forwarded {
            return next;
        }
        forwarded = next;
    }
    forwarded
}

/// Clamps a previous year's remaining days to what `governing` lets through.
fn carry(governing: &PolicyRecord, previous_remaining: DayCount) -> DayCount {
    if !governing.balance_forwarding {
        return DayCount::ZERO;
    }
    let cap: DayCount = DayCount::from_days(governing.max_forward_from_previous_year);
    previous_remaining.max(DayCount::ZERO).min(cap)
}

/// Carry into a year whose whole past is untouched.
///
/// An untouched year keeps its full entitlement, so the carry settles at the
/// cap unless there is no entitlement to carry.
fn untouched_carry(live: &PolicyRecord) -> DayCount {
    if live.balance_forwarding && live.allowed_balance > 0 {
        DayCount::from_days(live.max_forward_from_previous_year)
    } else {
        DayCount::ZERO
    }
}

/// First and last calendar years touched by approved applications of a type.
fn approved_years(leave_type: &LeaveTypeName, applications: &[LeaveApplication]) -> Option<(i32, i32)> {
    approved_of_type(leave_type, applications).fold(None, |years, application| {
        let from: i32 = application.range.from_date().year();
        let to: i32 = application.range.to_date().year();
        Some(years.map_or((from, to), |(first, last): (i32, i32)| {
            (first.min(from), last.max(to))
        }))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::application::LeaveRequest;
    use crate::date_range::LeaveRange;
    use crate::leave_status::LeaveStatus;
    use crate::policy::PolicySnapshot;
    use crate::types::EmployeeId;
    use time::macros::{date, datetime};
    use time::{Date, OffsetDateTime};

    fn make_policy(allowed: u32) -> PolicyRecord {
        PolicyRecord::new("CL", "Casual Leave", allowed)
    }

    fn make_application(from: Date, to: Date, status: LeaveStatus) -> LeaveApplication {
        let request: LeaveRequest = LeaveRequest::new(
            EmployeeId::new("E-1"),
            LeaveTypeName::new("Casual Leave"),
            from,
            to,
        );
        let mut application: LeaveApplication = LeaveApplication::submit(
            &request,
            LeaveRange::new(from, to).unwrap(),
            "E-1",
            datetime!(2025-01-01 0:00 UTC),
        );
        application.status = status;
        application
    }

    #[test]
    fn test_empty_history_leaves_full_entitlement() {
        let balance: Balance = compute_balance(&make_policy(12), 2026, &[]);
        assert_eq!(balance.allowed, DayCount::from_days(12));
        assert_eq!(balance.used, DayCount::ZERO);
        assert_eq!(balance.remaining, DayCount::from_days(12));
        assert_eq!(balance.forwarded, DayCount::ZERO);
    }

    #[test]
    fn test_only_approved_applications_are_used() {
        let history: Vec<LeaveApplication> = vec![
            make_application(date!(2026 - 03 - 02), date!(2026 - 03 - 03), LeaveStatus::Approved),
            make_application(date!(2026 - 04 - 06), date!(2026 - 04 - 08), LeaveStatus::Pending),
            make_application(date!(2026 - 05 - 04), date!(2026 - 05 - 08), LeaveStatus::Rejected),
        ];

        let balance: Balance = compute_balance(&make_policy(12), 2026, &history);
        assert_eq!(balance.used, DayCount::from_days(2));
        assert_eq!(balance.remaining, DayCount::from_days(10));
    }

    #[test]
    fn test_other_leave_types_are_ignored() {
        let mut sick: LeaveApplication =
            make_application(date!(2026 - 03 - 02), date!(2026 - 03 - 06), LeaveStatus::Approved);
        sick.leave_type = LeaveTypeName::new("Sick Leave");

        let balance: Balance = compute_balance(&make_policy(12), 2026, &[sick]);
        assert_eq!(balance.used, DayCount::ZERO);
    }

    #[test]
    fn test_remaining_is_not_clipped_at_zero() {
        let history: Vec<LeaveApplication> = vec![make_application(
            date!(2026 - 03 - 02),
            date!(2026 - 03 - 06),
            LeaveStatus::Approved,
        )];

        let balance: Balance = compute_balance(&make_policy(3), 2026, &history);
        assert_eq!(balance.remaining, DayCount::from_half_days(-4));
        assert!(balance.is_overdrawn());
    }

    #[test]
    fn test_forwarding_takes_previous_remaining_up_to_cap() {
        let mut policy: PolicyRecord = make_policy(10);
        policy.balance_forwarding = true;
        policy.max_forward_from_previous_year = 3;

        let history: Vec<LeaveApplication> = vec![make_application(
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 02),
            LeaveStatus::Approved,
        )];

        let balance: Balance = compute_balance(&policy, 2026, &history);
        assert_eq!(balance.forwarded, DayCount::from_days(3));
        assert_eq!(balance.allowed, DayCount::from_days(13));
    }

    #[test]
    fn test_overdrawn_previous_year_forwards_nothing() {
        let mut policy: PolicyRecord = make_policy(2);
        policy.balance_forwarding = true;
        policy.max_forward_from_previous_year = 1;

        let history: Vec<LeaveApplication> = vec![make_application(
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 04),
            LeaveStatus::Approved,
        )];

        let balance: Balance = compute_balance(&policy, 2026, &history);
        assert_eq!(balance.forwarded, DayCount::ZERO);
    }

    #[test]
    fn test_forwarded_days_match_previous_reported_remaining() {
        let mut policy: PolicyRecord = make_policy(10);
        policy.balance_forwarding = true;
        policy.max_forward_from_previous_year = 3;

        let history: Vec<LeaveApplication> = vec![make_application(
            date!(2025 - 03 - 02),
            date!(2025 - 03 - 10),
            LeaveStatus::Approved,
        )];

        let previous: Balance = compute_balance(&policy, 2025, &history);
        assert_eq!(previous.forwarded, DayCount::from_days(3));
        assert_eq!(previous.remaining, DayCount::from_days(4));

        let current: Balance = compute_balance(&policy, 2026, &history);
        assert_eq!(current.forwarded, DayCount::from_days(3));
        assert_eq!(current.remaining, DayCount::from_days(13));
    }

    #[test]
    fn test_small_remaining_is_forwarded_whole() {
        let mut policy: PolicyRecord = make_policy(10);
        policy.balance_forwarding = true;
        policy.max_forward_from_previous_year = 5;

        // 2025 allows 15 with the carry from the untouched 2024; 13 are used.
        let history: Vec<LeaveApplication> = vec![make_application(
            date!(2025 - 03 - 01),
            date!(2025 - 03 - 13),
            LeaveStatus::Approved,
        )];

        assert_eq!(compute_balance(&policy, 2025, &history).remaining, DayCount::from_days(2));
        assert_eq!(compute_balance(&policy, 2026, &history).forwarded, DayCount::from_days(2));
    }

    #[test]
    fn test_carry_settles_after_last_approved_year() {
        let mut policy: PolicyRecord = make_policy(1);
        policy.balance_forwarding = true;
        policy.max_forward_from_previous_year = 4;

        let history: Vec<LeaveApplication> = vec![make_application(
            date!(2025 - 06 - 01),
            date!(2025 - 06 - 05),
            LeaveStatus::Approved,
        )];

        // 2025 ends at 1 + 4 - 5 = 0, then each untouched year adds one day.
        assert_eq!(compute_balance(&policy, 2026, &history).forwarded, DayCount::ZERO);
        assert_eq!(compute_balance(&policy, 2027, &history).forwarded, DayCount::from_days(1));
        assert_eq!(compute_balance(&policy, 2029, &history).forwarded, DayCount::from_days(3));
        assert_eq!(compute_balance(&policy, 9999, &history).forwarded, DayCount::from_days(4));
    }

    #[test]
    fn test_snapshot_governs_its_year() {
        let live: PolicyRecord = make_policy(20);
        let mut approved: LeaveApplication =
            make_application(date!(2026 - 02 - 02), date!(2026 - 02 - 03), LeaveStatus::Approved);
        approved.policy_snapshot = Some(PolicySnapshot::capture(&make_policy(12)));

        let balance: Balance = compute_balance(&live, 2026, std::slice::from_ref(&approved));
        assert_eq!(balance.allowed, DayCount::from_days(12));

        let next_year: Balance = compute_balance(&live, 2027, &[approved]);
        assert_eq!(next_year.allowed, DayCount::from_days(20));
    }

    #[test]
    fn test_earliest_snapshot_wins() {
        let mut first: LeaveApplication =
            make_application(date!(2026 - 02 - 02), date!(2026 - 02 - 02), LeaveStatus::Approved);
        first.policy_snapshot = Some(PolicySnapshot::capture(&make_policy(8)));

        let mut second: LeaveApplication =
            make_application(date!(2026 - 03 - 02), date!(2026 - 03 - 02), LeaveStatus::Approved);
        second.policy_snapshot = Some(PolicySnapshot::capture(&make_policy(15)));
        let later: OffsetDateTime = datetime!(2026-02-15 0:00 UTC);
        second.created_at = later;

        let history: Vec<LeaveApplication> = vec![second, first];
        let live: PolicyRecord = make_policy(20);
        let governing: &PolicyRecord = policy_for_year(&live, 2026, &history);
        assert_eq!(governing.allowed_balance, 8);
    }

    #[test]
    fn test_encashable_days_are_capped_and_never_negative() {
        let mut policy: PolicyRecord = make_policy(10);
        policy.max_encashable_balance = 4;

        let full: Balance = compute_balance(&policy, 2026, &[]);
        assert_eq!(encashable_days(&full, &policy), DayCount::from_days(4));

        let overdrawn: Balance = full.after_consuming(DayCount::from_days(12));
        assert_eq!(encashable_days(&overdrawn, &policy), DayCount::ZERO);

        let small: Balance = full.after_consuming(DayCount::from_days(8));
        assert_eq!(encashable_days(&small, &policy), DayCount::from_days(2));
    }

    #[test]
    fn test_service_usage_spans_years() {
        let history: Vec<LeaveApplication> = vec![
            make_application(date!(2024 - 05 - 01), date!(2024 - 05 - 03), LeaveStatus::Approved),
            make_application(date!(2025 - 12 - 30), date!(2026 - 01 - 02), LeaveStatus::Approved),
            make_application(date!(2026 - 05 - 01), date!(2026 - 05 - 03), LeaveStatus::Rejected),
        ];
        assert_eq!(
            used_over_service(&LeaveTypeName::new("casual leave"), &history),
            DayCount::from_days(7)
        );
    }
}
