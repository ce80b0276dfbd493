// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Leave policy records and policy groups.
//!
//! A policy record is plain data: the numeric and boolean rules for one
//! leave type. A policy group bundles one record per leave type and is
//! assigned to employees. Groups are edited in place, so a change to a
//! record affects every balance computed afterwards unless the affected
//! applications carry a [`PolicySnapshot`].

use crate::error::DomainError;
use crate::types::{LeaveTypeId, LeaveTypeName};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The rule set governing a single leave type.
///
/// All counts are whole days. Optional caps are unlimited when `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyRecord {
    /// Stable identifier of the leave type.
    pub leave_type_id: LeaveTypeId,
    /// Display name; applications reference the policy through it.
    pub leave_type_name: LeaveTypeName,
    /// Days granted per calendar year.
    pub allowed_balance: u32,
    /// Upper bound on days used in any single calendar year.
    pub max_balance_in_year: Option<u32>,
    /// Upper bound on approved days over the whole service life.
    pub max_sanction_over_service: Option<u32>,
    /// Whether unused days carry into the next year.
    pub balance_forwarding: bool,
    /// Cap on days carried from the previous year.
    pub max_forward_from_previous_year: u32,
    /// Whether a single request may span two calendar years.
    pub leave_allow_between_multiple_years: bool,
    /// Minimum gap in days between two requests of this type.
    pub interval_days_in_same_leave: u32,
    /// Whether a request may exceed the remaining balance.
    pub negative_balance: bool,
    /// How many days in the past a request may start.
    pub max_limit_for_past_leave: u32,
    /// Whether the continuous-day cap applies.
    pub continuous_days_allow: bool,
    /// Maximum days a single request may cover when the cap applies.
    pub continuous_sanction: u32,
    /// Whether half-day requests are accepted.
    pub half_day: bool,
    /// Maximum remaining balance that may be encashed.
    pub max_encashable_balance: u32,
    /// Whether leave may end on the day before a holiday.
    pub prefix_allowed: bool,
    /// Whether leave may start on the day after a holiday.
    pub suffix_allowed: bool,
    /// Whether long requests must carry supporting evidence.
    pub does_requires_leave_attachment: bool,
    /// Request length, in days, from which evidence is required.
    pub min_day_count_for_requiring_attachment: u32,
    /// Whether the future-dated lead time rule applies.
    pub allow_earn_leave: bool,
    /// Minimum days between today and the start of a future request.
    pub apply_future_leave_after_days: u32,
}

impl Default for PolicyRecord {
    fn default() -> Self {
        Self {
            leave_type_id: LeaveTypeId::new(""),
            leave_type_name: LeaveTypeName::new(""),
            allowed_balance: 0,
            max_balance_in_year: None,
            max_sanction_over_service: None,
            balance_forwarding: false,
            max_forward_from_previous_year: 0,
            leave_allow_between_multiple_years: true,
            interval_days_in_same_leave: 0,
            negative_balance: false,
            max_limit_for_past_leave: 0,
            continuous_days_allow: false,
            continuous_sanction: 0,
            half_day: false,
            max_encashable_balance: 0,
            prefix_allowed: true,
            suffix_allowed: true,
            does_requires_leave_attachment: false,
            min_day_count_for_requiring_attachment: 0,
            allow_earn_leave: false,
            apply_future_leave_after_days: 0,
        }
    }
}

impl PolicyRecord {
    /// Creates a policy record with the given entitlement and otherwise
    /// default rules.
    ///
    /// # Arguments
    ///
    /// * `leave_type_id` - Stable identifier of the leave type
    /// * `leave_type_name` - Display name of the leave type
    /// * `allowed_balance` - Days granted per calendar year
    #[must_use]
    pub fn new(leave_type_id: &str, leave_type_name: &str, allowed_balance: u32) -> Self {
        Self {
            leave_type_id: LeaveTypeId::new(leave_type_id),
            leave_type_name: LeaveTypeName::new(leave_type_name),
            allowed_balance,
            ..Self::default()
        }
    }

    /// Validates the record's internal consistency.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The leave type id or name is empty
    /// - The continuous-day cap is enabled with a cap of zero days
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.leave_type_id.value().is_empty() {
            return Err(DomainError::InvalidPolicyRecord {
                leave_type_id: String::new(),
                reason: String::from("leave type id cannot be empty"),
            });
        }
        if self.leave_type_name.value().is_empty() {
            return Err(self.invalid("leave type name cannot be empty"));
        }
        if self.continuous_days_allow && self.continuous_sanction == 0 {
            return Err(self.invalid("continuous-day cap is enabled but set to zero days"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> DomainError {
        DomainError::InvalidPolicyRecord {
            leave_type_id: self.leave_type_id.value().to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A tagged, versioned copy of the policy record in force when an
/// application was submitted.
///
/// Balance calculation prefers a snapshot over the live policy group so that
/// later edits to the group do not rewrite historical years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "version", content = "policy")]
pub enum PolicySnapshot {
    /// First snapshot layout: the full policy record.
    #[serde(rename = "1")]
    V1(PolicyRecord),
}

impl PolicySnapshot {
    /// Captures the given record using the current snapshot layout.
    #[must_use]
    pub fn capture(policy: &PolicyRecord) -> Self {
        Self::V1(policy.clone())
    }

    /// Returns the captured policy record.
    #[must_use]
    pub const fn policy(&self) -> &PolicyRecord {
        match self {
            Self::V1(policy) => policy,
        }
    }
}

/// A named bundle of policy records assigned to employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyGroup {
    /// Identifier assigned by the store. `None` until persisted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy_group_id: Option<i64>,
    /// Unique group name.
    pub group_name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Inactive groups govern nothing.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// One record per leave type, in display order.
    pub policies: Vec<PolicyRecord>,
}

const fn default_active() -> bool {
    true
}

impl PolicyGroup {
    /// Creates a new active policy group.
    ///
    /// # Arguments
    ///
    /// * `group_name` - Unique group name
    /// * `description` - Free-text description
    /// * `policies` - One record per leave type
    ///
    /// # Errors
    ///
    /// Returns an error if the group fails [`PolicyGroup::validate`].
    pub fn new(
        group_name: &str,
        description: &str,
        policies: Vec<PolicyRecord>,
    ) -> Result<Self, DomainError> {
        let group: Self = Self {
            policy_group_id: None,
            group_name: group_name.trim().to_string(),
            description: description.to_string(),
            is_active: true,
            policies,
        };
        group.validate()?;
        Ok(group)
    }

    /// Returns a copy of this group carrying the persisted identifier.
    #[must_use]
    pub fn with_id(mut self, policy_group_id: i64) -> Self {
        self.policy_group_id = Some(policy_group_id);
        self
    }

    /// Validates the group.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The group name is empty
    /// - Any record is invalid
    /// - Two records share a leave type id or a leave type name
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.group_name.trim().is_empty() {
            return Err(DomainError::InvalidPolicyGroupName(String::from(
                "group name cannot be empty",
            )));
        }

        let mut seen_ids: HashSet<&LeaveTypeId> = HashSet::new();
        let mut seen_names: HashSet<&LeaveTypeName> = HashSet::new();

        for policy in &self.policies {
            policy.validate()?;

            if !seen_ids.insert(&policy.leave_type_id) {
                return Err(DomainError::DuplicateLeaveType {
                    group_name: self.group_name.clone(),
                    leave_type_id: policy.leave_type_id.value().to_string(),
                });
            }
            if !seen_names.insert(&policy.leave_type_name) {
                return Err(DomainError::DuplicateLeaveType {
                    group_name: self.group_name.clone(),
                    leave_type_id: policy.leave_type_name.value().to_string(),
                });
            }
        }

        Ok(())
    }

    /// Finds the record for a leave type by display name.
    #[must_use]
    pub fn policy_for(&self, leave_type: &LeaveTypeName) -> Option<&PolicyRecord> {
        self.policies
            .iter()
            .find(|policy| &policy.leave_type_name == leave_type)
    }

    /// Finds the record for a leave type by id.
    #[must_use]
    pub fn policy_by_id(&self, leave_type_id: &LeaveTypeId) -> Option<&PolicyRecord> {
        self.policies
            .iter()
            .find(|policy| &policy.leave_type_id == leave_type_id)
    }

    /// Finds the record for a leave type, failing if it is missing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::LeaveTypeNotFound` if the group has no record
    /// with that name.
    pub fn require_policy(&self, leave_type: &LeaveTypeName) -> Result<&PolicyRecord, DomainError> {
        self.policy_for(leave_type)
            .ok_or_else(|| DomainError::LeaveTypeNotFound {
                group_name: self.group_name.clone(),
                leave_type: leave_type.value().to_string(),
            })
    }
}
