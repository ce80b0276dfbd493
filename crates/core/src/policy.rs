// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resolution of the policy record governing a ledger.
//!
//! A missing or unusable policy is a configuration problem, not a reason to
//! refuse leave. The ledger degrades to ungoverned operation and the caller
//! is expected to log the [`ConfigurationIssue`].

use leave_ledger_domain::{LeaveTypeName, PolicyGroup, PolicyRecord};

/// Why a ledger has no governing policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationIssue {
    /// The employee is not assigned to a policy group.
    NoPolicyGroup,
    /// The assigned policy group is inactive.
    InactivePolicyGroup {
        /// The group name.
        group_name: String,
    },
    /// The assigned group has no record for the leave type.
    LeaveTypeNotInGroup {
        /// The group name.
        group_name: String,
        /// The requested leave type.
        leave_type: String,
    },
}

impl std::fmt::Display for ConfigurationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPolicyGroup => write!(f, "employee has no policy group"),
            Self::InactivePolicyGroup { group_name } => {
                write!(f, "policy group '{group_name}' is inactive")
            }
            Self::LeaveTypeNotInGroup {
                group_name,
                leave_type,
            } => write!(
                f,
                "policy group '{group_name}' has no record for leave type '{leave_type}'"
            ),
        }
    }
}

/// The policy governing one employee's ledger for one leave type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyResolution {
    /// A policy record applies and is enforced.
    Governed(PolicyRecord),
    /// No policy applies; only the date range is checked.
    Ungoverned(ConfigurationIssue),
}

impl PolicyResolution {
    /// Returns the governing record, if any.
    #[must_use]
    pub const fn policy(&self) -> Option<&PolicyRecord> {
        match self {
            Self::Governed(policy) => Some(policy),
            Self::Ungoverned(_) => None,
        }
    }

    /// Returns the configuration issue, if the ledger is ungoverned.
    #[must_use]
    pub const fn issue(&self) -> Option<&ConfigurationIssue> {
        match self {
            Self::Governed(_) => None,
            Self::Ungoverned(issue) => Some(issue),
        }
    }
}

/// Resolves the policy record for a leave type from an employee's group.
///
/// # Arguments
///
/// * `group` - The employee's policy group, if assigned
/// * `leave_type` - The leave type of the ledger
#[must_use]
pub fn resolve_policy(group: Option<&PolicyGroup>, leave_type: &LeaveTypeName) -> PolicyResolution {
    let Some(group) = group else {
        return PolicyResolution::Ungoverned(ConfigurationIssue::NoPolicyGroup);
    };

    if !group.is_active {
        return PolicyResolution::Ungoverned(ConfigurationIssue::InactivePolicyGroup {
            group_name: group.group_name.clone(),
        });
    }

    group.policy_for(leave_type).map_or_else(
        || {
            PolicyResolution::Ungoverned(ConfigurationIssue::LeaveTypeNotInGroup {
                group_name: group.group_name.clone(),
                leave_type: leave_type.value().to_string(),
            })
        },
        |policy| PolicyResolution::Governed(policy.clone()),
    )
}
