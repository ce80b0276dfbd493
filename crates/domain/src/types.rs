// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifies an employee in the external employee directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId {
    value: String,
}

impl EmployeeId {
    /// Creates a new `EmployeeId`.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Arguments
    ///
    /// * `value` - The directory identifier
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Stable identifier of a leave type inside a policy group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveTypeId {
    value: String,
}

impl LeaveTypeId {
    /// Creates a new `LeaveTypeId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The identifier value
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for LeaveTypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// Display name of a leave type.
///
/// Leave applications carry a denormalized copy of this name rather than the
/// policy record id, so lookups from an application into a policy group go
/// through the name. Comparison is case-insensitive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaveTypeName {
    value: String,
}

impl LeaveTypeName {
    /// Creates a new `LeaveTypeName`.
    ///
    /// # Arguments
    ///
    /// * `value` - The display name
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_string(),
        }
    }

    /// Returns the display name.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the normalized form used for comparison and storage keys.
    #[must_use]
    pub fn normalized(&self) -> String {
        self.value.to_lowercase()
    }
}

impl PartialEq for LeaveTypeName {
    fn eq(&self, other: &Self) -> bool {
        self.normalized() == other.normalized()
    }
}

impl Eq for LeaveTypeName {}

impl std::hash::Hash for LeaveTypeName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.normalized().hash(state);
    }
}

impl std::fmt::Display for LeaveTypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value)
    }
}

/// An employee as seen by the leave engine.
///
/// Only the fields the engine needs from the employee directory are kept.
/// The policy group is a weak reference: an id that may be absent or may
/// point at a group that no longer governs anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// The directory identifier.
    pub employee_id: EmployeeId,
    /// The human-facing employee code.
    pub employee_code: String,
    /// Display name.
    pub display_name: String,
    /// The assigned policy group, if any.
    pub policy_group_id: Option<i64>,
}

impl Employee {
    /// Creates a new `Employee` with no policy group assigned.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The directory identifier
    /// * `employee_code` - The human-facing employee code
    /// * `display_name` - Display name
    #[must_use]
    pub const fn new(employee_id: EmployeeId, employee_code: String, display_name: String) -> Self {
        Self {
            employee_id,
            employee_code,
            display_name,
            policy_group_id: None,
        }
    }

    /// Returns a copy of this employee assigned to the given policy group.
    #[must_use]
    pub fn with_policy_group(mut self, policy_group_id: Option<i64>) -> Self {
        self.policy_group_id = policy_group_id;
        self
    }

    /// Validates the employee's identifying fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the employee id or display name is empty.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.employee_id.value().is_empty() {
            return Err(DomainError::InvalidEmployee(String::from(
                "employee id cannot be empty",
            )));
        }
        if self.display_name.trim().is_empty() {
            return Err(DomainError::InvalidEmployee(String::from(
                "display name cannot be empty",
            )));
        }
        Ok(())
    }
}
