// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit`: Audit trail queries
//! - `employees`: Employee lookups
//! - `ledger`: Ledger reconstruction and application lookups
//! - `policy_groups`: Policy group lookups

pub mod audit;
pub mod employees;
pub mod ledger;
pub mod policy_groups;

pub use audit::get_audit_events;
pub use employees::{get_employee, list_employees_in_group};
pub use ledger::{get_application, list_applications, load_ledger};
pub use policy_groups::{get_policy_group, list_policy_groups};
