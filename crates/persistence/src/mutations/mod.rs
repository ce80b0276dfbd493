// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `audit`: Audit event persistence
//! - `employees`: Employee registration and policy group assignment
//! - `ledger`: Leave applications and ledger sequences
//! - `policy_groups`: Policy groups and their records
//! - `transition`: Atomic persistence of ledger transitions

pub mod audit;
pub mod employees;
pub mod ledger;
pub mod policy_groups;
pub mod transition;

pub use employees::{assign_policy_group, upsert_employee};
pub use policy_groups::{insert_policy_group, replace_policy_group, set_policy_group_active};
pub use transition::{PersistTransitionResult, persist_transition};
