// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the leave ledger.
//!
//! This crate stores policy groups, employees, leave applications and the
//! audit trail in `SQLite` through Diesel.
//!
//! ## Consistency Model
//!
//! Every employee has one ledger per leave type. Each ledger carries a
//! sequence that counts accepted transitions. A transition is computed by
//! the core crate against a ledger loaded at sequence `n` and may only be
//! persisted while the stored ledger is still at `n`. The check and all
//! writes happen inside one immediate transaction, so two writers racing
//! on the same ledger cannot both succeed.
//!
//! ## Testing Philosophy
//!
//! - Tests run against isolated shared-cache in-memory databases
//! - Each `new_in_memory()` call receives its own database
//! - File-backed databases run in WAL mode

#![deny(
    clippy::pedantic,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

use diesel::SqliteConnection;
use leave_ledger::{LedgerState, TransitionResult};
use leave_ledger_audit::AuditEvent;
use leave_ledger_domain::{
    Employee, EmployeeId, LeaveApplication, LeaveTypeName, PolicyGroup,
};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use backend::MIGRATIONS;
pub use error::PersistenceError;
pub use mutations::PersistTransitionResult;

/// Persistence adapter for the leave ledger.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::initialize_database(&shared_memory_url)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::initialize_database(path_str)?;
        backend::enable_wal_mode(&mut conn)?;
        backend::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Policy Groups
    // ========================================================================

    /// Creates a policy group and its records.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::UniqueViolation` if the name is taken.
    pub fn create_policy_group(&mut self, group: &PolicyGroup) -> Result<i64, PersistenceError> {
        mutations::insert_policy_group(&mut self.conn, group)
    }

    /// Replaces a policy group in place.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PolicyGroupNotFound` if the group does not
    /// exist.
    pub fn update_policy_group(
        &mut self,
        policy_group_id: i64,
        group: &PolicyGroup,
    ) -> Result<(), PersistenceError> {
        mutations::replace_policy_group(&mut self.conn, policy_group_id, group)
    }

    /// Activates or deactivates a policy group.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PolicyGroupNotFound` if the group does not
    /// exist.
    pub fn set_policy_group_active(
        &mut self,
        policy_group_id: i64,
        is_active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::set_policy_group_active(&mut self.conn, policy_group_id, is_active)
    }

    /// Loads a policy group.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PolicyGroupNotFound` if the group does not
    /// exist.
    pub fn get_policy_group(&mut self, policy_group_id: i64) -> Result<PolicyGroup, PersistenceError> {
        queries::get_policy_group(&mut self.conn, policy_group_id)
    }

    /// Lists every policy group.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_policy_groups(&mut self) -> Result<Vec<PolicyGroup>, PersistenceError> {
        queries::list_policy_groups(&mut self.conn)
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Registers an employee, or updates an existing profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the referenced policy group does not exist.
    pub fn upsert_employee(&mut self, employee: &Employee) -> Result<(), PersistenceError> {
        mutations::upsert_employee(&mut self.conn, employee)
    }

    /// Loads a registered employee.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if the employee is not
    /// registered.
    pub fn get_employee(&mut self, employee_id: &EmployeeId) -> Result<Employee, PersistenceError> {
        queries::get_employee(&mut self.conn, employee_id)
    }

    /// Lists employees assigned to a policy group.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_employees_in_group(
        &mut self,
        policy_group_id: i64,
    ) -> Result<Vec<Employee>, PersistenceError> {
        queries::list_employees_in_group(&mut self.conn, policy_group_id)
    }

    /// Assigns an employee to a policy group, or clears the assignment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EmployeeNotFound` if the employee is not
    /// registered.
    pub fn assign_policy_group(
        &mut self,
        employee_id: &EmployeeId,
        policy_group_id: Option<i64>,
    ) -> Result<(), PersistenceError> {
        mutations::assign_policy_group(&mut self.conn, employee_id, policy_group_id)
    }

    // ========================================================================
    // Ledgers
    // ========================================================================

    /// Loads an employee's ledger for one leave type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn load_ledger(
        &mut self,
        employee_id: &EmployeeId,
        leave_type: &LeaveTypeName,
    ) -> Result<LedgerState, PersistenceError> {
        queries::load_ledger(&mut self.conn, employee_id, leave_type)
    }

    /// Persists a transition computed by the core crate.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConcurrentModification` if the ledger was
    /// advanced after it was loaded.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    /// Loads a single leave application.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ApplicationNotFound` if it does not exist.
    pub fn get_application(
        &mut self,
        application_id: i64,
    ) -> Result<LeaveApplication, PersistenceError> {
        queries::get_application(&mut self.conn, application_id)
    }

    /// Lists an employee's applications, optionally for one leave type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_applications(
        &mut self,
        employee_id: &EmployeeId,
        leave_type: Option<&LeaveTypeName>,
    ) -> Result<Vec<LeaveApplication>, PersistenceError> {
        queries::list_applications(&mut self.conn, employee_id, leave_type)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Retrieves an employee's audit trail, optionally for one leave type.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_events(
        &mut self,
        employee_id: &EmployeeId,
        leave_type: Option<&LeaveTypeName>,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::get_audit_events(&mut self.conn, employee_id, leave_type)
    }
}
