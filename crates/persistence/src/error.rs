// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::result::DatabaseErrorKind;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// A uniqueness constraint was violated.
    UniqueViolation(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// A stored row could not be turned back into a domain value.
    ReconstructionError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// The requested policy group was not found.
    PolicyGroupNotFound(i64),
    /// The requested employee was not found.
    EmployeeNotFound(String),
    /// The requested leave application was not found.
    ApplicationNotFound(i64),
    /// The ledger changed between read and write.
    ConcurrentModification {
        /// The employee whose ledger changed.
        employee_id: String,
        /// The leave type whose ledger changed.
        leave_type: String,
        /// The sequence the writer read.
        expected: i64,
        /// The sequence found at write time.
        actual: i64,
    },
    /// A status update found the application no longer in the expected status.
    StaleApplicationStatus {
        /// The application being decided.
        application_id: i64,
        /// The status the writer expected.
        expected: String,
    },
    /// The requested resource was not found.
    NotFound(String),
}

impl PersistenceError {
    /// Returns true if retrying against a fresh read may succeed.
    #[must_use]
    pub const fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ConcurrentModification { .. } | Self::StaleApplicationStatus { .. }
        )
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::UniqueViolation(msg) => write!(f, "Unique constraint violated: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::ReconstructionError(msg) => write!(f, "Reconstruction error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::PolicyGroupNotFound(id) => write!(f, "Policy group not found: {id}"),
            Self::EmployeeNotFound(id) => write!(f, "Employee not found: {id}"),
            Self::ApplicationNotFound(id) => write!(f, "Leave application not found: {id}"),
            Self::ConcurrentModification {
                employee_id,
                leave_type,
                expected,
                actual,
            } => write!(
                f,
                "Ledger for employee '{employee_id}' and leave type '{leave_type}' was modified concurrently (expected sequence {expected}, found {actual})"
            ),
            Self::StaleApplicationStatus {
                application_id,
                expected,
            } => write!(
                f,
                "Leave application {application_id} is no longer {expected}"
            ),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            diesel::result::Error::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
