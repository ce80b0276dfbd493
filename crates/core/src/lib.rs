// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The leave application workflow.
//!
//! Each employee has one ledger per leave type. A ledger changes only
//! through [`apply`], which validates a [`Command`] against the resolved
//! policy and returns the new ledger together with the single write the
//! store must perform and exactly one audit event. Nothing here performs
//! I/O.

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

mod apply;
mod command;
mod error;
mod policy;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{ApplyContext, apply};
pub use command::Command;
pub use error::CoreError;
pub use policy::{ConfigurationIssue, PolicyResolution, resolve_policy};
pub use state::{LedgerChange, LedgerState, TransitionResult};
