// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Runtime configuration for the ledger service.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default bound on waiting for the store, in milliseconds.
pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 2000;

/// Settings for [`crate::LeaveLedgerService`] and the handlers.
///
/// Every field has a default, so a partial document deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// How long a request may wait for the store before failing closed.
    pub store_timeout_ms: u64,
    /// Whether submitted applications carry a copy of their policy record.
    pub capture_policy_snapshots: bool,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: DEFAULT_STORE_TIMEOUT_MS,
            capture_policy_snapshots: true,
        }
    }
}

impl LedgerConfig {
    /// Returns the store timeout as a duration.
    #[must_use]
    pub const fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}
