// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::time::Duration;

use crate::{DEFAULT_STORE_TIMEOUT_MS, LedgerConfig};

#[test]
fn test_default_config() {
    let config: LedgerConfig = LedgerConfig::default();
    assert_eq!(config.store_timeout_ms, DEFAULT_STORE_TIMEOUT_MS);
    assert!(config.capture_policy_snapshots);
    assert_eq!(config.store_timeout(), Duration::from_secs(2));
}

#[test]
fn test_partial_config_keeps_defaults() {
    let config: LedgerConfig = serde_json::from_str(r#"{"store_timeout_ms": 50}"#).unwrap();
    assert_eq!(config.store_timeout(), Duration::from_millis(50));
    assert!(config.capture_policy_snapshots);
}

#[test]
fn test_empty_config_is_default() {
    let config: LedgerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(config, LedgerConfig::default());
}
