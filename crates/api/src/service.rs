// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Async front end for the ledger handlers.
//!
//! The store is shared behind a `tokio` mutex. Waiting for it is bounded by
//! [`LedgerConfig::store_timeout`]; a request that cannot reach the store in
//! time fails closed with [`ApiError::BalanceUnverifiable`] rather than
//! assuming a balance.

use leave_ledger::ApplyContext;
use leave_ledger_audit::Cause;
use leave_ledger_domain::{DayCount, HolidayCalendar};
use leave_ledger_persistence::Persistence;
use std::sync::Arc;
use time::OffsetDateTime;
use tokio::sync::{Mutex, MutexGuard, broadcast};
use tracing::{debug, warn};

use crate::config::LedgerConfig;
use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    DecideLeaveApplicationRequest, DecideLeaveApplicationResponse, GetLeaveBalanceRequest,
    GetLeaveBalanceResponse, SubmitLeaveApplicationRequest, SubmitLeaveApplicationResponse,
};

/// Buffer size for the broadcast notifier channel.
const NOTICE_BUFFER_SIZE: usize = 100;

/// Sent after a leave application has been stored.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubmissionNotice {
    /// The stored application.
    pub application_id: i64,
    /// The employee taking leave.
    pub employee_id: String,
    /// The leave type.
    pub leave_type: String,
    /// First day of leave.
    pub from_date: String,
    /// Last day of leave, inclusive.
    pub to_date: String,
    /// Length in days.
    pub requested_days: DayCount,
}

/// Receives submission notices.
///
/// Called on a spawned task after the submission has been committed. The
/// outcome is never awaited and cannot affect the submission.
pub trait SubmissionNotifier: Send + Sync {
    /// Handles one submission notice.
    fn leave_submitted(&self, notice: &SubmissionNotice);
}

/// A notifier that republishes notices on a broadcast channel.
///
/// If nobody is subscribed the notice is dropped.
#[derive(Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<SubmissionNotice>,
}

impl BroadcastNotifier {
    /// Creates a new notifier.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = broadcast::channel(NOTICE_BUFFER_SIZE);
        Self { tx }
    }

    /// Subscribes to future notices.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SubmissionNotice> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionNotifier for BroadcastNotifier {
    fn leave_submitted(&self, notice: &SubmissionNotice) {
        match self.tx.send(notice.clone()) {
            Ok(count) => {
                debug!(
                    application_id = notice.application_id,
                    receivers = count,
                    "Broadcast submission notice"
                );
            }
            Err(_) => {
                debug!(
                    application_id = notice.application_id,
                    "No receivers for submission notice"
                );
            }
        }
    }
}

/// Shared, async access to the ledger.
#[derive(Clone)]
pub struct LeaveLedgerService {
    persistence: Arc<Mutex<Persistence>>,
    config: LedgerConfig,
    holidays: Arc<HolidayCalendar>,
    notifier: Option<Arc<dyn SubmissionNotifier>>,
}

impl LeaveLedgerService {
    /// Creates a service over a store.
    #[must_use]
    pub fn new(persistence: Persistence, config: LedgerConfig) -> Self {
        Self {
            persistence: Arc::new(Mutex::new(persistence)),
            config,
            holidays: Arc::new(HolidayCalendar::new()),
            notifier: None,
        }
    }

    /// Sets the holidays used by the adjacency rules.
    #[must_use]
    pub fn with_holidays(mut self, holidays: HolidayCalendar) -> Self {
        self.holidays = Arc::new(holidays);
        self
    }

    /// Sets the notifier called after each successful submission.
    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn SubmissionNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// Returns the shared store, for administrative handlers.
    #[must_use]
    pub fn persistence(&self) -> Arc<Mutex<Persistence>> {
        Arc::clone(&self.persistence)
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &LedgerConfig {
        &self.config
    }

    async fn lock_store(&self) -> Result<MutexGuard<'_, Persistence>, ApiError> {
        tokio::time::timeout(self.config.store_timeout(), self.persistence.lock())
            .await
            .map_err(|_| {
                warn!(
                    timeout_ms = self.config.store_timeout_ms,
                    "Store not available in time; failing closed"
                );
                ApiError::balance_unverifiable()
            })
    }

    fn context(&self, now: OffsetDateTime) -> ApplyContext<'_> {
        ApplyContext {
            today: now.date(),
            now,
            holidays: self.holidays.as_ref(),
            capture_snapshot: self.config.capture_policy_snapshots,
        }
    }

    /// Submits a leave application.
    ///
    /// "Today" is the current UTC date. On success the notifier, if any, is
    /// invoked on a spawned task.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BalanceUnverifiable` if the store cannot be
    /// reached in time, or any error of
    /// [`handlers::submit_leave_application`].
    pub async fn submit(
        &self,
        request: SubmitLeaveApplicationRequest,
        cause: Cause,
    ) -> Result<SubmitLeaveApplicationResponse, ApiError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let notice_base: SubmitLeaveApplicationRequest = request.clone();

        let response: SubmitLeaveApplicationResponse = {
            let mut persistence: MutexGuard<'_, Persistence> = self.lock_store().await?;
            handlers::submit_leave_application(
                &mut persistence,
                request,
                &self.context(now),
                cause,
            )?
        };

        if let Some(notifier) = &self.notifier {
            let notifier: Arc<dyn SubmissionNotifier> = Arc::clone(notifier);
            let notice: SubmissionNotice = SubmissionNotice {
                application_id: response.application_id,
                employee_id: notice_base.employee_id,
                leave_type: notice_base.leave_type,
                from_date: notice_base.from_date,
                to_date: notice_base.to_date,
                requested_days: response.requested_days,
            };
            tokio::spawn(async move {
                notifier.leave_submitted(&notice);
            });
        }

        Ok(response)
    }

    /// Approves a pending application.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BalanceUnverifiable` if the store cannot be
    /// reached in time, or any error of
    /// [`handlers::approve_leave_application`].
    pub async fn approve(
        &self,
        request: DecideLeaveApplicationRequest,
        cause: Cause,
    ) -> Result<DecideLeaveApplicationResponse, ApiError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let mut persistence: MutexGuard<'_, Persistence> = self.lock_store().await?;
        handlers::approve_leave_application(&mut persistence, request, &self.context(now), cause)
    }

    /// Rejects a pending application.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BalanceUnverifiable` if the store cannot be
    /// reached in time, or any error of
    /// [`handlers::reject_leave_application`].
    pub async fn reject(
        &self,
        request: DecideLeaveApplicationRequest,
        cause: Cause,
    ) -> Result<DecideLeaveApplicationResponse, ApiError> {
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let mut persistence: MutexGuard<'_, Persistence> = self.lock_store().await?;
        handlers::reject_leave_application(&mut persistence, request, &self.context(now), cause)
    }

    /// Computes a balance.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::BalanceUnverifiable` if the store cannot be
    /// reached in time, or any error of [`handlers::get_leave_balance`].
    pub async fn balance(
        &self,
        request: &GetLeaveBalanceRequest,
    ) -> Result<GetLeaveBalanceResponse, ApiError> {
        let mut persistence: MutexGuard<'_, Persistence> = self.lock_store().await?;
        handlers::get_leave_balance(&mut persistence, request)
    }
}
