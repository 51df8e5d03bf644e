//! Expiry reaper for OTP records
//!
//! Periodically purges records past their expiry so the store does not
//! accumulate dead challenges. The verifier never relies on it: an expired
//! record is rejected whether or not it has been reaped yet.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::clock::Clock;
use crate::errors::DomainResult;
use crate::repositories::OtpRepository;
use crate::services::bounded::store_call;

/// Background sweeper deleting expired OTP records
pub struct OtpReaper {
    repository: Arc<dyn OtpRepository>,
    clock: Arc<dyn Clock>,
    interval: Duration,
    operation_timeout: Duration,
}

impl OtpReaper {
    pub fn new(
        repository: Arc<dyn OtpRepository>,
        clock: Arc<dyn Clock>,
        interval: Duration,
        operation_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            clock,
            interval,
            operation_timeout,
        }
    }

    /// Run a single sweep
    ///
    /// Each expired record is deleted independently; a failed deletion is
    /// logged and counted, and the sweep moves on.
    ///
    /// # Returns
    /// * `Ok(ReapReport)` - Summary of the sweep
    /// * `Err(DomainError)` - The expired records could not be listed
    pub async fn run_once(&self) -> DomainResult<ReapReport> {
        let now = self.clock.now();
        let expired = store_call(
            self.operation_timeout,
            "find_expired",
            self.repository.find_expired(now),
        )
        .await?;

        let mut report = ReapReport {
            found: expired.len(),
            ..Default::default()
        };

        for record in expired {
            match store_call(self.operation_timeout, "delete", self.repository.delete(record.id)).await {
                Ok(true) => report.deleted += 1,
                // Verified, replaced or reaped elsewhere since the listing
                Ok(false) => report.already_gone += 1,
                Err(e) => {
                    warn!(otp_id = %record.id, error = %e, "Failed to delete expired OTP");
                    report.failed += 1;
                }
            }
        }

        if report.found > 0 {
            info!(
                found = report.found,
                deleted = report.deleted,
                already_gone = report.already_gone,
                failed = report.failed,
                event = "otp_reaped",
                "Expired OTP sweep completed"
            );
        } else {
            debug!("Expired OTP sweep found nothing");
        }

        Ok(report)
    }

    /// Spawn the sweep loop; it runs until `token` is cancelled
    pub fn start(self: Arc<Self>, token: CancellationToken) -> ReaperHandle {
        let child = token.clone();
        let handle = tokio::spawn(async move {
            info!(
                interval_seconds = self.interval.as_secs(),
                "OTP reaper started"
            );

            let mut ticker = tokio::time::interval(self.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = child.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = self.run_once().await {
                            error!(error = %e, "OTP reaper sweep failed");
                        }
                    }
                }
            }

            info!("OTP reaper stopped");
        });

        ReaperHandle { token, handle }
    }
}

/// Owned handle to a running reaper
pub struct ReaperHandle {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ReaperHandle {
    /// Whether the task is still running
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }

    /// Cancel the loop and wait for it to exit
    pub async fn shutdown(self) {
        self.token.cancel();
        if let Err(e) = self.handle.await {
            error!(error = %e, "OTP reaper task ended abnormally");
        }
    }
}

/// Result of a sweep
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReapReport {
    /// Expired records found
    pub found: usize,
    /// Records deleted by this sweep
    pub deleted: usize,
    /// Records already removed by the time the sweep reached them
    pub already_gone: usize,
    /// Deletions that failed
    pub failed: usize,
}

impl ReapReport {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
