//! Periodic background sync tied to an owner's lifetime.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::services::QuoteService;

/// Default time between automatic syncs.
pub const DEFAULT_SYNC_INTERVAL: Duration = Duration::from_secs(300);

/// Background task that syncs on a fixed interval until cancelled.
///
/// Dropping the scheduler cancels the task; [`SyncScheduler::shutdown`] also
/// waits for it to finish.
pub struct SyncScheduler {
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
    interval: Duration,
}

impl SyncScheduler {
    /// Spawn the periodic sync task on the current runtime.
    ///
    /// The first sync runs one full `interval` after start.
    pub fn start(service: QuoteService, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let token = cancel.clone();

        let handle = tokio::spawn(async move {
            let mut ticks: u64 = 0;
            loop {
                tokio::select! {
                    () = token.cancelled() => break,
                    () = tokio::time::sleep(interval) => {}
                }

                ticks += 1;
                tracing::debug!(
                    "Sync scheduler tick: interval={}s, tick={ticks}",
                    interval.as_secs()
                );

                tokio::select! {
                    () = token.cancelled() => break,
                    // Failures are logged by the service and never stop the schedule.
                    _ = service.sync(None) => {}
                }
            }
            tracing::debug!("Sync scheduler stopped after {ticks} ticks");
        });

        Self {
            cancel,
            handle: Some(handle),
            interval,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancel the task and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(error) = handle.await {
                tracing::warn!("Sync scheduler task ended abnormally: {error}");
            }
        }
    }
}

impl Drop for SyncScheduler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
