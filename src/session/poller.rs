//! Scoped periodic health probe.
//!
//! The poller fires one probe immediately, then one per interval, until its
//! handle is cancelled or dropped. A manual retry triggers one extra probe
//! right away. Probes run one at a time, so their sequence numbers arrive in
//! order.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Notify, mpsc};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, trace};

use super::SessionEvent;
use super::connectivity::ProbeReport;
use crate::api::RankingService;
use crate::error::IrError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub probe_timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10),
            probe_timeout: Duration::from_secs(3),
        }
    }
}

/// Owner of the probe task. Dropping the handle cancels the task.
pub struct HealthPoller {
    handle: JoinHandle<()>,
    retry: Arc<Notify>,
    cancelled: Arc<AtomicBool>,
}

impl HealthPoller {
    pub fn spawn<S: RankingService>(
        service: Arc<S>,
        settings: PollSettings,
        epoch: u64,
        tx: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        let retry = Arc::new(Notify::new());
        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(poll_loop(
            service,
            settings,
            epoch,
            tx,
            Arc::clone(&retry),
            Arc::clone(&cancelled),
        ));
        debug!(epoch, interval = ?settings.interval, "health poller started");
        Self {
            handle,
            retry,
            cancelled,
        }
    }

    /// Probe once, now, without disturbing the interval.
    pub fn retry_now(&self) {
        self.retry.notify_one();
    }

    /// Stop probing. No new probe starts after this returns; a report already
    /// on its way may still be delivered, tagged with this poller's epoch.
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            self.handle.abort();
            debug!("health poller cancelled");
        }
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for HealthPoller {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn poll_loop<S: RankingService>(
    service: Arc<S>,
    settings: PollSettings,
    epoch: u64,
    tx: mpsc::UnboundedSender<SessionEvent>,
    retry: Arc<Notify>,
    cancelled: Arc<AtomicBool>,
) {
    let mut ticker = tokio::time::interval(settings.interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut seq = 0u64;

    loop {
        tokio::select! {
            _ = ticker.tick() => trace!("scheduled health probe"),
            () = retry.notified() => trace!("manual health probe"),
        }
        if cancelled.load(Ordering::Acquire) {
            break;
        }

        seq += 1;
        let outcome = match tokio::time::timeout(settings.probe_timeout, service.health()).await {
            Ok(result) => result,
            Err(_) => Err(IrError::Timeout(format!(
                "health probe exceeded {}ms",
                settings.probe_timeout.as_millis()
            ))),
        };

        if cancelled.load(Ordering::Acquire) {
            break;
        }
        if tx
            .send(SessionEvent::Probe(ProbeReport {
                epoch,
                seq,
                outcome,
            }))
            .is_err()
        {
            break;
        }
    }
}
