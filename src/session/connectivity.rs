//! Connectivity monitor state and its two render contracts.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::HealthReport;
use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Checking,
    Online,
    Offline,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Online => "online",
            Self::Offline => "offline",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConnectivityState {
    pub phase: Phase,
    pub document_count: u64,
}

/// Result of one health probe, numbered by the poller that issued it.
/// `epoch` identifies that poller; `seq` orders its probes.
#[derive(Debug)]
pub struct ProbeReport {
    pub epoch: u64,
    pub seq: u64,
    pub outcome: Result<HealthReport>,
}

/// Compact status shown at all times once the first probe has resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub online: bool,
    pub label: String,
}

/// Full-screen blocker shown while offline, when the caller asks for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfflineOverlay {
    pub title: &'static str,
    pub message: &'static str,
    pub action: &'static str,
}

pub const OFFLINE_OVERLAY: OfflineOverlay = OfflineOverlay {
    title: "Backend Offline",
    message: "The neural ranking engine is currently unreachable. Start the ranking service to resume searching.",
    action: "Retry Connection",
};

#[derive(Debug)]
pub struct ConnectivityMonitor {
    state: ConnectivityState,
    active: bool,
    epoch: u64,
    last_seq: Option<u64>,
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectivityMonitor {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ConnectivityState {
                phase: Phase::Checking,
                document_count: 0,
            },
            active: true,
            epoch: 0,
            last_seq: None,
        }
    }

    /// Start over for a new poller: back to checking, accepting only
    /// reports tagged with `epoch`.
    pub fn activate(&mut self, epoch: u64) {
        *self = Self::new();
        self.epoch = epoch;
        debug!(epoch, "connectivity monitor activated");
    }

    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    #[must_use]
    pub const fn state(&self) -> ConnectivityState {
        self.state
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub const fn document_count(&self) -> u64 {
        self.state.document_count
    }

    /// Number of the most recently accepted probe.
    #[must_use]
    pub const fn last_seq(&self) -> Option<u64> {
        self.last_seq
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Stop accepting probe results; anything still in flight is ignored.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Apply one probe. Returns whether the report was accepted.
    ///
    /// Each probe decides the phase on its own: one failure after a success
    /// goes straight to offline. Failures keep the last known document count.
    pub fn apply(&mut self, report: ProbeReport) -> bool {
        if !self.active {
            debug!(seq = report.seq, "probe after deactivation ignored");
            return false;
        }
        if report.epoch != self.epoch {
            debug!(epoch = report.epoch, current = self.epoch, "probe from retired poller ignored");
            return false;
        }
        if self.last_seq.is_some_and(|last| report.seq <= last) {
            debug!(seq = report.seq, "stale probe ignored");
            return false;
        }
        self.last_seq = Some(report.seq);

        let previous = self.state.phase;
        match report.outcome {
            Ok(health) if health.is_ok() => {
                self.state.phase = Phase::Online;
                if let Some(count) = health.document_count {
                    self.state.document_count = count;
                }
            }
            Ok(health) => {
                warn!(status = %health.status, "health probe reported unexpected status");
                self.state.phase = Phase::Offline;
            }
            Err(err) => {
                debug!(error = %err, "health probe failed");
                self.state.phase = Phase::Offline;
            }
        }

        if previous != self.state.phase {
            info!(
                from = previous.as_str(),
                to = self.state.phase.as_str(),
                documents = self.state.document_count,
                "connectivity changed"
            );
        }
        true
    }

    /// Nothing is shown until the first probe resolves.
    #[must_use]
    pub fn indicator(&self) -> Option<Indicator> {
        match self.state.phase {
            Phase::Checking => None,
            Phase::Online => Some(Indicator {
                online: true,
                label: format!("Engine Ready ({} Docs)", self.state.document_count),
            }),
            Phase::Offline => Some(Indicator {
                online: false,
                label: "Engine Disconnected".to_string(),
            }),
        }
    }

    #[must_use]
    pub const fn overlay(&self, requested: bool) -> Option<OfflineOverlay> {
        if requested && matches!(self.state.phase, Phase::Offline) {
            Some(OFFLINE_OVERLAY)
        } else {
            None
        }
    }
}
