//! Client-side session controllers.
//!
//! Every controller here is a plain state machine owned by a single event
//! loop. Network calls are spawned onto the runtime and their completions
//! come back as [`SessionEvent`]s on one channel; only the owner of the
//! [`EventQueue`] mutates state, so there is no locking. Requests carry a
//! ticket (a sequence number, plus the triggering category for subcategory
//! fetches) and controllers discard completions whose ticket is no longer
//! current.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{RankingService, SearchResult};
use crate::config::Config;
use crate::error::Result;

pub mod connectivity;
pub mod filters;
pub mod home;
pub mod pointer;
pub mod poller;
pub mod search;
pub mod select;

pub use connectivity::{ConnectivityMonitor, ConnectivityState, Indicator, OfflineOverlay, Phase, ProbeReport};
pub use filters::{ALL, FilterCascade, FilterSelection, SubcategoryTicket};
pub use home::{Home, SUGGESTIONS};
pub use pointer::{Point, PointerHub, PointerSubscription, Region};
pub use poller::{HealthPoller, PollSettings};
pub use search::{PAGE_SIZE, ResultsView, SEARCH_FAILED_MESSAGE, SearchSession, SearchTicket};
pub use select::{DependentSelect, SelectOption};

/// Immutable settings resolved once at startup and injected into
/// controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub page_size: usize,
    pub poll: PollSettings,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            page_size: PAGE_SIZE,
            poll: PollSettings::default(),
        }
    }
}

impl SessionSettings {
    #[must_use]
    pub const fn from_config(config: &Config) -> Self {
        Self {
            page_size: PAGE_SIZE,
            poll: PollSettings {
                interval: config.health.poll_interval(),
                probe_timeout: config.health.probe_timeout(),
            },
        }
    }
}

/// Completion of a network call, delivered to the event loop.
#[derive(Debug)]
pub enum SessionEvent {
    Probe(ProbeReport),
    Categories(Result<Vec<String>>),
    Subcategories {
        ticket: SubcategoryTicket,
        result: Result<Vec<String>>,
    },
    Search {
        seq: u64,
        result: Result<Vec<SearchResult>>,
    },
}

/// Spawns service calls and routes their completions to the event queue.
pub struct Dispatcher<S> {
    service: Arc<S>,
    tx: mpsc::UnboundedSender<SessionEvent>,
}

impl<S> Clone for Dispatcher<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            tx: self.tx.clone(),
        }
    }
}

impl<S: RankingService> Dispatcher<S> {
    pub fn fetch_categories(&self) {
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.categories().await;
            let _ = tx.send(SessionEvent::Categories(result));
        });
    }

    pub fn fetch_subcategories(&self, ticket: SubcategoryTicket) {
        debug!(seq = ticket.seq, category = %ticket.category, "fetching subcategories");
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.subcategories(&ticket.category).await;
            let _ = tx.send(SessionEvent::Subcategories { ticket, result });
        });
    }

    pub fn search(&self, ticket: SearchTicket) {
        debug!(seq = ticket.seq, query = %ticket.request.query, "dispatching search");
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.search(&ticket.request).await;
            let _ = tx.send(SessionEvent::Search {
                seq: ticket.seq,
                result,
            });
        });
    }

    /// Start the periodic health probe. The returned handle owns the task.
    #[must_use]
    pub fn spawn_poller(&self, settings: PollSettings, epoch: u64) -> HealthPoller {
        HealthPoller::spawn(Arc::clone(&self.service), settings, epoch, self.tx.clone())
    }
}

/// Receiving end of the session channel.
pub struct EventQueue {
    rx: mpsc::UnboundedReceiver<SessionEvent>,
}

impl EventQueue {
    /// Wait for the next completion.
    pub async fn next(&mut self) -> Option<SessionEvent> {
        self.rx.recv().await
    }

    /// Wait up to `timeout` for the next completion.
    pub async fn next_within(&mut self, timeout: Duration) -> Option<SessionEvent> {
        tokio::time::timeout(timeout, self.rx.recv()).await.ok().flatten()
    }

    /// Take a completion if one is ready.
    pub fn try_next(&mut self) -> Option<SessionEvent> {
        self.rx.try_recv().ok()
    }
}

/// Create the dispatcher/queue pair for one event loop.
pub fn channel<S: RankingService>(service: Arc<S>) -> (Dispatcher<S>, EventQueue) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Dispatcher { service, tx }, EventQueue { rx })
}
