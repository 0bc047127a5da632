//! Application shell: routes between pages and owns the event loop that
//! feeds the controllers.
//!
//! The shell keeps no business state. It holds the single connectivity
//! monitor (shared by the compact indicator and the offline overlay), its
//! poller, and the search page controller, and routes every completion to
//! the one that owns it.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

pub mod router;

pub use router::Page;

use crate::api::RankingService;
use crate::session::{
    self, ConnectivityMonitor, EventQueue, HealthPoller, Home, Indicator, OfflineOverlay,
    SessionEvent, SessionSettings,
};

pub struct Shell<S> {
    page: Page,
    home: Home<S>,
    monitor: ConnectivityMonitor,
    poller: Option<HealthPoller>,
    probe_epoch: u64,
    dispatcher: session::Dispatcher<S>,
    events: EventQueue,
    settings: SessionSettings,
    search_focus: bool,
}

impl<S: RankingService> Shell<S> {
    pub fn new(service: Arc<S>, settings: SessionSettings) -> Self {
        let (dispatcher, events) = session::channel(service);
        let home = Home::new(dispatcher.clone(), settings);
        Self {
            page: Page::Search,
            home,
            monitor: ConnectivityMonitor::new(),
            poller: None,
            probe_epoch: 0,
            dispatcher,
            events,
            settings,
            search_focus: false,
        }
    }

    /// Start the connectivity poller and the search page's initial fetches.
    /// Each mount starts the monitor over in the checking phase.
    pub fn mount(&mut self) {
        if self.poller.is_none() {
            self.probe_epoch += 1;
            self.monitor.activate(self.probe_epoch);
            self.poller = Some(
                self.dispatcher
                    .spawn_poller(self.settings.poll, self.probe_epoch),
            );
        }
        self.home.mount();
    }

    /// Cancel the poller. Probe results still queued are ignored.
    pub fn unmount(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.cancel();
        }
        self.monitor.deactivate();
    }

    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    pub fn navigate(&mut self, page: Page) {
        if page != self.page {
            debug!(from = self.page.path(), to = page.path(), "navigate");
        }
        self.page = page;
        if page != Page::Search {
            self.search_focus = false;
        }
    }

    /// "Start Search": go to the search page and focus the query input.
    pub fn start_search(&mut self) {
        self.navigate(Page::Search);
        self.search_focus = true;
    }

    #[must_use]
    pub const fn search_focused(&self) -> bool {
        self.search_focus
    }

    pub fn set_search_focus(&mut self, focused: bool) {
        self.search_focus = focused;
    }

    #[must_use]
    pub const fn home(&self) -> &Home<S> {
        &self.home
    }

    pub fn home_mut(&mut self) -> &mut Home<S> {
        &mut self.home
    }

    #[must_use]
    pub const fn monitor(&self) -> &ConnectivityMonitor {
        &self.monitor
    }

    #[must_use]
    pub fn indicator(&self) -> Option<Indicator> {
        self.monitor.indicator()
    }

    #[must_use]
    pub const fn offline_overlay(&self) -> Option<OfflineOverlay> {
        self.monitor.overlay(true)
    }

    /// The overlay's retry action: one immediate probe.
    pub fn retry_connection(&self) {
        if let Some(poller) = &self.poller {
            poller.retry_now();
        }
    }

    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Probe(report) => {
                self.monitor.apply(report);
            }
            other => {
                let _ = self.home.handle(other);
            }
        }
    }

    /// Apply every completion that is already waiting. Returns how many were
    /// applied.
    pub fn pump(&mut self) -> usize {
        let mut applied = 0;
        while let Some(event) = self.events.try_next() {
            self.handle(event);
            applied += 1;
        }
        applied
    }

    /// Wait up to `timeout` for one completion and apply it.
    pub async fn step(&mut self, timeout: Duration) -> bool {
        match self.events.next_within(timeout).await {
            Some(event) => {
                self.handle(event);
                true
            }
            None => false,
        }
    }
}

impl<S> Drop for Shell<S> {
    fn drop(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.cancel();
        }
    }
}
