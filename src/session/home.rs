//! Search page controller: the filter cascade and the search session behind
//! one event loop.

use tracing::debug;

use super::filters::FilterCascade;
use super::search::{SearchSession, SearchTicket};
use super::{Dispatcher, SessionEvent, SessionSettings};
use crate::api::RankingService;

/// Shortcut queries offered under the search box.
pub const SUGGESTIONS: [&str; 5] = ["Python", "Cloud", "Backend", "Headphones", "Laptops"];

pub struct Home<S> {
    dispatcher: Dispatcher<S>,
    filters: FilterCascade,
    search: SearchSession,
    mounted: bool,
}

impl<S: RankingService> Home<S> {
    pub fn new(dispatcher: Dispatcher<S>, settings: SessionSettings) -> Self {
        Self {
            dispatcher,
            filters: FilterCascade::new(),
            search: SearchSession::new(settings.page_size),
            mounted: false,
        }
    }

    /// Fetch the category catalog (once) and the subcategories of the
    /// current category. Mounting twice is a no-op.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if self.filters.request_categories() {
            self.dispatcher.fetch_categories();
        }
        let ticket = self.filters.request_subcategories();
        self.dispatcher.fetch_subcategories(ticket);
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterCascade {
        &self.filters
    }

    #[must_use]
    pub const fn search(&self) -> &SearchSession {
        &self.search
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search.set_query(query);
    }

    pub fn query_mut(&mut self) -> &mut String {
        self.search.query_mut()
    }

    pub fn select_category(&mut self, category: impl Into<String>) {
        if let Some(ticket) = self.filters.set_category(category) {
            self.dispatcher.fetch_subcategories(ticket);
        }
    }

    pub fn select_subcategory(&mut self, subcategory: impl Into<String>) {
        self.filters.set_subcategory(subcategory);
    }

    /// Submit the typed query with the filters as they are now. Returns the
    /// dispatched request, if any.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        let ticket = self.search.submit(self.filters.selection())?;
        self.dispatcher.search(ticket.clone());
        Some(ticket)
    }

    /// Put `suggestion` in the search box and search for it right away.
    pub fn choose_suggestion(&mut self, suggestion: &str) -> Option<SearchTicket> {
        self.search.set_query(suggestion);
        self.submit()
    }

    /// Route a completion to its controller. Probe reports are not ours and
    /// are returned unhandled.
    pub fn handle(&mut self, event: SessionEvent) -> Option<SessionEvent> {
        match event {
            SessionEvent::Categories(result) => {
                self.filters.apply_categories(result);
                None
            }
            SessionEvent::Subcategories { ticket, result } => {
                self.filters.apply_subcategories(&ticket, result);
                None
            }
            SessionEvent::Search { seq, result } => {
                self.search.apply(seq, result);
                None
            }
            probe @ SessionEvent::Probe(_) => {
                debug!("probe report reached search page controller");
                Some(probe)
            }
        }
    }
}
