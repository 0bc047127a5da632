//! Search session controller.

use tracing::{debug, warn};

use super::filters::FilterSelection;
use crate::api::{SearchRequest, SearchResult};
use crate::error::{IrError, Result};

/// Results per search. Callers cannot change it.
pub const PAGE_SIZE: usize = 10;

/// Shown inline when a search fails for any reason.
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed. Ensure backend is running.";

/// A dispatched search. `seq` increases with every dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    pub request: SearchRequest,
}

/// What the results area should show.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResultsView<'a> {
    /// Nothing searched yet.
    Idle,
    /// A search is in flight and there is nothing older to keep showing.
    Searching,
    Results {
        results: &'a [SearchResult],
        low_confidence: bool,
    },
    /// The latest search completed with zero matches.
    NoResults,
    Error(&'a str),
}

#[derive(Debug)]
pub struct SearchSession {
    query: String,
    loading: bool,
    error: Option<String>,
    results: Vec<SearchResult>,
    completed: bool,
    page_size: usize,
    next_seq: u64,
    pending: Option<u64>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl SearchSession {
    #[must_use]
    pub const fn new(page_size: usize) -> Self {
        Self {
            query: String::new(),
            loading: false,
            error: None,
            results: Vec::new(),
            completed: false,
            page_size,
            next_seq: 0,
            pending: None,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query_mut(&mut self) -> &mut String {
        &mut self.query
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    /// Derived on every read from the current results.
    #[must_use]
    pub fn has_low_confidence(&self) -> bool {
        self.results.iter().any(|result| result.low_confidence)
    }

    /// Submit the current query text.
    pub fn submit(&mut self, filters: &FilterSelection) -> Option<SearchTicket> {
        let text = self.query.clone();
        self.submit_text(&text, filters)
    }

    /// Submit `text` with the filters as they are right now. Blank text is
    /// ignored without touching any state.
    pub fn submit_text(&mut self, text: &str, filters: &FilterSelection) -> Option<SearchTicket> {
        if text.trim().is_empty() {
            debug!("ignoring blank search");
            return None;
        }

        self.next_seq += 1;
        let seq = self.next_seq;
        self.pending = Some(seq);
        self.loading = true;
        self.error = None;

        Some(SearchTicket {
            seq,
            request: SearchRequest {
                query: text.to_string(),
                top_n: self.page_size,
                category: filters.category_filter(),
                subcategory: filters.subcategory_filter(),
            },
        })
    }

    /// Apply a completion. Only the most recently dispatched search may
    /// change state; anything older is dropped. A failure clears the
    /// previous results.
    pub fn apply(&mut self, seq: u64, result: Result<Vec<SearchResult>>) -> bool {
        if self.pending != Some(seq) {
            debug!(seq, pending = ?self.pending, "discarding superseded search response");
            return false;
        }
        self.pending = None;
        self.loading = false;

        match result {
            Ok(results) => {
                debug!(seq, count = results.len(), "search completed");
                self.results = results;
                self.error = None;
                self.completed = true;
            }
            Err(err) => self.fail(seq, &err),
        }
        true
    }

    /// Apply a failure while the caller keeps the error.
    pub fn apply_error(&mut self, seq: u64, err: &IrError) -> bool {
        if self.pending != Some(seq) {
            debug!(seq, pending = ?self.pending, "discarding superseded search failure");
            return false;
        }
        self.pending = None;
        self.loading = false;
        self.fail(seq, err);
        true
    }

    fn fail(&mut self, seq: u64, err: &IrError) {
        warn!(seq, error = %err, "search failed");
        self.results.clear();
        self.error = Some(SEARCH_FAILED_MESSAGE.to_string());
        self.completed = false;
    }

    #[must_use]
    pub fn view(&self) -> ResultsView<'_> {
        if let Some(message) = self.error.as_deref() {
            return ResultsView::Error(message);
        }
        if !self.results.is_empty() {
            return ResultsView::Results {
                results: &self.results,
                low_confidence: self.has_low_confidence(),
            };
        }
        if self.loading {
            return ResultsView::Searching;
        }
        if self.completed {
            ResultsView::NoResults
        } else {
            ResultsView::Idle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IrError;
    use crate::test_utils::fixtures::result;

    #[test]
    fn test_blank_query_is_ignored() {
        let mut session = SearchSession::default();
        session.set_query("   ");
        assert!(session.submit(&FilterSelection::all()).is_none());
        assert!(!session.is_loading());
        assert_eq!(session.view(), ResultsView::Idle);
    }

    #[test]
    fn test_request_uses_fixed_page_size_and_null_filters() {
        let mut session = SearchSession::default();
        session.set_query("python");
        let ticket = session.submit(&FilterSelection::all()).unwrap();
        assert_eq!(
            ticket.request,
            SearchRequest {
                query: "python".to_string(),
                top_n: 10,
                category: None,
                subcategory: None,
            }
        );
        assert!(session.is_loading());
    }

    #[test]
    fn test_previous_results_stay_visible_while_loading() {
        let mut session = SearchSession::default();
        let first = session.submit_text("cloud", &FilterSelection::all()).unwrap();
        session.apply(first.seq, Ok(vec![result(1, false)]));

        session.submit_text("backend", &FilterSelection::all()).unwrap();
        assert!(session.is_loading());
        assert_eq!(session.results().len(), 1);
        assert!(matches!(session.view(), ResultsView::Results { .. }));
    }

    #[test]
    fn test_success_replaces_results() {
        let mut session = SearchSession::default();
        let first = session.submit_text("cloud", &FilterSelection::all()).unwrap();
        session.apply(first.seq, Ok(vec![result(1, false), result(2, false)]));
        let second = session.submit_text("audio", &FilterSelection::all()).unwrap();
        session.apply(second.seq, Ok(vec![result(9, true)]));
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].id, 9);
        assert!(!session.is_loading());
        assert!(session.error().is_none());
    }

    #[test]
    fn test_failure_sets_message_and_clears_results() {
        let mut session = SearchSession::default();
        let first = session.submit_text("cloud", &FilterSelection::all()).unwrap();
        session.apply(first.seq, Ok(vec![result(1, false)]));
        let second = session.submit_text("cloud", &FilterSelection::all()).unwrap();
        session.apply(
            second.seq,
            Err(IrError::Http {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        assert_eq!(session.error(), Some(SEARCH_FAILED_MESSAGE));
        assert!(session.results().is_empty());
        assert!(!session.is_loading());
        assert_eq!(session.view(), ResultsView::Error(SEARCH_FAILED_MESSAGE));
    }

    #[test]
    fn test_apply_error_settles_loading_and_keeps_error_with_caller() {
        let mut session = SearchSession::default();
        let stale = session.submit_text("cloud", &FilterSelection::all()).unwrap();
        let ticket = session.submit_text("cloud", &FilterSelection::all()).unwrap();
        let err = IrError::Unreachable("connection refused".to_string());

        assert!(!session.apply_error(stale.seq, &err));
        assert!(session.is_loading());

        assert!(session.apply_error(ticket.seq, &err));
        assert!(!session.is_loading());
        assert_eq!(session.error(), Some(SEARCH_FAILED_MESSAGE));
        assert!(session.results().is_empty());
        assert_eq!(err.code(), "unreachable");
    }

    #[test]
    fn test_new_submission_clears_error() {
        let mut session = SearchSession::default();
        let first = session.submit_text("cloud", &FilterSelection::all()).unwrap();
        session.apply(first.seq, Err(IrError::Timeout("30s".to_string())));
        session.submit_text("cloud", &FilterSelection::all()).unwrap();
        assert!(session.error().is_none());
        assert_eq!(session.view(), ResultsView::Searching);
    }

    #[test]
    fn test_last_dispatched_wins() {
        let mut session = SearchSession::default();
        let slow = session.submit_text("python", &FilterSelection::all()).unwrap();
        let fast = session.submit_text("rust", &FilterSelection::all()).unwrap();

        assert!(session.apply(fast.seq, Ok(vec![result(2, false)])));
        assert!(!session.is_loading());
        assert!(!session.apply(slow.seq, Ok(vec![result(1, false)])));
        assert_eq!(session.results()[0].id, 2);
    }

    #[test]
    fn test_stale_response_keeps_loading_for_latest() {
        let mut session = SearchSession::default();
        let slow = session.submit_text("python", &FilterSelection::all()).unwrap();
        let latest = session.submit_text("rust", &FilterSelection::all()).unwrap();

        assert!(!session.apply(slow.seq, Ok(vec![result(1, false)])));
        assert!(session.is_loading());
        assert!(session.apply(latest.seq, Ok(Vec::new())));
        assert!(!session.is_loading());
    }

    #[test]
    fn test_zero_matches_is_distinct_from_idle() {
        let mut session = SearchSession::default();
        assert_eq!(session.view(), ResultsView::Idle);
        let ticket = session.submit_text("zzz", &FilterSelection::all()).unwrap();
        session.apply(ticket.seq, Ok(Vec::new()));
        assert_eq!(session.view(), ResultsView::NoResults);
        assert!(session.error().is_none());
    }

    #[test]
    fn test_low_confidence_derivation() {
        let mut session = SearchSession::default();
        assert!(!session.has_low_confidence());

        let ticket = session.submit_text("audio", &FilterSelection::all()).unwrap();
        session.apply(ticket.seq, Ok(vec![result(1, true), result(2, false)]));
        assert!(session.has_low_confidence());

        let ticket = session.submit_text("audio", &FilterSelection::all()).unwrap();
        session.apply(ticket.seq, Ok(vec![result(1, false), result(2, false)]));
        assert!(!session.has_low_confidence());
    }
}
