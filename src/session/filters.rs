//! Filter cascade: category drives the subcategory catalog.

use serde::Serialize;
use tracing::{debug, warn};

use super::select::SelectOption;
use crate::error::Result;

/// UI sentinel meaning "no filter". Never sent as a search filter.
pub const ALL: &str = "All";

pub const ALL_DOMAINS_LABEL: &str = "All Domains";
pub const ALL_CONTEXTS_LABEL: &str = "All Contexts";

/// Current filter choice as the UI sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub category: String,
    pub subcategory: String,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl FilterSelection {
    #[must_use]
    pub fn all() -> Self {
        Self {
            category: ALL.to_string(),
            subcategory: ALL.to_string(),
        }
    }

    pub fn new(category: impl Into<String>, subcategory: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            subcategory: subcategory.into(),
        }
    }

    /// Category as transmitted: `None` for the sentinel.
    #[must_use]
    pub fn category_filter(&self) -> Option<String> {
        wire_filter(&self.category)
    }

    /// Subcategory as transmitted: `None` for the sentinel.
    #[must_use]
    pub fn subcategory_filter(&self) -> Option<String> {
        wire_filter(&self.subcategory)
    }
}

fn wire_filter(value: &str) -> Option<String> {
    if value == ALL {
        None
    } else {
        Some(value.to_string())
    }
}

/// Identity of a subcategory fetch. Only the ticket matching the latest
/// category change may update the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcategoryTicket {
    pub seq: u64,
    pub category: String,
}

#[derive(Debug)]
pub struct FilterCascade {
    selection: FilterSelection,
    categories: Vec<String>,
    subcategories: Vec<String>,
    categories_requested: bool,
    subcategory_seq: u64,
}

impl Default for FilterCascade {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterCascade {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selection: FilterSelection::all(),
            categories: Vec::new(),
            subcategories: Vec::new(),
            categories_requested: false,
            subcategory_seq: 0,
        }
    }

    #[must_use]
    pub const fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    #[must_use]
    pub fn active_category(&self) -> &str {
        &self.selection.category
    }

    #[must_use]
    pub fn active_subcategory(&self) -> &str {
        &self.selection.subcategory
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn subcategories(&self) -> &[String] {
        &self.subcategories
    }

    /// True the first time only: the category catalog is fetched once and
    /// never retried automatically.
    pub fn request_categories(&mut self) -> bool {
        if self.categories_requested {
            return false;
        }
        self.categories_requested = true;
        true
    }

    /// Ticket for the subcategory fetch of the current category, used on
    /// mount.
    pub fn request_subcategories(&mut self) -> SubcategoryTicket {
        self.subcategory_seq += 1;
        SubcategoryTicket {
            seq: self.subcategory_seq,
            category: self.selection.category.clone(),
        }
    }

    /// Change the category. The subcategory is reset to [`ALL`] before any
    /// fetch is issued. Returns the fetch to dispatch when the category
    /// actually changed.
    pub fn set_category(&mut self, category: impl Into<String>) -> Option<SubcategoryTicket> {
        let category = category.into();
        self.selection.subcategory = ALL.to_string();
        if category == self.selection.category {
            return None;
        }
        debug!(from = %self.selection.category, to = %category, "category changed");
        self.selection.category = category;
        // The old catalog belongs to the old category.
        self.subcategories.clear();
        Some(self.request_subcategories())
    }

    pub fn set_subcategory(&mut self, subcategory: impl Into<String>) {
        self.selection.subcategory = subcategory.into();
    }

    pub fn apply_categories(&mut self, result: Result<Vec<String>>) {
        match result {
            Ok(categories) => self.categories = categories,
            Err(err) => {
                warn!(error = %err, "failed to fetch categories");
                self.categories.clear();
            }
        }
    }

    /// Apply a subcategory fetch. Returns false when the ticket has been
    /// superseded by a newer category change.
    pub fn apply_subcategories(
        &mut self,
        ticket: &SubcategoryTicket,
        result: Result<Vec<String>>,
    ) -> bool {
        if ticket.seq != self.subcategory_seq || ticket.category != self.selection.category {
            debug!(
                seq = ticket.seq,
                current = self.subcategory_seq,
                category = %ticket.category,
                "discarding superseded subcategory response"
            );
            return false;
        }
        match result {
            Ok(subcategories) => self.subcategories = subcategories,
            Err(err) => {
                warn!(category = %ticket.category, error = %err, "failed to fetch subcategories");
                self.subcategories.clear();
            }
        }
        true
    }

    /// Subcategories only make sense inside a concrete category.
    #[must_use]
    pub fn subcategory_selectable(&self) -> bool {
        self.selection.category != ALL
    }

    #[must_use]
    pub fn category_options(&self) -> Vec<SelectOption> {
        with_sentinel(ALL_DOMAINS_LABEL, &self.categories)
    }

    #[must_use]
    pub fn subcategory_options(&self) -> Vec<SelectOption> {
        with_sentinel(ALL_CONTEXTS_LABEL, &self.subcategories)
    }
}

fn with_sentinel(label: &str, values: &[String]) -> Vec<SelectOption> {
    std::iter::once(SelectOption::new(ALL, label))
        .chain(values.iter().map(|value| SelectOption::new(value, value)))
        .collect()
}
