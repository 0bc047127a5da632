//! Dependent-select widget: a single-choice selector over a provided option
//! list.
//!
//! The widget is controlled: the current value belongs to the caller and is
//! passed in on every read. It owns only its open/closed state, a highlight
//! cursor, and its outside-click subscription.

use std::cell::Cell;
use std::rc::Rc;

use super::pointer::{PointerHub, PointerSubscription, Region};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

pub struct DependentSelect {
    options: Vec<SelectOption>,
    placeholder: String,
    disabled: bool,
    cursor: usize,
    open: Rc<Cell<bool>>,
    region: Rc<Cell<Option<Region>>>,
    subscription: Option<PointerSubscription>,
}

impl DependentSelect {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            options: Vec::new(),
            placeholder: placeholder.into(),
            disabled: false,
            cursor: 0,
            open: Rc::new(Cell::new(false)),
            region: Rc::new(Cell::new(None)),
            subscription: None,
        }
    }

    /// Replace the option list. Values must be unique; later duplicates are
    /// dropped.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        let mut unique: Vec<SelectOption> = Vec::with_capacity(options.len());
        for option in options {
            if !unique.iter().any(|existing| existing.value == option.value) {
                unique.push(option);
            }
        }
        self.options = unique;
        if self.cursor >= self.options.len() {
            self.cursor = self.options.len().saturating_sub(1);
        }
    }

    #[must_use]
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled {
            self.open.set(false);
        }
    }

    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Start listening for pointer-down events outside the widget.
    pub fn mount(&mut self, hub: &PointerHub) {
        let open = Rc::clone(&self.open);
        let region = Rc::clone(&self.region);
        self.subscription = Some(hub.subscribe(move |point| {
            if !open.get() {
                return;
            }
            let inside = region.get().is_some_and(|r| r.contains(point));
            if !inside {
                open.set(false);
            }
        }));
    }

    pub fn unmount(&mut self) {
        self.subscription = None;
        self.open.set(false);
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Record where the widget (including its open list) was drawn.
    pub fn set_region(&self, region: Region) {
        self.region.set(Some(region));
    }

    /// Open or close. A disabled widget never opens. Opening places the
    /// cursor on the current value.
    pub fn toggle(&mut self, value: &str) {
        if self.disabled {
            return;
        }
        let opening = !self.open.get();
        if opening {
            self.cursor = self.position_of(value).unwrap_or(0);
        }
        self.open.set(opening);
    }

    pub fn close(&mut self) {
        self.open.set(false);
    }

    pub fn move_cursor(&mut self, delta: isize) {
        if self.options.is_empty() {
            return;
        }
        let last = self.options.len() - 1;
        self.cursor = self.cursor.saturating_add_signed(delta).min(last);
    }

    /// Select the option at `index`: closes the widget and returns the value
    /// to hand to the change handler. Re-selecting the current value still
    /// emits.
    pub fn choose(&mut self, index: usize) -> Option<String> {
        if self.disabled {
            return None;
        }
        let value = self.options.get(index)?.value.clone();
        self.cursor = index;
        self.open.set(false);
        Some(value)
    }

    pub fn choose_highlighted(&mut self) -> Option<String> {
        self.choose(self.cursor)
    }

    /// Label for `value`, or the placeholder when no option matches.
    #[must_use]
    pub fn display_label<'a>(&'a self, value: &str) -> &'a str {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map_or(self.placeholder.as_str(), |option| option.label.as_str())
    }

    fn position_of(&self, value: &str) -> Option<usize> {
        self.options.iter().position(|option| option.value == value)
    }
}

#[cfg(test)]
mod tests {
    use super::super::pointer::Point;
    use super::*;

    fn domains() -> DependentSelect {
        let mut select = DependentSelect::new("All Domains");
        select.set_options(vec![
            SelectOption::new("All", "All Domains"),
            SelectOption::new("Products", "Products"),
            SelectOption::new("Technology", "Technology"),
        ]);
        select
    }

    #[test]
    fn test_choose_emits_and_closes() {
        let mut select = domains();
        select.toggle("All");
        assert!(select.is_open());
        assert_eq!(select.choose(2).as_deref(), Some("Technology"));
        assert!(!select.is_open());
    }

    #[test]
    fn test_reselecting_current_value_still_emits() {
        let mut select = domains();
        select.toggle("Products");
        assert_eq!(select.cursor(), 1);
        assert_eq!(select.choose_highlighted().as_deref(), Some("Products"));
        assert!(!select.is_open());
    }

    #[test]
    fn test_disabled_never_opens_or_emits() {
        let mut select = domains();
        select.set_disabled(true);
        select.toggle("All");
        assert!(!select.is_open());
        assert_eq!(select.choose(1), None);
    }

    #[test]
    fn test_disabling_closes_open_widget() {
        let mut select = domains();
        select.toggle("All");
        select.set_disabled(true);
        assert!(!select.is_open());
    }

    #[test]
    fn test_unknown_value_falls_back_to_placeholder() {
        let select = domains();
        assert_eq!(select.display_label("Gardening"), "All Domains");
        assert_eq!(select.display_label("Products"), "Products");
    }

    #[test]
    fn test_duplicate_values_are_dropped() {
        let mut select = DependentSelect::new("All Contexts");
        select.set_options(vec![
            SelectOption::new("All", "All Contexts"),
            SelectOption::new("Audio", "Audio"),
            SelectOption::new("Audio", "Audio again"),
        ]);
        assert_eq!(select.options().len(), 2);
        assert_eq!(select.display_label("Audio"), "Audio");
    }

    #[test]
    fn test_cursor_is_clamped() {
        let mut select = domains();
        select.move_cursor(10);
        assert_eq!(select.cursor(), 2);
        select.move_cursor(-10);
        assert_eq!(select.cursor(), 0);
    }

    #[test]
    fn test_click_outside_closes_while_mounted() {
        let hub = PointerHub::new();
        let mut select = domains();
        select.mount(&hub);
        select.set_region(Region::new(0, 0, 20, 5));

        select.toggle("All");
        hub.pointer_down(Point::new(3, 2));
        assert!(select.is_open(), "click inside keeps the list open");

        hub.pointer_down(Point::new(40, 2));
        assert!(!select.is_open());
    }

    #[test]
    fn test_unmount_releases_listener() {
        let hub = PointerHub::new();
        let mut select = domains();
        select.mount(&hub);
        assert_eq!(hub.listener_count(), 1);
        select.unmount();
        assert_eq!(hub.listener_count(), 0);
        assert!(!select.is_mounted());
    }
}
