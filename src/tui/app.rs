//! Terminal client state and input handling.

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::api::RankingService;
use crate::session::filters::{ALL_CONTEXTS_LABEL, ALL_DOMAINS_LABEL};
use crate::session::{DependentSelect, Point, PointerHub, Region, SUGGESTIONS};
use crate::shell::{Page, Shell};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Query,
    Category,
    Subcategory,
    Results,
}

/// An open option list as drawn: its frame and the index of the first
/// visible option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListArea {
    pub region: Region,
    pub offset: usize,
}

impl ListArea {
    /// Option index under `point`, accounting for the border row.
    #[must_use]
    pub fn option_at(&self, point: Point) -> Option<usize> {
        if !self.region.contains(point) {
            return None;
        }
        let row = point.y.checked_sub(self.region.y + 1)?;
        if row + 2 >= self.region.height {
            return None;
        }
        Some(self.offset + usize::from(row))
    }
}

/// Clickable areas recorded while drawing the last frame.
#[derive(Debug, Default)]
pub struct HitMap {
    pub tabs: Vec<(Region, Page)>,
    pub query: Option<Region>,
    pub category: Option<Region>,
    pub category_list: Option<ListArea>,
    pub subcategory: Option<Region>,
    pub subcategory_list: Option<ListArea>,
    pub chips: Vec<(Region, &'static str)>,
    pub retry: Option<Region>,
    pub start_search: Option<Region>,
}

impl HitMap {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

pub struct TuiApp<S> {
    pub(crate) shell: Shell<S>,
    hub: PointerHub,
    pub(crate) category: DependentSelect,
    pub(crate) subcategory: DependentSelect,
    pub(crate) focus: Focus,
    pub(crate) cursor: usize,
    pub(crate) selected: usize,
    pub(crate) hits: HitMap,
    pub(crate) should_quit: bool,
}

impl<S: RankingService> TuiApp<S> {
    pub fn new(shell: Shell<S>) -> Self {
        let hub = PointerHub::new();
        let mut category = DependentSelect::new(ALL_DOMAINS_LABEL);
        let mut subcategory = DependentSelect::new(ALL_CONTEXTS_LABEL);
        category.mount(&hub);
        subcategory.mount(&hub);
        Self {
            shell,
            hub,
            category,
            subcategory,
            focus: Focus::Query,
            cursor: 0,
            selected: 0,
            hits: HitMap::default(),
            should_quit: false,
        }
    }

    pub fn mount(&mut self) {
        self.shell.mount();
        self.set_focus(Focus::Query);
        self.sync_selects();
    }

    /// Fill the query box with `query` and submit it.
    pub fn search_for(&mut self, query: &str) {
        self.shell.home_mut().set_query(query);
        self.cursor = self.query().len();
        self.submit();
    }

    #[must_use]
    pub const fn shell(&self) -> &Shell<S> {
        &self.shell
    }

    #[must_use]
    pub const fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply waiting completions and refresh everything derived from them.
    pub fn tick(&mut self) {
        self.shell.pump();
        self.sync_selects();
        if self.shell.search_focused() && self.focus != Focus::Query {
            self.focus = Focus::Query;
            self.cursor = self.query().len();
        }
        let count = self.shell.home().search().results().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn query(&self) -> &str {
        self.shell.home().search().query()
    }

    fn sync_selects(&mut self) {
        let filters = self.shell.home().filters();
        self.category.set_options(filters.category_options());
        self.subcategory.set_options(filters.subcategory_options());
        self.subcategory
            .set_disabled(!filters.subcategory_selectable());
        if self.focus == Focus::Subcategory && self.subcategory.is_disabled() {
            self.focus = Focus::Category;
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        if focus != Focus::Category {
            self.category.close();
        }
        if focus != Focus::Subcategory {
            self.subcategory.close();
        }
        if focus == Focus::Query {
            self.cursor = self.query().len();
        }
        self.focus = focus;
        self.shell.set_search_focus(focus == Focus::Query);
    }

    fn cycle_focus(&mut self, forward: bool) {
        let order = [
            Focus::Query,
            Focus::Category,
            Focus::Subcategory,
            Focus::Results,
        ];
        let mut index = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        loop {
            index = if forward {
                (index + 1) % order.len()
            } else {
                (index + order.len() - 1) % order.len()
            };
            if order[index] != Focus::Subcategory || !self.subcategory.is_disabled() {
                break;
            }
        }
        self.set_focus(order[index]);
    }

    fn navigate(&mut self, page: Page) {
        self.category.close();
        self.subcategory.close();
        self.shell.navigate(page);
    }

    fn start_search(&mut self) {
        self.shell.start_search();
        self.set_focus(Focus::Query);
    }

    fn choose_category(&mut self, index: usize) {
        if let Some(value) = self.category.choose(index) {
            self.shell.home_mut().select_category(value);
            self.sync_selects();
        }
    }

    fn choose_subcategory(&mut self, index: usize) {
        if let Some(value) = self.subcategory.choose(index) {
            self.shell.home_mut().select_subcategory(value);
        }
    }

    fn choose_suggestion(&mut self, suggestion: &str) {
        self.shell.home_mut().choose_suggestion(suggestion);
        self.cursor = self.query().len();
        self.selected = 0;
    }

    fn submit(&mut self) {
        if self.shell.home_mut().submit().is_some() {
            self.selected = 0;
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.shell.offline_overlay().is_some() {
            match key.code {
                KeyCode::Enter | KeyCode::Char('r') => self.shell.retry_connection(),
                KeyCode::Esc => self.should_quit = true,
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::F(1) => return self.navigate(Page::Search),
            KeyCode::F(2) => return self.navigate(Page::HowItWorks),
            KeyCode::F(3) => return self.navigate(Page::Privacy),
            _ => {}
        }

        match self.shell.page() {
            Page::Search => self.handle_search_key(key),
            page => match key.code {
                KeyCode::Enter if page == Page::HowItWorks => self.start_search(),
                KeyCode::Right | KeyCode::Tab => self.navigate(page.next()),
                KeyCode::Left | KeyCode::BackTab => self.navigate(page.previous()),
                KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
                _ => {}
            },
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::ALT) {
            if let KeyCode::Char(digit) = key.code {
                let chip = digit
                    .to_digit(10)
                    .and_then(|d| usize::try_from(d).ok())
                    .and_then(|d| d.checked_sub(1))
                    .and_then(|index| SUGGESTIONS.get(index));
                if let Some(chip) = chip {
                    self.choose_suggestion(chip);
                }
            }
            return;
        }

        match key.code {
            KeyCode::Tab => return self.cycle_focus(true),
            KeyCode::BackTab => return self.cycle_focus(false),
            KeyCode::Esc => {
                if self.category.is_open() || self.subcategory.is_open() {
                    self.category.close();
                    self.subcategory.close();
                } else {
                    self.should_quit = true;
                }
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Query => self.handle_query_key(key),
            Focus::Category => {
                let value = self.shell.home().filters().active_category().to_string();
                match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') if self.category.is_open() => {
                        if let Some(value) = self.category.choose_highlighted() {
                            self.shell.home_mut().select_category(value);
                            self.sync_selects();
                        }
                    }
                    KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down
                        if !self.category.is_open() =>
                    {
                        self.category.toggle(&value);
                    }
                    KeyCode::Up => self.category.move_cursor(-1),
                    KeyCode::Down => self.category.move_cursor(1),
                    _ => {}
                }
            }
            Focus::Subcategory => {
                let value = self.shell.home().filters().active_subcategory().to_string();
                match key.code {
                    KeyCode::Enter | KeyCode::Char(' ') if self.subcategory.is_open() => {
                        if let Some(value) = self.subcategory.choose_highlighted() {
                            self.shell.home_mut().select_subcategory(value);
                        }
                    }
                    KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down
                        if !self.subcategory.is_open() =>
                    {
                        self.subcategory.toggle(&value);
                    }
                    KeyCode::Up => self.subcategory.move_cursor(-1),
                    KeyCode::Down => self.subcategory.move_cursor(1),
                    _ => {}
                }
            }
            Focus::Results => {
                let count = self.shell.home().search().results().len();
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        self.selected = self.selected.saturating_sub(1);
                    }
                    KeyCode::Down | KeyCode::Char('j') if self.selected + 1 < count => {
                        self.selected += 1;
                    }
                    KeyCode::Home => self.selected = 0,
                    KeyCode::End => self.selected = count.saturating_sub(1),
                    KeyCode::Char('/') => self.set_focus(Focus::Query),
                    _ => {}
                }
            }
        }
    }

    fn handle_query_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let mut cursor = self.cursor.min(self.query().len());
        match key.code {
            KeyCode::Enter => {
                self.submit();
                return;
            }
            KeyCode::Char('u') if ctrl => {
                self.shell.home_mut().query_mut().clear();
                cursor = 0;
            }
            KeyCode::Char('a') if ctrl => cursor = 0,
            KeyCode::Char('e') if ctrl => cursor = self.query().len(),
            KeyCode::Home => cursor = 0,
            KeyCode::End => cursor = self.query().len(),
            KeyCode::Left => {
                cursor = self.query()[..cursor]
                    .char_indices()
                    .next_back()
                    .map_or(0, |(i, _)| i);
            }
            KeyCode::Right => {
                if let Some(c) = self.query()[cursor..].chars().next() {
                    cursor += c.len_utf8();
                }
            }
            KeyCode::Backspace => {
                let query = self.shell.home_mut().query_mut();
                let prev = query[..cursor].char_indices().next_back().map(|(i, _)| i);
                if let Some(prev) = prev {
                    query.drain(prev..cursor);
                    cursor = prev;
                }
            }
            KeyCode::Delete => {
                let query = self.shell.home_mut().query_mut();
                let width = query[cursor..].chars().next().map(char::len_utf8);
                if let Some(width) = width {
                    query.drain(cursor..cursor + width);
                }
            }
            KeyCode::Down => self.set_focus(Focus::Results),
            KeyCode::Char(c) if !ctrl => {
                self.shell.home_mut().query_mut().insert(cursor, c);
                cursor += c.len_utf8();
            }
            _ => {}
        }
        if self.focus == Focus::Query {
            self.cursor = cursor;
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let point = Point::new(mouse.column, mouse.row);

        // Outside-click closes any open select before the click lands.
        let lists = (self.hits.category_list, self.hits.subcategory_list);
        self.hub.pointer_down(point);

        if self.shell.offline_overlay().is_some() {
            if self.hits.retry.is_some_and(|r| r.contains(point)) {
                self.shell.retry_connection();
            }
            return;
        }

        if let Some(page) = self
            .hits
            .tabs
            .iter()
            .find(|(region, _)| region.contains(point))
            .map(|(_, page)| *page)
        {
            self.navigate(page);
            return;
        }

        if self.hits.start_search.is_some_and(|r| r.contains(point)) {
            self.start_search();
            return;
        }

        if self.shell.page() != Page::Search {
            return;
        }

        if let Some(index) = lists.0.and_then(|list| list.option_at(point)) {
            self.choose_category(index);
            return;
        }
        if let Some(index) = lists.1.and_then(|list| list.option_at(point)) {
            self.choose_subcategory(index);
            return;
        }
        if self.hits.category.is_some_and(|r| r.contains(point)) {
            let value = self.shell.home().filters().active_category().to_string();
            self.set_focus(Focus::Category);
            self.category.toggle(&value);
            return;
        }
        if self.hits.subcategory.is_some_and(|r| r.contains(point)) {
            if !self.subcategory.is_disabled() {
                let value = self.shell.home().filters().active_subcategory().to_string();
                self.set_focus(Focus::Subcategory);
                self.subcategory.toggle(&value);
            }
            return;
        }
        if let Some(chip) = self
            .hits
            .chips
            .iter()
            .find(|(region, _)| region.contains(point))
            .map(|(_, chip)| *chip)
        {
            self.choose_suggestion(chip);
            return;
        }
        if self.hits.query.is_some_and(|r| r.contains(point)) {
            self.set_focus(Focus::Query);
        }
    }
}
