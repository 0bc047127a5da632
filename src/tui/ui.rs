//! Frame rendering.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::app::{Focus, ListArea, TuiApp};
use super::pages;
use crate::api::{RankingService, SearchResult};
use crate::session::{DependentSelect, OfflineOverlay, Region, ResultsView, SUGGESTIONS};
use crate::shell::Page;

const ACCENT: Color = Color::Blue;
const MUTED: Color = Color::DarkGray;

fn region(rect: Rect) -> Region {
    Region::new(rect.x, rect.y, rect.width, rect.height)
}

fn width_of(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(MUTED)
    }
}

/// Render the whole screen and record its clickable areas.
pub fn render<S: RankingService>(frame: &mut Frame, app: &mut TuiApp<S>) {
    app.hits.clear();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tabs + engine indicator
            Constraint::Min(0),    // Page body
            Constraint::Length(1), // Key help
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match app.shell.page() {
        Page::Search => render_search(frame, app, chunks[1]),
        Page::HowItWorks => render_how_it_works(frame, app, chunks[1]),
        Page::Privacy => render_privacy(frame, chunks[1]),
    }
    render_footer(frame, app, chunks[2]);

    if let Some(overlay) = app.shell.offline_overlay() {
        render_offline_overlay(frame, app, overlay);
    }
}

fn render_header<S: RankingService>(frame: &mut Frame, app: &mut TuiApp<S>, area: Rect) {
    let brand = " IntelliRank ";
    let mut spans = vec![Span::styled(
        brand,
        Style::default()
            .fg(Color::White)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD),
    )];
    let mut x = area.x + width_of(brand) + 1;
    spans.push(Span::raw(" "));

    for page in Page::ALL {
        let label = format!(" {} ", page.title());
        let width = width_of(&label);
        let style = if page == app.shell.page() {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::Gray)
        };
        app.hits
            .tabs
            .push((Region::new(x, area.y, width, 1), page));
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
        x = x.saturating_add(width + 1);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    // Nothing is shown until the first probe resolves.
    if let Some(indicator) = app.shell.indicator() {
        let color = if indicator.online {
            Color::Green
        } else {
            Color::Red
        };
        let line = Line::from(vec![
            Span::styled("● ", Style::default().fg(color)),
            Span::styled(indicator.label, Style::default().fg(color)),
            Span::raw(" "),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Right), area);
    }
}

fn render_search<S: RankingService>(frame: &mut Frame, app: &mut TuiApp<S>, area: Rect) {
    let low_confidence = app.shell.home().search().has_low_confidence()
        && !app.shell.home().search().results().is_empty();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Headline
            Constraint::Length(3), // Query input
            Constraint::Length(3), // Filters
            Constraint::Length(1), // Suggestion chips
            Constraint::Length(if low_confidence { 2 } else { 0 }),
            Constraint::Min(0), // Results
        ])
        .split(area);

    let headline = Text::from(vec![
        Line::from(Span::styled(
            pages::SEARCH_HEADLINE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(pages::SEARCH_TAGLINE, Style::default().fg(MUTED))),
    ]);
    frame.render_widget(Paragraph::new(headline).alignment(Alignment::Center), chunks[0]);

    render_query(frame, app, chunks[1]);

    let filter_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[2]);
    let category = app.shell.home().filters().active_category().to_string();
    let subcategory = app.shell.home().filters().active_subcategory().to_string();
    render_select_header(
        frame,
        &app.category,
        &category,
        "Domain",
        app.focus == Focus::Category,
        filter_cols[0],
    );
    render_select_header(
        frame,
        &app.subcategory,
        &subcategory,
        "Context",
        app.focus == Focus::Subcategory,
        filter_cols[1],
    );
    app.hits.category = Some(region(filter_cols[0]));
    app.hits.subcategory = Some(region(filter_cols[1]));

    render_chips(frame, app, chunks[3]);

    if low_confidence {
        let banner = Line::from(vec![
            Span::styled(" ! ", Style::default().fg(Color::Black).bg(Color::Yellow)),
            Span::raw(" "),
            Span::styled(pages::LOW_CONFIDENCE_BANNER, Style::default().fg(Color::Yellow)),
        ]);
        frame.render_widget(Paragraph::new(banner).wrap(Wrap { trim: true }), chunks[4]);
    }

    render_results(frame, app, chunks[5]);

    // Open lists float over the results, so they are drawn last.
    app.hits.category_list = render_select_list(frame, &app.category, filter_cols[0], area);
    app.hits.subcategory_list =
        render_select_list(frame, &app.subcategory, filter_cols[1], area);
}

fn render_query<S: RankingService>(frame: &mut Frame, app: &mut TuiApp<S>, area: Rect) {
    let focused = app.focus == Focus::Query;
    let search = app.shell.home().search();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(if search.is_loading() {
            " Search · running "
        } else {
            " Search "
        });
    let inner = block.inner(area);

    let line = if search.query().is_empty() {
        Line::from(Span::styled(pages::QUERY_PLACEHOLDER, Style::default().fg(MUTED)))
    } else {
        Line::from(Span::raw(search.query()))
    };
    frame.render_widget(Paragraph::new(line).block(block), area);

    if focused {
        let before = &search.query()[..app.cursor.min(search.query().len())];
        let x = inner.x.saturating_add(width_of(before));
        frame.set_cursor_position((x.min(inner.right().saturating_sub(1)), inner.y));
    }
    app.hits.query = Some(region(area));
}

fn render_select_header(
    frame: &mut Frame,
    select: &DependentSelect,
    value: &str,
    title: &str,
    focused: bool,
    area: Rect,
) {
    let arrow = if select.is_open() { " ▴" } else { " ▾" };
    let style = if select.is_disabled() {
        Style::default().fg(MUTED)
    } else {
        Style::default().fg(Color::White)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(format!(" {title} "));
    let line = Line::from(vec![
        Span::styled(select.display_label(value).to_string(), style),
        Span::styled(arrow, Style::default().fg(MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
    select.set_region(region(area));
}

/// Draw the open option list under its header. Returns where it landed.
fn render_select_list(
    frame: &mut Frame,
    select: &DependentSelect,
    header: Rect,
    bounds: Rect,
) -> Option<ListArea> {
    if !select.is_open() {
        return None;
    }
    let top = header.y + header.height;
    let available = bounds.bottom().saturating_sub(top);
    let wanted = u16::try_from(select.options().len() + 2).unwrap_or(u16::MAX);
    let height = wanted.min(available);
    if height < 3 {
        return None;
    }
    let area = Rect::new(header.x, top, header.width, height);
    let visible = usize::from(height - 2);
    let offset = (select.cursor() + 1).saturating_sub(visible);

    let items: Vec<ListItem> = select
        .options()
        .iter()
        .skip(offset)
        .take(visible)
        .map(|option| ListItem::new(option.label.clone()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT)),
        )
        .highlight_style(Style::default().fg(Color::Black).bg(ACCENT))
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(select.cursor() - offset));

    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);

    let header_region = region(header);
    select.set_region(Region::new(
        header_region.x,
        header_region.y,
        header_region.width,
        header_region.height + height,
    ));
    Some(ListArea {
        region: region(area),
        offset,
    })
}

fn render_chips<S: RankingService>(frame: &mut Frame, app: &mut TuiApp<S>, area: Rect) {
    let mut spans = vec![Span::styled("Try: ", Style::default().fg(MUTED))];
    let mut x = area.x + width_of("Try: ");
    for (index, chip) in SUGGESTIONS.iter().enumerate() {
        let label = format!("[{}] {chip}", index + 1);
        let width = width_of(&label);
        app.hits.chips.push((Region::new(x, area.y, width, 1), *chip));
        spans.push(Span::styled(label, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw("  "));
        x = x.saturating_add(width + 2);
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_results<S: RankingService>(frame: &mut Frame, app: &TuiApp<S>, area: Rect) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(border_style(app.focus == Focus::Results))
        .title(" Results ");

    match app.shell.home().search().view() {
        ResultsView::Idle => {
            let hint = Paragraph::new(Span::styled(pages::IDLE_HINT, Style::default().fg(MUTED)))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(hint, area);
        }
        ResultsView::Searching => {
            let text = Paragraph::new(Span::styled(pages::SEARCHING, Style::default().fg(ACCENT)))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(text, area);
        }
        ResultsView::NoResults => {
            let text = Text::from(vec![
                Line::from(Span::styled(
                    pages::NO_RESULTS_TITLE,
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(pages::NO_RESULTS_HINT, Style::default().fg(MUTED))),
            ]);
            let paragraph = Paragraph::new(text)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(block);
            frame.render_widget(paragraph, area);
        }
        ResultsView::Error(message) => {
            let text = Paragraph::new(Span::styled(message, Style::default().fg(Color::Red)))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(text, area);
        }
        ResultsView::Results { results, .. } => {
            let items: Vec<ListItem> = results.iter().map(result_card).collect();
            let list = List::new(items)
                .block(block)
                .highlight_symbol("▌ ")
                .highlight_style(Style::default().add_modifier(Modifier::BOLD));
            let mut state = ListState::default().with_selected(Some(app.selected));
            frame.render_stateful_widget(list, area, &mut state);
        }
    }
}

fn result_card(result: &SearchResult) -> ListItem<'static> {
    let mut badges = vec![
        Span::styled(result.category.clone(), Style::default().fg(ACCENT)),
        Span::raw(" · "),
        Span::raw(result.subcategory.clone()),
    ];
    if let Some(level) = &result.difficulty_level {
        badges.push(Span::raw(" · "));
        badges.push(Span::styled(level.clone(), Style::default().fg(Color::Cyan)));
    }
    if let Some(price) = &result.price_range {
        badges.push(Span::raw(" · "));
        badges.push(Span::styled(price.clone(), Style::default().fg(Color::Green)));
    }
    badges.push(Span::raw("   "));
    badges.push(Span::styled(
        format!("{} Match", result.match_percentage),
        Style::default().fg(Color::Magenta),
    ));

    let mut title = vec![Span::styled(
        result.title.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if let Some(brand) = &result.brand {
        title.push(Span::styled(format!(" by {brand}"), Style::default().fg(MUTED)));
    }

    let tags = result
        .tags
        .iter()
        .map(|tag| format!("#{tag}"))
        .collect::<Vec<_>>()
        .join(" ");

    ListItem::new(Text::from(vec![
        Line::from(badges),
        Line::from(title),
        Line::from(Span::styled(
            result.description.clone(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(tags, Style::default().fg(MUTED))),
        Line::default(),
    ]))
}

fn section_lines(sections: &[pages::Section]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for section in sections {
        lines.push(Line::from(Span::styled(
            section.heading,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(section.body));
        lines.push(Line::default());
    }
    lines
}

fn render_how_it_works<S: RankingService>(frame: &mut Frame, app: &mut TuiApp<S>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            pages::HOW_IT_WORKS_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(pages::HOW_IT_WORKS_INTRO, Style::default().fg(MUTED))),
        Line::default(),
    ];
    lines.extend(section_lines(&pages::HOW_IT_WORKS_STEPS));
    let body = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(border_style(false)));
    frame.render_widget(body, chunks[0]);

    let label = format!("[ {} ]", pages::START_SEARCH);
    let width = width_of(&label);
    let x = chunks[1].x + chunks[1].width.saturating_sub(width) / 2;
    app.hits.start_search = Some(Region::new(x, chunks[1].y, width, 1));
    let button = Paragraph::new(Span::styled(
        label,
        Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(button, chunks[1]);
}

fn render_privacy(frame: &mut Frame, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(
            pages::PRIVACY_TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(pages::PRIVACY_INTRO, Style::default().fg(MUTED))),
        Line::default(),
    ];
    lines.extend(section_lines(&pages::PRIVACY_SECTIONS));
    let body = Paragraph::new(Text::from(lines))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).border_style(border_style(false)));
    frame.render_widget(body, area);
}

fn render_footer<S: RankingService>(frame: &mut Frame, app: &TuiApp<S>, area: Rect) {
    let help = if app.shell.offline_overlay().is_some() {
        "Enter retry · Esc quit"
    } else {
        match app.shell.page() {
            Page::Search => {
                "Tab focus · Enter search/select · Alt+1-5 suggestion · F1-F3 pages · Esc quit"
            }
            Page::HowItWorks => "Enter start search · ←/→ pages · q quit",
            Page::Privacy => "←/→ pages · q quit",
        }
    };
    frame.render_widget(
        Paragraph::new(Span::styled(help, Style::default().fg(MUTED))),
        area,
    );
}

fn render_offline_overlay<S: RankingService>(
    frame: &mut Frame,
    app: &mut TuiApp<S>,
    overlay: OfflineOverlay,
) {
    let screen = frame.area();
    let width = screen.width.min(60);
    let height = screen.height.min(9);
    let area = Rect::new(
        screen.x + (screen.width - width) / 2,
        screen.y + (screen.height - height) / 2,
        width,
        height,
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(
            format!(" {} ", overlay.title),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(overlay.message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        chunks[0],
    );

    let label = format!("[ {} ]", overlay.action);
    let label_width = width_of(&label).min(chunks[1].width);
    let x = chunks[1].x + (chunks[1].width - label_width) / 2;
    app.hits.retry = Some(Region::new(x, chunks[1].y, label_width, 1));
    frame.render_widget(
        Paragraph::new(Span::styled(
            label,
            Style::default().fg(Color::White).bg(Color::Red).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[1],
    );
}
