//! Terminal client for the ranking service.
//!
//! Renders the shell with ratatui and feeds it crossterm input. Network
//! completions are applied on every frame, on this thread, so the session
//! controllers never see concurrent mutation.

pub mod app;
pub mod pages;
pub mod ui;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::debug;

pub use app::{Focus, TuiApp};

use crate::api::RankingService;
use crate::error::{IrError, Result};
use crate::session::SessionSettings;
use crate::shell::Shell;

/// How long to wait for input before applying completions and redrawing.
const FRAME_TIME: Duration = Duration::from_millis(50);

/// Run the terminal client until the user quits. Must be called from
/// within a tokio runtime context.
pub fn run<S: RankingService>(
    service: Arc<S>,
    settings: SessionSettings,
    initial_query: Option<&str>,
) -> Result<()> {
    enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(terminal_error)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(terminal_error)?;

    let mut app = TuiApp::new(Shell::new(service, settings));
    app.mount();
    if let Some(query) = initial_query {
        app.search_for(query);
    }

    let result = run_loop(&mut terminal, &mut app);

    disable_raw_mode().map_err(terminal_error)?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(terminal_error)?;
    terminal.show_cursor().map_err(terminal_error)?;

    result
}

fn run_loop<S: RankingService>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut TuiApp<S>,
) -> Result<()> {
    loop {
        app.tick();
        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(terminal_error)?;

        if event::poll(FRAME_TIME).map_err(terminal_error)? {
            // Drain everything already queued before the next frame.
            loop {
                let ev = event::read().map_err(terminal_error)?;
                app.handle_event(ev);
                if app.should_quit() || !event::poll(Duration::ZERO).map_err(terminal_error)? {
                    break;
                }
            }
        }

        if app.should_quit() {
            debug!("terminal client exiting");
            break;
        }
    }
    Ok(())
}

fn terminal_error(err: io::Error) -> IrError {
    IrError::Terminal(err.to_string())
}
