//! Terminal UI: main entry point and event loop.

pub mod app;
pub mod event;
pub mod theme;
pub mod ui;
pub mod widgets;
pub mod worker;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{poll as ct_poll, read as ct_read, Event, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use self::app::App;
use crate::api::MailApi;
use crate::config::Config;
use crate::controller::PageController;
use crate::store::credentials::CredentialStore;

/// Run the TUI application. Blocks until the user quits.
pub fn run_tui(
    config: &Config,
    api: Arc<dyn MailApi>,
    store: Box<dyn CredentialStore>,
) -> anyhow::Result<()> {
    let controller =
        PageController::new().with_order(&config.list.sort_by, &config.list.sort_order);
    let app = App::new(controller, store, api);

    // Setup terminal (alternate screen)
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_event_loop(&mut terminal, app);

    // Restore terminal (always, even on error)
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Main event loop: render → poll → handle → apply responses → repeat.
fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
) -> anyhow::Result<()> {
    let tick_rate = Duration::from_millis(100);

    loop {
        terminal.draw(|frame| {
            ui::render(frame, &mut app);
        })?;

        if ct_poll(tick_rate)? {
            if let Event::Key(key) = ct_read()? {
                // Windows reports releases too.
                if key.kind == KeyEventKind::Press {
                    event::handle_key_event(&mut app, key)?;
                }
            }
        }

        // Finished network calls
        app.poll_responses();

        // Periodic housekeeping
        app.tick();

        if app.should_quit {
            break;
        }
    }

    // Worker threads still running finish on their own; their sends fail.
    tracing::debug!(pending = app.pending_requests(), "Leaving event loop");
    Ok(())
}
