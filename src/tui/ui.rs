//! Main render function that dispatches to widgets.

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use super::app::App;
use super::widgets;
use crate::controller::Phase;

/// Render the entire TUI frame.
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();

    // Vertical layout: header (1) + content (flex) + status (1)
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header bar
            Constraint::Min(5),    // content
            Constraint::Length(1), // status bar
        ])
        .split(size);

    widgets::header_bar::render(frame, app, vertical[0]);

    match app.controller.phase() {
        Phase::AutoLoggingIn => widgets::login_form::render_splash(frame, app, vertical[1]),
        Phase::LoggedOut => widgets::login_form::render(frame, app, vertical[1]),
        Phase::LoggedIn => widgets::mail_list::render(frame, app, vertical[1]),
    }

    widgets::status_bar::render(frame, app, vertical[2]);

    // Overlays (rendered on top of everything)
    if app.controller.detail().is_some() {
        widgets::mail_view::render(frame, app);
    }
    if app.show_help {
        widgets::help_popup::render(frame, app);
    }
}
