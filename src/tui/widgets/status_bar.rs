//! Bottom status bar: error banner, transient message or keyboard hints,
//! with the page indicator on the right.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::controller::Phase;
use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the status bar at the bottom.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let right_text = right_text(app);
    let right_width = (right_text.width() as u16).min(area.width / 2);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(right_width)])
        .split(area);

    // The error banner wins over everything else until dismissed.
    let content = if let Some(err) = app.controller.error() {
        Line::from(vec![
            Span::styled(format!(" {err} "), theme.error_banner),
            Span::styled(format!("  Esc:{}", i18n::tui_hint_dismiss()), theme.status_bar),
        ])
    } else if let Some(msg) = loading_message(app) {
        Line::from(Span::styled(
            format!(" {} {msg}", app.spinner()),
            theme.loading,
        ))
    } else if let Some((msg, _)) = &app.status_message {
        Line::from(Span::styled(format!(" {msg}"), theme.status_bar))
    } else {
        let mut spans = Vec::new();
        for (i, (key, desc)) in build_hints(app).iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" ", theme.status_bar));
            }
            spans.push(Span::styled(format!(" {key}"), theme.input));
            spans.push(Span::styled(format!(":{desc}"), theme.status_bar));
        }
        Line::from(spans)
    };

    let bar = Paragraph::new(content).style(theme.status_bar);
    frame.render_widget(bar, chunks[0]);

    let right = Paragraph::new(Line::from(Span::styled(right_text, theme.status_bar)))
        .alignment(Alignment::Right)
        .style(theme.status_bar);
    frame.render_widget(right, chunks[1]);
}

/// Page indicator when there is more than one page.
fn right_text(app: &App) -> String {
    let ctl = &app.controller;
    if ctl.phase() == Phase::LoggedIn && ctl.shows_pagination() {
        format!("{} ", i18n::page_indicator(ctl.current_page(), ctl.total_pages()))
    } else {
        String::new()
    }
}

/// What the app is waiting for, if anything.
fn loading_message(app: &App) -> Option<&'static str> {
    let ctl = &app.controller;
    match ctl.phase() {
        Phase::AutoLoggingIn => Some(i18n::msg_auto_login()),
        Phase::LoggedOut if ctl.is_auth_loading() => Some(i18n::msg_verifying()),
        Phase::LoggedIn if ctl.is_syncing() => Some(i18n::msg_syncing()),
        Phase::LoggedIn if ctl.is_list_loading() => Some(i18n::msg_loading_emails()),
        _ => None,
    }
}

/// Context-sensitive (key, description) pairs.
fn build_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let ctl = &app.controller;
    let mut hints = Vec::new();

    match ctl.phase() {
        Phase::AutoLoggingIn => {
            hints.push(("q", i18n::tui_hint_quit()));
        }
        Phase::LoggedOut => {
            hints.push(("Tab", i18n::tui_hint_field()));
            hints.push(("Enter", i18n::tui_hint_submit()));
            hints.push(("Esc", i18n::tui_hint_quit()));
        }
        Phase::LoggedIn if ctl.detail().is_some() => {
            hints.push(("j/k", i18n::tui_hint_scroll()));
            hints.push(("Esc", i18n::tui_hint_close()));
            hints.push(("q", i18n::tui_hint_quit()));
        }
        Phase::LoggedIn => {
            hints.push(("j/k", i18n::tui_hint_nav()));
            hints.push(("Enter", i18n::tui_hint_open()));
            if ctl.shows_pagination() {
                hints.push(("n/p", i18n::tui_hint_page()));
            }
            hints.push(("s", i18n::tui_hint_sync()));
            hints.push(("r", i18n::tui_hint_refresh()));
            hints.push(("L", i18n::tui_hint_logout()));
            hints.push(("?", i18n::tui_hint_help()));
            hints.push(("q", i18n::tui_hint_quit()));
        }
    }

    hints
}
