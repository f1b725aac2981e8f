//! Top header bar showing the account and mailbox size.

use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use crate::controller::Phase;
use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::current_theme;

/// Render the top header bar.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();

    let mut spans = vec![Span::styled(format!(" {}", i18n::app_name()), theme.header_bar)];

    if app.controller.phase() == Phase::LoggedIn {
        if let Some(account) = app.controller.account() {
            spans.push(Span::styled(format!(" | {account}"), theme.header_bar));
        }
        spans.push(Span::styled(
            format!(" | {}", i18n::total_emails(app.controller.total())),
            theme.header_bar,
        ));
        if app.controller.is_syncing() {
            spans.push(Span::styled(
                format!(" | {} {}", app.spinner(), i18n::msg_syncing()),
                theme.header_bar,
            ));
        }
    }

    // Right-aligned help hint
    let left_len: usize = spans.iter().map(|s| s.content.width()).sum();
    let right_text = i18n::tui_help_hint();
    let right_len = right_text.width();
    let width = area.width as usize;
    if width > left_len + right_len {
        spans.push(Span::styled(
            " ".repeat(width - left_len - right_len),
            theme.header_bar,
        ));
    }
    spans.push(Span::styled(right_text, theme.header_bar));

    let bar = Paragraph::new(Line::from(spans)).style(theme.header_bar);
    frame.render_widget(bar, area);
}
