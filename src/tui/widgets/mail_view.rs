//! Detail overlay: the opened message drawn on top of the list.

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use super::centered_rect_exact;
use crate::controller::DetailView;
use crate::i18n;
use crate::model::mail::{format_date_time, Email};
use crate::tui::app::App;
use crate::tui::theme::{current_theme, Theme};

/// Render the overlay if a message is open.
pub fn render(frame: &mut Frame, app: &mut App) {
    let Some(detail) = app.controller.detail() else {
        return;
    };
    let theme = current_theme();
    let screen = frame.area();

    let width = (screen.width * 85 / 100).max(40);
    let height = (screen.height * 85 / 100).max(10);
    let area = centered_rect_exact(width, height, screen);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_detail_title())
        .style(theme.popup);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = match detail {
        DetailView::Loading(_) => vec![Line::from(Span::styled(
            format!("{} {}", app.spinner(), i18n::tui_loading()),
            theme.loading,
        ))],
        DetailView::Ready(email) => build_lines(email, inner.width as usize, &theme),
    };

    let visible_height = inner.height as usize;
    let max_scroll = lines.len().saturating_sub(visible_height);
    app.detail_view_height = visible_height;
    app.detail_scroll_offset = app.detail_scroll_offset.min(max_scroll);
    let scroll = u16::try_from(app.detail_scroll_offset).unwrap_or(u16::MAX);

    let paragraph = Paragraph::new(lines)
        .scroll((scroll, 0))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, inner);
}

fn build_lines(email: &Email, width: usize, theme: &Theme) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let subject = if email.subject.trim().is_empty() {
        i18n::tui_no_subject().to_string()
    } else {
        email.subject.clone()
    };
    lines.push(Line::from(Span::styled(subject, theme.popup_title)));
    lines.push(Line::from(""));

    let sender = email.sender();
    let from = if sender.is_empty() {
        i18n::tui_unknown_sender().to_string()
    } else {
        sender.display()
    };
    lines.push(header_line(i18n::tui_header_from(), from, theme));

    let to = email.recipients();
    if !to.is_empty() {
        lines.push(header_line(i18n::tui_header_to(), to.join(", "), theme));
    }
    lines.push(header_line(
        i18n::tui_header_date(),
        format_date_time(&email.date),
        theme,
    ));

    lines.push(Line::from(Span::styled(
        "\u{2500}".repeat(width),
        theme.border,
    )));
    lines.push(Line::from(""));

    match email.render_body(width.saturating_sub(1)) {
        Some(body) => {
            for line in body.lines() {
                lines.push(Line::from(Span::styled(line.to_string(), theme.message_body)));
            }
        }
        None => lines.push(Line::from(Span::styled(
            i18n::tui_empty_body(),
            theme.list_dim,
        ))),
    }

    lines
}

fn header_line(label: &'static str, value: String, theme: &Theme) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, theme.message_header_label),
        Span::styled(value, theme.message_header_value),
    ])
}
