//! Mail list widget: the current page of the mailbox.

use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;
use unicode_width::UnicodeWidthStr;

use super::truncate_str;
use crate::i18n;
use crate::model::mail::{format_date_time, Email};
use crate::tui::app::App;
use crate::tui::theme::{current_theme, Theme};

/// Render the message table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let theme = current_theme();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border.add_modifier(Modifier::BOLD))
        .title(i18n::tui_messages_title());

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height < 2 {
        return;
    }

    let emails = app.controller.emails();
    if emails.is_empty() {
        let text = if app.controller.is_list_loading() {
            i18n::tui_loading()
        } else {
            i18n::msg_no_emails()
        };
        let empty = Paragraph::new(text)
            .style(theme.list_dim)
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    // Header row takes 1 line, rest is data
    let viewport_height = (inner.height as usize).saturating_sub(1);
    app.list_viewport_height = viewport_height;
    app.ensure_selected_visible();

    let mark_w = 1u16;
    let date_w = 19u16;
    let from_w = 22u16.min(inner.width / 4);
    let fixed = mark_w + date_w + from_w + 3;
    let subject_w = inner.width.saturating_sub(fixed);

    let constraints = [
        Constraint::Length(mark_w),
        Constraint::Length(date_w),
        Constraint::Length(from_w),
        Constraint::Min(subject_w),
    ];

    let header = Row::new(vec!["", "Date", "From", "Subject"]);

    let emails = app.controller.emails();
    let start = app.list_scroll_offset.min(emails.len());
    let end = (start + viewport_height).min(emails.len());

    let rows: Vec<Row> = emails[start..end]
        .iter()
        .enumerate()
        .map(|(offset, email)| {
            let is_selected = start + offset == app.selected;
            build_row(email, is_selected, from_w as usize, subject_w as usize, &theme)
        })
        .collect();

    let table = Table::new(rows, constraints)
        .header(header.style(theme.header_bar.add_modifier(Modifier::BOLD)))
        .column_spacing(1);

    frame.render_widget(table, inner);
}

fn build_row<'a>(
    email: &Email,
    is_selected: bool,
    from_w: usize,
    subject_w: usize,
    theme: &Theme,
) -> Row<'a> {
    let mark = if email.is_read { " " } else { "\u{25cf}" }; // ●

    let sender = email.sender();
    let from = if sender.is_empty() {
        i18n::tui_unknown_sender().to_string()
    } else {
        sender.label().to_string()
    };

    let subject = if email.subject.trim().is_empty() {
        i18n::tui_no_subject().to_string()
    } else {
        email.subject.clone()
    };
    let subject = truncate_str(&subject, subject_w);

    // Summary fills whatever the subject leaves.
    let remaining = subject_w.saturating_sub(subject.width() + 3);
    let summary = email.summary_line().replace(['\r', '\n'], " ");
    let mut subject_spans = vec![Span::raw(subject)];
    if remaining > 3 && !summary.trim().is_empty() {
        subject_spans.push(Span::styled(
            format!("  {}", truncate_str(summary.trim(), remaining)),
            theme.list_dim,
        ));
    }

    let style = if is_selected {
        theme.list_selected
    } else if !email.is_read {
        theme.list_unread
    } else {
        theme.list_normal
    };

    Row::new(vec![
        Cell::from(mark),
        Cell::from(format_date_time(&email.date)),
        Cell::from(truncate_str(&from, from_w)),
        Cell::from(Line::from(subject_spans)),
    ])
    .style(style)
}
