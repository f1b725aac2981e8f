//! Help popup listing keyboard shortcuts.

use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use super::centered_rect_exact;
use crate::i18n;
use crate::tui::app::App;
use crate::tui::theme::{current_theme, Theme};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Width reserved for the key column.
const KEY_WIDTH: usize = 12;

/// Render the help popup centered on screen.
pub fn render(frame: &mut Frame, _app: &App) {
    let theme = current_theme();
    let screen = frame.area();

    let lines = build_lines(&theme);

    let popup_width = 48u16.min(screen.width.saturating_sub(4));
    let content_height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
    let popup_height = content_height
        .saturating_add(2)
        .min(screen.height.saturating_sub(2));
    let area = centered_rect_exact(popup_width, popup_height, screen);

    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.popup_title)
        .title(i18n::tui_help_title())
        .style(theme.popup);

    let inner = block.inner(area);
    frame.render_widget(block, area);
    frame.render_widget(Paragraph::new(lines), inner);
}

fn build_lines(theme: &Theme) -> Vec<Line<'static>> {
    let shortcuts: [(&str, &str); 10] = [
        ("j / k", i18n::tui_hint_nav()),
        ("Enter", i18n::tui_hint_open()),
        ("Esc", i18n::tui_hint_close()),
        ("n / p  \u{2192} / \u{2190}", i18n::tui_hint_page()),
        ("s", i18n::tui_hint_sync()),
        ("r", i18n::tui_hint_refresh()),
        ("L", i18n::tui_hint_logout()),
        ("Tab", i18n::tui_hint_field()),
        ("?", i18n::tui_hint_help()),
        ("q  Ctrl-C", i18n::tui_hint_quit()),
    ];

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("  {}", i18n::app_name()), theme.popup_title),
            Span::styled(format!("  v{VERSION}"), theme.list_dim),
        ]),
        Line::from(""),
    ];
    for (key, desc) in shortcuts {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<width$}", width = KEY_WIDTH), theme.input),
            Span::styled(desc, theme.popup),
        ]));
    }
    lines
}
