//! Colors for the TUI.

use ratatui::style::{Color, Modifier, Style};

/// Styles shared by every screen.
pub struct Theme {
    pub header_bar: Style,
    pub status_bar: Style,
    pub list_selected: Style,
    pub list_unread: Style,
    pub list_normal: Style,
    pub list_dim: Style,
    pub message_header_label: Style,
    pub message_header_value: Style,
    pub message_body: Style,
    pub border: Style,
    pub border_focused: Style,
    pub popup: Style,
    pub popup_title: Style,
    pub input: Style,
    pub error_banner: Style,
    pub loading: Style,
}

impl Theme {
    /// Dark theme (default).
    pub fn dark() -> Self {
        Self {
            header_bar: Style::default()
                .fg(Color::Rgb(200, 200, 220))
                .bg(Color::Rgb(30, 30, 46)),
            status_bar: Style::default()
                .fg(Color::Rgb(150, 150, 170))
                .bg(Color::Rgb(30, 30, 46)),
            list_selected: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(60, 60, 100)),
            list_unread: Style::default()
                .fg(Color::Rgb(230, 230, 245))
                .add_modifier(Modifier::BOLD),
            list_normal: Style::default().fg(Color::Rgb(200, 200, 220)),
            list_dim: Style::default().fg(Color::Rgb(120, 120, 140)),
            message_header_label: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            message_header_value: Style::default().fg(Color::Rgb(220, 220, 230)),
            message_body: Style::default().fg(Color::Rgb(220, 220, 230)),
            border: Style::default().fg(Color::Rgb(80, 80, 100)),
            border_focused: Style::default().fg(Color::Rgb(130, 170, 255)),
            popup: Style::default()
                .fg(Color::Rgb(220, 220, 230))
                .bg(Color::Rgb(20, 20, 35)),
            popup_title: Style::default()
                .fg(Color::Rgb(130, 170, 255))
                .add_modifier(Modifier::BOLD),
            input: Style::default().fg(Color::Yellow),
            error_banner: Style::default()
                .fg(Color::White)
                .bg(Color::Rgb(150, 40, 40))
                .add_modifier(Modifier::BOLD),
            loading: Style::default().fg(Color::Cyan),
        }
    }
}

/// Return the active theme.
pub fn current_theme() -> Theme {
    Theme::dark()
}
