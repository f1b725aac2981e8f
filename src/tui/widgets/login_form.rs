//! Login form and the auto-login splash.

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use super::centered_rect_exact;
use crate::i18n;
use crate::tui::app::{App, LoginField};
use crate::tui::theme::{current_theme, Theme};

/// Render the login form centered in `area`.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let form_area = centered_rect_exact(52, 13, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(i18n::tui_login_title())
        .title_alignment(Alignment::Center);
    let inner = block.inner(form_area);
    frame.render_widget(block, form_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // subtitle
            Constraint::Length(3), // email
            Constraint::Length(3), // password
            Constraint::Length(1), // submit
            Constraint::Min(0),
        ])
        .split(inner);

    let subtitle = Paragraph::new(i18n::tui_login_subtitle())
        .style(theme.list_dim)
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, rows[0]);

    let form = &app.login;
    let masked = "*".repeat(form.password.chars().count());
    render_field(
        frame,
        rows[1],
        i18n::tui_login_email(),
        &form.email,
        form.focus == LoginField::Email,
        &theme,
    );
    render_field(
        frame,
        rows[2],
        i18n::tui_login_password(),
        &masked,
        form.focus == LoginField::Password,
        &theme,
    );

    let submit_label = if app.controller.is_auth_loading() {
        format!("{} {}", app.spinner(), i18n::msg_verifying())
    } else {
        i18n::tui_login_submit().to_string()
    };
    let submit = Paragraph::new(Span::styled(submit_label, theme.popup_title))
        .alignment(Alignment::Center);
    frame.render_widget(submit, rows[3]);
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let border = if focused {
        theme.border_focused
    } else {
        theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {label} "));
    let cursor = if focused { "_" } else { "" };
    let text = Paragraph::new(Line::from(vec![
        Span::styled(value.to_string(), theme.input),
        Span::styled(cursor, theme.input),
    ]))
    .block(block);
    frame.render_widget(text, area);
}

/// Splash shown while the saved credentials are being verified.
pub fn render_splash(frame: &mut Frame, app: &App, area: Rect) {
    let theme = current_theme();
    let splash_area = centered_rect_exact(40, 3, area);
    let text = Paragraph::new(Span::styled(
        format!("{} {}", app.spinner(), i18n::msg_auto_login()),
        theme.loading,
    ))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border),
    );
    frame.render_widget(text, splash_area);
}
