//! Keyboard event handling.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::App;
use crate::controller::Phase;

/// Process a key event and update the application state.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> anyhow::Result<()> {
    // Ctrl+C always quits, from any screen
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return Ok(());
    }

    // ── Popup handling (captures all keys) ────────────────
    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return Ok(());
    }

    match app.controller.phase() {
        Phase::AutoLoggingIn => {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                app.should_quit = true;
            }
        }
        Phase::LoggedOut => handle_login_keys(app, key),
        Phase::LoggedIn if app.controller.detail().is_some() => handle_detail_keys(app, key),
        Phase::LoggedIn => handle_list_keys(app, key),
    }
    Ok(())
}

/// The login form captures printable keys as text.
fn handle_login_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if app.controller.error().is_some() {
                app.controller.dismiss_error();
            } else {
                app.should_quit = true;
            }
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
            app.login.toggle_focus();
        }
        KeyCode::Enter => app.submit_login(),
        KeyCode::Backspace => {
            app.login.focused_mut().pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.login.focused_mut().push(c);
        }
        _ => {}
    }
}

fn handle_list_keys(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.controller.dismiss_error(),
        KeyCode::Char('j') | KeyCode::Down => app.move_selection(1),
        KeyCode::Char('k') | KeyCode::Up => app.move_selection(-1),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        KeyCode::PageDown => {
            let page = isize::try_from(app.list_viewport_height).unwrap_or(1);
            app.move_selection(page);
        }
        KeyCode::PageUp => {
            let page = isize::try_from(app.list_viewport_height).unwrap_or(1);
            app.move_selection(-page);
        }
        KeyCode::Enter => app.open_selected(),
        KeyCode::Char('n') | KeyCode::Right => app.next_page(),
        KeyCode::Char('p') | KeyCode::Left => app.prev_page(),
        KeyCode::Char('s') => app.sync(),
        KeyCode::Char('r') => app.refresh(),
        KeyCode::Char('L') => app.logout(),
        _ => {}
    }
}

fn handle_detail_keys(app: &mut App, key: KeyEvent) {
    let page = isize::try_from(app.detail_view_height.saturating_sub(2).max(1)).unwrap_or(1);
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc | KeyCode::Backspace => app.close_detail(),
        KeyCode::Char('j') | KeyCode::Down => app.scroll_detail(1),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_detail(-1),
        KeyCode::PageDown | KeyCode::Char(' ') => app.scroll_detail(page),
        KeyCode::PageUp => app.scroll_detail(-page),
        KeyCode::Char('g') | KeyCode::Home => app.detail_scroll_offset = 0,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::api::{ListQuery, MailApi};
    use crate::controller::PageController;
    use crate::error::{MailError, Result};
    use crate::model::mail::{Email, EmailId, EmailPage};
    use crate::store::credentials::MemoryCredentialStore;

    /// Backend that is never reachable.
    struct Offline;

    impl MailApi for Offline {
        fn verify_credentials(&self, _: &str, _: &str) -> Result<()> {
            Err(MailError::Network("offline".into()))
        }
        fn list_emails(&self, _: &str, _: &str, _: &ListQuery) -> Result<EmailPage> {
            Err(MailError::Network("offline".into()))
        }
        fn fetch_detail(&self, _: &str, _: &str, _: EmailId) -> Result<Email> {
            Err(MailError::Network("offline".into()))
        }
    }

    fn logged_out_app() -> App {
        App::new(
            PageController::new(),
            Box::new(MemoryCredentialStore::new()),
            Arc::new(Offline),
        )
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE)).unwrap();
    }

    #[test]
    fn test_typing_fills_focused_field() {
        let mut app = logged_out_app();
        for c in "a@x.com".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Tab);
        for c in "pwq".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);

        assert_eq!(app.login.email, "a@x.com");
        assert_eq!(app.login.password, "pw");
        // 'q' is text on the login form, not quit.
        assert!(!app.should_quit);
    }

    #[test]
    fn test_empty_submit_then_dismiss() {
        let mut app = logged_out_app();
        press(&mut app, KeyCode::Enter);
        assert!(app.controller.error().is_some());

        press(&mut app, KeyCode::Esc);
        assert!(app.controller.error().is_none());
        assert!(!app.should_quit);

        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = logged_out_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        )
        .unwrap();
        assert!(app.should_quit);
        assert!(app.login.email.is_empty());
    }
}
