//! Global application state for the TUI (the "Model" in Elm architecture).
//!
//! [`App`] wraps the [`PageController`] with the state that only matters to
//! the terminal: form input, list cursor, scroll offsets, popups.

use std::sync::Arc;
#[cfg(test)]
use std::time::Duration;
use std::time::Instant;

use crate::api::MailApi;
use crate::controller::{PageController, Phase, Request};
use crate::i18n;
use crate::model::mail::Email;
use crate::store::credentials::CredentialStore;
use crate::tui::worker::Worker;

/// Which login field receives typed characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

/// Login form input.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub focus: LoginField,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            focus: LoginField::Email,
        }
    }
}

impl LoginForm {
    /// The field under the cursor.
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Email => &mut self.email,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Email => LoginField::Password,
            LoginField::Password => LoginField::Email,
        };
    }
}

/// Complete TUI state.
pub struct App {
    // ── Domain ────────────────────────────────
    pub controller: PageController,
    store: Box<dyn CredentialStore>,
    worker: Worker,

    // ── Login screen ──────────────────────────
    pub login: LoginForm,

    // ── List navigation ───────────────────────
    /// Cursor row within the current page.
    pub selected: usize,
    /// Scroll offset for the list widget.
    pub list_scroll_offset: usize,
    /// Cached viewport height for the list (set during render).
    pub list_viewport_height: usize,

    // ── Detail overlay ────────────────────────
    pub detail_scroll_offset: usize,
    /// Cached inner height of the overlay (set during render).
    pub detail_view_height: usize,

    // ── Lifecycle ─────────────────────────────
    pub show_help: bool,
    pub should_quit: bool,
    /// Transient status message and the instant it was set.
    pub status_message: Option<(String, Instant)>,
    /// Frame counter driving the loading spinner.
    pub spinner_frame: usize,
}

impl App {
    /// Create the app and run the mount step (auto-login if a record exists).
    pub fn new(
        controller: PageController,
        store: Box<dyn CredentialStore>,
        api: Arc<dyn MailApi>,
    ) -> Self {
        let mut app = Self {
            controller,
            store,
            worker: Worker::new(api),
            login: LoginForm::default(),
            selected: 0,
            list_scroll_offset: 0,
            list_viewport_height: 20,
            detail_scroll_offset: 0,
            detail_view_height: 20,
            show_help: false,
            should_quit: false,
            status_message: None,
            spinner_frame: 0,
        };
        let request = app.controller.mount(app.store.as_ref());
        app.dispatch(request);
        app
    }

    fn dispatch(&mut self, request: Option<Request>) {
        if let Some(request) = request {
            self.worker.dispatch(request);
        }
    }

    /// Apply every finished request. Returns `true` if anything changed.
    pub fn poll_responses(&mut self) -> bool {
        let mut changed = false;
        while let Some(response) = self.worker.try_next() {
            self.on_response(response);
            changed = true;
        }
        changed
    }

    /// Block until one response arrives (or `timeout` passes) and apply it.
    #[cfg(test)]
    pub fn wait_response(&mut self, timeout: Duration) -> bool {
        match self.worker.wait_next(timeout) {
            Some(response) => {
                self.on_response(response);
                true
            }
            None => false,
        }
    }

    /// Requests still running in the background.
    pub fn pending_requests(&self) -> usize {
        self.worker.pending()
    }

    fn on_response(&mut self, response: crate::controller::Response) {
        let was_logged_in = self.controller.phase() == Phase::LoggedIn;
        let follow_up = self.controller.apply(response, self.store.as_ref());
        self.dispatch(follow_up);

        match self.controller.phase() {
            Phase::LoggedIn if !was_logged_in => {
                self.login.password.clear();
                self.selected = 0;
            }
            // Saved login was refused: prefill the form with its address.
            Phase::LoggedOut if self.login.email.is_empty() => {
                if let Some(account) = self.controller.account() {
                    self.login.email = account.to_string();
                }
            }
            _ => {}
        }
        self.clamp_selection();
    }

    // ── Login ─────────────────────────────────

    pub fn submit_login(&mut self) {
        let request = self
            .controller
            .submit_login(&self.login.email, &self.login.password);
        self.dispatch(request);
    }

    // ── List ──────────────────────────────────

    /// The email under the list cursor.
    pub fn current_email(&self) -> Option<&Email> {
        self.controller.emails().get(self.selected)
    }

    pub fn move_selection(&mut self, delta: isize) {
        let count = self.controller.emails().len();
        if count == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected.saturating_add_signed(delta).min(count - 1);
        self.selected = next;
        self.ensure_selected_visible();
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.ensure_selected_visible();
    }

    pub fn select_last(&mut self) {
        self.selected = self.controller.emails().len().saturating_sub(1);
        self.ensure_selected_visible();
    }

    pub fn open_selected(&mut self) {
        if let Some(id) = self.current_email().map(|e| e.id) {
            self.detail_scroll_offset = 0;
            let request = self.controller.open_email(id);
            self.dispatch(request);
        }
    }

    pub fn close_detail(&mut self) {
        self.controller.close_detail();
        self.detail_scroll_offset = 0;
    }

    pub fn next_page(&mut self) {
        let request = self.controller.next_page();
        self.dispatch(request);
    }

    pub fn prev_page(&mut self) {
        let request = self.controller.prev_page();
        self.dispatch(request);
    }

    pub fn sync(&mut self) {
        let request = self.controller.sync();
        self.dispatch(request);
    }

    pub fn refresh(&mut self) {
        let request = self.controller.refresh();
        self.dispatch(request);
    }

    pub fn logout(&mut self) {
        self.controller.logout(self.store.as_ref());
        self.login = LoginForm::default();
        self.selected = 0;
        self.list_scroll_offset = 0;
        self.detail_scroll_offset = 0;
        self.set_status(i18n::msg_logged_out());
    }

    /// Keep the cursor on an existing row after the list changed.
    fn clamp_selection(&mut self) {
        let count = self.controller.emails().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
        if self.list_scroll_offset >= count {
            self.list_scroll_offset = 0;
        }
        self.ensure_selected_visible();
    }

    /// Ensure the selected row is visible given the current scroll offset.
    pub fn ensure_selected_visible(&mut self) {
        let vp = self.list_viewport_height.max(1);
        if self.selected < self.list_scroll_offset {
            self.list_scroll_offset = self.selected;
        } else if self.selected >= self.list_scroll_offset + vp {
            self.list_scroll_offset = self.selected.saturating_sub(vp - 1);
        }
    }

    // ── Detail ────────────────────────────────

    pub fn scroll_detail(&mut self, delta: isize) {
        self.detail_scroll_offset = self.detail_scroll_offset.saturating_add_signed(delta);
    }

    // ── Housekeeping ──────────────────────────

    /// Set a transient status message that auto-clears after a few seconds.
    pub fn set_status(&mut self, msg: &str) {
        self.status_message = Some((msg.to_string(), Instant::now()));
    }

    /// Called every tick: advances the spinner and clears expired status messages.
    pub fn tick(&mut self) {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        if let Some((_, when)) = &self.status_message {
            if when.elapsed().as_secs() >= 5 {
                self.status_message = None;
            }
        }
    }

    /// Current spinner glyph.
    pub fn spinner(&self) -> char {
        const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
        FRAMES[self.spinner_frame % FRAMES.len()]
    }
}
