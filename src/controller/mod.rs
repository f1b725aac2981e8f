//! Page controller: the whole client-side state machine.
//!
//! ```text
//! AutoLoggingIn ──verify ok──▶ LoggedIn (ListView ⇄ DetailView)
//!       │                          ▲          │
//!   no record / verify failed      │        logout
//!       ▼                          │          │
//!   LoggedOut ─────submit, verify ok┘◀─────────┘
//! ```
//!
//! The controller performs no I/O. Each action returns the [`Request`] it
//! wants executed (if any); the runtime executes it against a
//! [`MailApi`](crate::api::MailApi) and hands the [`Response`] back through
//! [`PageController::apply`]. Requests may complete in any order: each
//! channel only accepts the response to its most recent request.

pub mod pagination;
pub mod request;

use tracing::{debug, info, warn};

use crate::api::{ListQuery, PAGE_SIZE};
use crate::error::MailError;
use crate::i18n;
use crate::model::mail::{Email, EmailId, EmailPage};
use crate::store::credentials::{CredentialStore, Credentials};

pub use self::request::{Channel, Outcome, Request, RequestKind, Response};

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Verifying saved credentials.
    AutoLoggingIn,
    /// Login form.
    LoggedOut,
    /// Mailbox list, possibly with the detail overlay open.
    LoggedIn,
}

/// Contents of the detail overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    /// Opened, waiting for the message.
    Loading(EmailId),
    Ready(Email),
}

impl DetailView {
    pub fn id(&self) -> EmailId {
        match self {
            Self::Loading(id) => *id,
            Self::Ready(email) => email.id,
        }
    }
}

/// Latest issued sequence number per channel; `None` when idle.
#[derive(Debug, Default, Clone, Copy)]
struct InFlight {
    auth: Option<u64>,
    list: Option<u64>,
    detail: Option<u64>,
}

impl InFlight {
    fn slot(&mut self, channel: Channel) -> &mut Option<u64> {
        match channel {
            Channel::Auth => &mut self.auth,
            Channel::List => &mut self.list,
            Channel::Detail => &mut self.detail,
        }
    }
}

/// Client-side state of the mailbox page.
#[derive(Debug)]
pub struct PageController {
    phase: Phase,
    credentials: Option<Credentials>,

    emails: Vec<Email>,
    total: u64,
    current_page: u32,
    detail: Option<DetailView>,
    error: Option<String>,

    sort_by: String,
    sort_order: String,

    next_seq: u64,
    in_flight: InFlight,
    /// The list request in flight is a sync.
    syncing: bool,
}

impl Default for PageController {
    fn default() -> Self {
        Self::new()
    }
}

impl PageController {
    /// Fresh controller. Starts in [`Phase::AutoLoggingIn`] until
    /// [`mount`](Self::mount) decides otherwise.
    pub fn new() -> Self {
        Self {
            phase: Phase::AutoLoggingIn,
            credentials: None,
            emails: Vec::new(),
            total: 0,
            current_page: 1,
            detail: None,
            error: None,
            sort_by: "date".to_string(),
            sort_order: "desc".to_string(),
            next_seq: 1,
            in_flight: InFlight::default(),
            syncing: false,
        }
    }

    /// Override the list ordering sent to the backend.
    pub fn with_order(mut self, sort_by: impl Into<String>, sort_order: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self.sort_order = sort_order.into();
        self
    }

    // ── Accessors ───────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Account in use (or last typed on the login form).
    pub fn account(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.email.as_str())
    }

    /// Emails of the current page, in server order.
    pub fn emails(&self) -> &[Email] {
        &self.emails
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        PAGE_SIZE
    }

    pub fn total_pages(&self) -> u32 {
        pagination::total_pages(self.total, PAGE_SIZE)
    }

    /// Pagination controls are only shown for more than one page.
    pub fn shows_pagination(&self) -> bool {
        self.total_pages() > 1
    }

    pub fn can_go_prev(&self) -> bool {
        self.phase == Phase::LoggedIn && self.current_page > 1 && !self.is_list_loading()
    }

    pub fn can_go_next(&self) -> bool {
        self.phase == Phase::LoggedIn
            && self.current_page < self.total_pages()
            && !self.is_list_loading()
    }

    pub fn detail(&self) -> Option<&DetailView> {
        self.detail.as_ref()
    }

    /// The message shown in the overlay once loaded.
    pub fn selected_email(&self) -> Option<&Email> {
        match &self.detail {
            Some(DetailView::Ready(email)) => Some(email),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_auth_loading(&self) -> bool {
        self.in_flight.auth.is_some()
    }

    pub fn is_list_loading(&self) -> bool {
        self.in_flight.list.is_some()
    }

    pub fn is_syncing(&self) -> bool {
        self.is_list_loading() && self.syncing
    }

    pub fn is_detail_loading(&self) -> bool {
        matches!(self.detail, Some(DetailView::Loading(_)))
    }

    // ── Actions ─────────────────────────────────────────────────

    /// Page load: try the saved credentials, if any.
    pub fn mount(&mut self, store: &dyn CredentialStore) -> Option<Request> {
        match store.load() {
            Some(creds) => {
                info!(email = %creds.email, "Auto-login with saved credentials");
                self.phase = Phase::AutoLoggingIn;
                self.credentials = Some(creds);
                Some(self.issue(RequestKind::Verify { auto: true }))
            }
            None => {
                self.phase = Phase::LoggedOut;
                None
            }
        }
    }

    /// Login form submission.
    pub fn submit_login(&mut self, email: &str, password: &str) -> Option<Request> {
        if self.phase != Phase::LoggedOut || self.is_auth_loading() {
            return None;
        }
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            self.error = Some(i18n::err_missing_fields().to_string());
            return None;
        }
        self.error = None;
        self.credentials = Some(Credentials::new(email, password));
        Some(self.issue(RequestKind::Verify { auto: false }))
    }

    /// Request an arbitrary page. Ignored outside `[1, total_pages]` or
    /// while another list request is in flight.
    pub fn go_to_page(&mut self, page: u32) -> Option<Request> {
        if self.phase != Phase::LoggedIn || self.is_list_loading() {
            return None;
        }
        if !pagination::is_valid_page(page, self.total, PAGE_SIZE) {
            debug!(page, total_pages = self.total_pages(), "Ignoring out-of-range page");
            return None;
        }
        Some(self.issue_list(page, false))
    }

    pub fn next_page(&mut self) -> Option<Request> {
        self.go_to_page(self.current_page.saturating_add(1))
    }

    pub fn prev_page(&mut self) -> Option<Request> {
        self.go_to_page(self.current_page.saturating_sub(1))
    }

    /// Ask the backend to sync the mailbox, then reload the current page.
    pub fn sync(&mut self) -> Option<Request> {
        if self.phase != Phase::LoggedIn || self.is_list_loading() {
            return None;
        }
        Some(self.issue_list(self.current_page, true))
    }

    /// Reload the current page. Supersedes any list request in flight.
    pub fn refresh(&mut self) -> Option<Request> {
        if self.phase != Phase::LoggedIn {
            return None;
        }
        Some(self.issue_list(self.current_page, false))
    }

    /// Open the overlay for a listed email and fetch its detail.
    pub fn open_email(&mut self, id: EmailId) -> Option<Request> {
        if self.phase != Phase::LoggedIn || !self.emails.iter().any(|e| e.id == id) {
            return None;
        }
        self.detail = Some(DetailView::Loading(id));
        Some(self.issue(RequestKind::Detail(id)))
    }

    /// Close the overlay; a detail response still in flight is dropped.
    pub fn close_detail(&mut self) {
        self.detail = None;
        self.in_flight.detail = None;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Forget everything, including the saved credentials.
    pub fn logout(&mut self, store: &dyn CredentialStore) {
        if let Err(e) = store.clear() {
            warn!(error = %e, "Failed to clear saved credentials");
        }
        info!("Logged out");
        self.phase = Phase::LoggedOut;
        self.credentials = None;
        self.emails.clear();
        self.total = 0;
        self.current_page = 1;
        self.detail = None;
        self.error = None;
        self.in_flight = InFlight::default();
        self.syncing = false;
    }

    // ── Responses ───────────────────────────────────────────────

    /// Apply a finished request. May return a follow-up request (the first
    /// list load after a successful login).
    pub fn apply(&mut self, response: Response, store: &dyn CredentialStore) -> Option<Request> {
        let channel = response.outcome.channel();
        let slot = self.in_flight.slot(channel);
        if *slot != Some(response.seq) {
            debug!(seq = response.seq, ?channel, "Dropping stale response");
            return None;
        }
        *slot = None;

        match response.outcome {
            Outcome::Verified { auto, result } => self.on_verified(auto, result, store),
            Outcome::Listed { query, result } => {
                self.on_listed(&query, result);
                None
            }
            Outcome::Detail { id, result } => {
                self.on_detail(id, result);
                None
            }
        }
    }

    fn on_verified(
        &mut self,
        auto: bool,
        result: Result<(), MailError>,
        store: &dyn CredentialStore,
    ) -> Option<Request> {
        match result {
            Ok(()) => {
                if !auto {
                    if let Some(creds) = &self.credentials {
                        if let Err(e) = store.save(&creds.email, &creds.password) {
                            warn!(error = %e, "Failed to save credentials");
                        }
                    }
                }
                self.phase = Phase::LoggedIn;
                Some(self.issue_list(1, false))
            }
            Err(e) if auto => {
                info!(error = %e, "Auto-login failed");
                if let Err(e) = store.clear() {
                    warn!(error = %e, "Failed to clear saved credentials");
                }
                self.phase = Phase::LoggedOut;
                None
            }
            Err(e) => {
                self.error = Some(e.user_message());
                None
            }
        }
    }

    fn on_listed(&mut self, query: &ListQuery, result: Result<EmailPage, MailError>) {
        self.syncing = false;
        match result {
            Ok(page) => {
                self.emails = page.emails;
                self.total = page.total;
                self.current_page = query.page.clamp(1, self.total_pages());
            }
            Err(e) => self.error = Some(e.user_message()),
        }
    }

    fn on_detail(&mut self, id: EmailId, result: Result<Email, MailError>) {
        match result {
            Ok(email) => self.detail = Some(DetailView::Ready(email)),
            Err(e) => {
                warn!(id, error = %e, "Failed to load email detail");
                self.detail = None;
                self.error = Some(e.user_message());
            }
        }
    }

    // ── Internals ───────────────────────────────────────────────

    fn issue_list(&mut self, page: u32, sync: bool) -> Request {
        self.syncing = sync;
        let query = ListQuery::page(page)
            .with_sync(sync)
            .with_order(self.sort_by.clone(), self.sort_order.clone());
        self.issue(RequestKind::List(query))
    }

    /// Allocate a sequence number and mark `kind`'s channel busy with it.
    fn issue(&mut self, kind: RequestKind) -> Request {
        let seq = self.next_seq;
        self.next_seq += 1;
        *self.in_flight.slot(kind.channel()) = Some(seq);
        debug!(seq, ?kind, "Issuing request");
        Request {
            seq,
            credentials: self.credentials.clone().unwrap_or_else(|| Credentials::new("", "")),
            kind,
        }
    }
}
