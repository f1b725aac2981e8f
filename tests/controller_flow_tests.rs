//! End-to-end tests of the page controller driven by a scripted backend.
//!
//! Requests are executed inline, in issue order unless a test holds one back
//! to simulate a slow response.

use std::sync::Mutex;

use mailquery::api::{ListQuery, MailApi};
use mailquery::controller::{DetailView, PageController, Phase, Request};
use mailquery::error::{MailError, Result};
use mailquery::model::mail::{Email, EmailId, EmailPage};
use mailquery::store::credentials::{CredentialStore, Credentials, MemoryCredentialStore};

/// Backend with a fixed mailbox and one accepted password.
struct ScriptedApi {
    password: &'static str,
    total: u64,
    reject_message: &'static str,
    fail_detail: bool,
    calls: Mutex<Vec<String>>,
}

impl ScriptedApi {
    fn new(total: u64) -> Self {
        Self {
            password: "pw",
            total,
            reject_message: "邮箱或密码错误",
            fail_detail: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, password: &str) -> Result<()> {
        if password == self.password {
            Ok(())
        } else {
            Err(MailError::Rejected(self.reject_message.to_string()))
        }
    }
}

impl MailApi for ScriptedApi {
    fn verify_credentials(&self, email: &str, password: &str) -> Result<()> {
        self.record(format!("verify {email}"));
        self.check(password)
    }

    fn list_emails(&self, _email: &str, password: &str, query: &ListQuery) -> Result<EmailPage> {
        let kind = if query.sync { "sync" } else { "list" };
        self.record(format!("{kind} {}", query.page));
        self.check(password)?;
        let start = u64::from(query.page - 1) * u64::from(query.page_size);
        let end = (start + u64::from(query.page_size)).min(self.total);
        Ok(EmailPage {
            emails: (start..end)
                .map(|i| Email {
                    id: i + 1,
                    subject: format!("Mail {}", i + 1),
                    from: format!("Sender {} <s{}@x.com>", i + 1, i + 1),
                    ..Default::default()
                })
                .collect(),
            total: self.total,
            page: query.page,
            page_size: query.page_size,
        })
    }

    fn fetch_detail(&self, _email: &str, password: &str, id: EmailId) -> Result<Email> {
        self.record(format!("detail {id}"));
        self.check(password)?;
        if self.fail_detail {
            return Err(MailError::Network("timeout".into()));
        }
        Ok(Email {
            id,
            subject: format!("Mail {id}"),
            text_body: Some("body".into()),
            ..Default::default()
        })
    }
}

/// Execute `request` and every follow-up it triggers.
fn run(ctl: &mut PageController, api: &ScriptedApi, store: &dyn CredentialStore, request: Option<Request>) {
    let mut next = request;
    while let Some(req) = next {
        next = ctl.apply(req.execute(api), store);
    }
}

fn login(api: &ScriptedApi, store: &MemoryCredentialStore) -> PageController {
    let mut ctl = PageController::new();
    let req = ctl.mount(store);
    run(&mut ctl, api, store, req);
    let req = ctl.submit_login("a@x.com", "pw");
    run(&mut ctl, api, store, req);
    ctl
}

#[test]
fn test_login_small_mailbox_has_no_pagination() {
    let api = ScriptedApi::new(3);
    let store = MemoryCredentialStore::new();
    let ctl = login(&api, &store);

    assert_eq!(ctl.phase(), Phase::LoggedIn);
    assert_eq!(ctl.emails().len(), 3);
    assert_eq!(ctl.total_pages(), 1);
    assert!(!ctl.shows_pagination());
    assert_eq!(store.load(), Some(Credentials::new("a@x.com", "pw")));
    assert_eq!(api.calls(), vec!["verify a@x.com", "list 1"]);
}

#[test]
fn test_wrong_password_stays_logged_out_with_server_text() {
    let api = ScriptedApi::new(3);
    let store = MemoryCredentialStore::new();
    let mut ctl = PageController::new();
    ctl.mount(&store);

    let req = ctl.submit_login("a@x.com", "wrong");
    assert!(ctl.is_auth_loading());
    run(&mut ctl, &api, &store, req);

    assert_eq!(ctl.phase(), Phase::LoggedOut);
    assert_eq!(ctl.error(), Some("邮箱或密码错误"));
    assert!(!ctl.is_auth_loading());
    assert_eq!(store.load(), None);

    // A new attempt clears the banner.
    let req = ctl.submit_login("a@x.com", "pw");
    assert_eq!(ctl.error(), None);
    run(&mut ctl, &api, &store, req);
    assert_eq!(ctl.phase(), Phase::LoggedIn);
}

#[test]
fn test_auto_login_with_saved_credentials() {
    let api = ScriptedApi::new(3);
    let store = MemoryCredentialStore::new();
    store.save("a@x.com", "pw").unwrap();

    let mut ctl = PageController::new();
    let req = ctl.mount(&store);
    assert_eq!(ctl.phase(), Phase::AutoLoggingIn);
    run(&mut ctl, &api, &store, req);

    assert_eq!(ctl.phase(), Phase::LoggedIn);
    assert_eq!(ctl.account(), Some("a@x.com"));
    assert_eq!(ctl.emails().len(), 3);
}

#[test]
fn test_corrupt_saved_record_shows_login_form() {
    let api = ScriptedApi::new(3);
    let store = MemoryCredentialStore::with_raw("{broken");
    let mut ctl = PageController::new();
    let req = ctl.mount(&store);

    assert!(req.is_none());
    assert_eq!(ctl.phase(), Phase::LoggedOut);
    assert_eq!(store.raw(), None);
    run(&mut ctl, &api, &store, req);
    assert!(api.calls().is_empty());
}

#[test]
fn test_paging_through_45_emails() {
    let api = ScriptedApi::new(45);
    let store = MemoryCredentialStore::new();
    let mut ctl = login(&api, &store);

    assert_eq!(ctl.total_pages(), 3);
    assert!(ctl.shows_pagination());
    assert!(!ctl.can_go_prev());
    assert!(ctl.can_go_next());

    let req = ctl.next_page();
    run(&mut ctl, &api, &store, req);
    let req = ctl.next_page();
    run(&mut ctl, &api, &store, req);
    assert_eq!(ctl.current_page(), 3);
    assert_eq!(ctl.emails().len(), 5);
    assert_eq!(ctl.emails()[0].id, 41);
    assert!(!ctl.can_go_next());
    assert!(ctl.next_page().is_none());

    let req = ctl.go_to_page(1);
    run(&mut ctl, &api, &store, req);
    assert_eq!(ctl.current_page(), 1);
    assert_eq!(
        api.calls(),
        vec!["verify a@x.com", "list 1", "list 2", "list 3", "list 1"]
    );
}

#[test]
fn test_sync_reloads_current_page() {
    let api = ScriptedApi::new(45);
    let store = MemoryCredentialStore::new();
    let mut ctl = login(&api, &store);
    let req = ctl.next_page();
    run(&mut ctl, &api, &store, req);

    let req = ctl.sync();
    assert!(ctl.is_syncing());
    run(&mut ctl, &api, &store, req);
    assert!(!ctl.is_syncing());
    assert_eq!(ctl.current_page(), 2);
    assert_eq!(api.calls().last().map(String::as_str), Some("sync 2"));
}

#[test]
fn test_refresh_supersedes_slow_page_request() {
    let api = ScriptedApi::new(45);
    let store = MemoryCredentialStore::new();
    let mut ctl = login(&api, &store);

    let slow = ctl.next_page().unwrap();
    let fresh = ctl.refresh();
    run(&mut ctl, &api, &store, fresh);
    // The page-2 response arrives last and is ignored.
    run(&mut ctl, &api, &store, Some(slow));

    assert_eq!(ctl.current_page(), 1);
    assert_eq!(ctl.emails()[0].id, 1);
    assert!(!ctl.is_list_loading());
}

#[test]
fn test_open_and_close_detail() {
    let api = ScriptedApi::new(3);
    let store = MemoryCredentialStore::new();
    let mut ctl = login(&api, &store);

    let req = ctl.open_email(2);
    assert_eq!(ctl.detail(), Some(&DetailView::Loading(2)));
    run(&mut ctl, &api, &store, req);
    assert_eq!(ctl.selected_email().map(|e| e.id), Some(2));

    ctl.close_detail();
    assert!(ctl.detail().is_none());
    // The list is untouched.
    assert_eq!(ctl.emails().len(), 3);
}

#[test]
fn test_detail_failure_closes_overlay_with_banner() {
    let mut api = ScriptedApi::new(3);
    api.fail_detail = true;
    let store = MemoryCredentialStore::new();
    let mut ctl = login(&api, &store);

    let req = ctl.open_email(1);
    run(&mut ctl, &api, &store, req);
    assert!(ctl.detail().is_none());
    assert_eq!(ctl.error(), Some(mailquery::i18n::err_network()));

    ctl.dismiss_error();
    assert_eq!(ctl.error(), None);
}

#[test]
fn test_logout_forgets_everything() {
    let api = ScriptedApi::new(45);
    let store = MemoryCredentialStore::new();
    let mut ctl = login(&api, &store);
    let pending = ctl.next_page();

    ctl.logout(&store);
    run(&mut ctl, &api, &store, pending);

    assert_eq!(ctl.phase(), Phase::LoggedOut);
    assert!(ctl.emails().is_empty());
    assert_eq!(ctl.total(), 0);
    assert_eq!(ctl.current_page(), 1);
    assert_eq!(store.load(), None);
}
