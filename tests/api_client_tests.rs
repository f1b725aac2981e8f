//! Integration tests for the HTTP mail client against a mock server.

use std::time::Duration;

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

use mailquery::api::client::HttpMailApi;
use mailquery::api::{ListQuery, MailApi};
use mailquery::error::MailError;

fn client(server: &ServerGuard) -> HttpMailApi {
    HttpMailApi::new(&format!("{}/api/v1", server.url()), Duration::from_secs(5)).unwrap()
}

#[test]
fn test_verify_accepts_success_envelope() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/v1/public/emails/verify")
        .match_body(Matcher::Json(json!({"email": "a@x.com", "password": "pw"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true}"#)
        .create();

    client(&server).verify_credentials("a@x.com", "pw").unwrap();
    mock.assert();
}

#[test]
fn test_verify_rejection_keeps_server_message() {
    let mut server = Server::new();
    server
        .mock("POST", "/api/v1/public/emails/verify")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false, "message": "邮箱或密码错误"}"#)
        .create();

    let err = client(&server)
        .verify_credentials("a@x.com", "bad")
        .unwrap_err();
    assert!(matches!(&err, MailError::Rejected(m) if m == "邮箱或密码错误"));
    assert_eq!(err.user_message(), "邮箱或密码错误");
}

#[test]
fn test_undecodable_body_is_network_error() {
    let mut server = Server::new();
    server
        .mock("POST", "/api/v1/public/emails/verify")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create();

    let err = client(&server)
        .verify_credentials("a@x.com", "pw")
        .unwrap_err();
    assert!(matches!(err, MailError::Network(_)));
}

#[test]
fn test_unreachable_server_is_network_error() {
    // Nothing listens on port 9 (discard) in the test environment.
    let api = HttpMailApi::new("http://127.0.0.1:9/api/v1", Duration::from_secs(2)).unwrap();
    let err = api.verify_credentials("a@x.com", "pw").unwrap_err();
    assert!(matches!(err, MailError::Network(_)));
}

#[test]
fn test_list_sends_page_and_order() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/v1/public/emails/list")
        .match_body(Matcher::PartialJson(json!({
            "email": "a@x.com",
            "page": 2,
            "page_size": 20,
            "sort_by": "date",
            "sort_order": "desc",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": {
                    "emails": [
                        {"id": 21, "subject": "Hi", "from": "Bob <bob@x.com>", "date": "2024-05-01T08:00:00Z", "is_read": false},
                        {"id": 22, "subject": "", "from": "carol@x.com"}
                    ],
                    "total": 45,
                    "page": 2,
                    "page_size": 20
                }
            })
            .to_string(),
        )
        .create();

    let page = client(&server)
        .list_emails("a@x.com", "pw", &ListQuery::page(2))
        .unwrap();
    mock.assert();

    assert_eq!(page.total, 45);
    assert_eq!(page.page, 2);
    assert_eq!(page.emails.len(), 2);
    assert_eq!(page.emails[0].sender().name, "Bob");
    assert_eq!(page.emails[1].sender().address, "carol@x.com");
}

#[test]
fn test_sync_posts_to_sync_and_list() {
    let mut server = Server::new();
    let plain = server
        .mock("POST", "/api/v1/public/emails/list")
        .expect(0)
        .create();
    let sync = server
        .mock("POST", "/api/v1/public/emails/sync-and-list")
        .match_body(Matcher::PartialJson(json!({"page": 1})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": true, "data": {"emails": [], "total": 0, "page": 1, "page_size": 20}}"#)
        .create();

    let page = client(&server)
        .list_emails("a@x.com", "pw", &ListQuery::page(1).with_sync(true))
        .unwrap();
    assert!(page.emails.is_empty());
    sync.assert();
    plain.assert();
}

#[test]
fn test_list_failure_without_message_uses_fallback() {
    mailquery::i18n::set_lang(mailquery::i18n::Lang::En);
    let mut server = Server::new();
    server
        .mock("POST", "/api/v1/public/emails/list")
        .with_status(500)
        .with_header("content-type", "application/json")
        .with_body(r#"{"success": false}"#)
        .create();

    let err = client(&server)
        .list_emails("a@x.com", "pw", &ListQuery::page(1))
        .unwrap_err();
    assert_eq!(err.user_message(), mailquery::i18n::err_load_list());
}

#[test]
fn test_detail_returns_bodies() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/v1/public/emails/detail")
        .match_body(Matcher::PartialJson(json!({"email_id": 7})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "success": true,
                "data": {
                    "id": 7,
                    "subject": "Report",
                    "from": "{\"name\": \"Ann\", \"address\": \"ann@x.com\"}",
                    "to": "[\"a@x.com\", \"b@x.com\"]",
                    "html_body": "<p>Hello <b>there</b></p>"
                }
            })
            .to_string(),
        )
        .create();

    let email = client(&server).fetch_detail("a@x.com", "pw", 7).unwrap();
    mock.assert();

    assert_eq!(email.id, 7);
    assert_eq!(email.sender().display(), "Ann <ann@x.com>");
    assert_eq!(email.recipients(), vec!["a@x.com", "b@x.com"]);
    let body = email.render_body(80).unwrap();
    assert!(body.contains("Hello"));
    assert!(body.contains("there"));
}
