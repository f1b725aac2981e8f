//! Email records as returned by the public mail API.

use chrono::{DateTime, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::address::{parse_recipients, parse_sender, ParsedSender};

/// Backend-assigned message identifier.
pub type EmailId = u64;

/// Number of characters of the text body used when no preview is present.
const SUMMARY_CHARS: usize = 100;

/// One mailbox message.
///
/// Only ever built by deserializing an API response; a fresh fetch replaces
/// the whole value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    pub id: EmailId,
    pub subject: String,
    /// Raw sender; see [`parse_sender`].
    pub from: String,
    /// Raw recipients; see [`parse_recipients`].
    pub to: String,
    pub date: String,
    pub preview: Option<String>,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    pub is_read: bool,
    pub is_starred: bool,
}

impl Email {
    /// Parsed sender. Recomputed on every call.
    pub fn sender(&self) -> ParsedSender {
        parse_sender(&self.from)
    }

    /// Parsed recipient addresses. Recomputed on every call.
    pub fn recipients(&self) -> Vec<String> {
        parse_recipients(&self.to)
    }

    /// One-line excerpt for list rows: the preview, else the start of the
    /// text body, else empty.
    pub fn summary_line(&self) -> String {
        if let Some(preview) = self.preview.as_deref().filter(|p| !p.is_empty()) {
            return preview.to_string();
        }
        self.text_body
            .as_deref()
            .map(|body| body.chars().take(SUMMARY_CHARS).collect())
            .unwrap_or_default()
    }

    /// Body rendered for a terminal of `width` columns.
    ///
    /// HTML is preferred and converted to text; the plain-text body is used
    /// otherwise. Returns `None` when the message has no body at all.
    pub fn render_body(&self, width: usize) -> Option<String> {
        if let Some(html) = self.html_body.as_deref().filter(|h| !h.is_empty()) {
            match html2text::from_read(html.as_bytes(), width.max(20)) {
                Ok(text) => return Some(text),
                Err(e) => {
                    tracing::warn!(id = self.id, error = %e, "Failed to render HTML body");
                }
            }
        }
        self.text_body
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}

/// One page of a list response (`data` of `/public/emails/list`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailPage {
    pub emails: Vec<Email>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

/// Format a backend date string as `YYYY-MM-DD HH:MM:SS` in local time.
///
/// Empty input yields `"-"`; anything unparseable is returned unchanged.
pub fn format_date_time(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return "-".to_string();
    }
    const OUT: &str = "%Y-%m-%d %H:%M:%S";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(OUT).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.with_timezone(&Local).format(OUT).to_string();
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return naive.format(OUT).to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_missing_fields() {
        let email: Email = serde_json::from_str(r#"{"id":7,"subject":"Hi"}"#).unwrap();
        assert_eq!(email.id, 7);
        assert_eq!(email.subject, "Hi");
        assert!(email.from.is_empty());
        assert!(email.html_body.is_none());
        assert!(!email.is_read);
    }

    #[test]
    fn test_deserialize_page_without_emails() {
        let page: EmailPage = serde_json::from_str(r#"{"total":0,"page":1}"#).unwrap();
        assert!(page.emails.is_empty());
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_summary_line_prefers_preview() {
        let email = Email {
            preview: Some("short".into()),
            text_body: Some("long body".into()),
            ..Default::default()
        };
        assert_eq!(email.summary_line(), "short");
    }

    #[test]
    fn test_summary_line_truncates_body() {
        let email = Email {
            text_body: Some("x".repeat(250)),
            ..Default::default()
        };
        assert_eq!(email.summary_line().chars().count(), 100);
        assert_eq!(Email::default().summary_line(), "");
    }

    #[test]
    fn test_render_body_prefers_html() {
        let email = Email {
            html_body: Some("<p>Hello <b>world</b></p>".into()),
            text_body: Some("plain".into()),
            ..Default::default()
        };
        let body = email.render_body(80).unwrap();
        assert!(body.contains("Hello"));
        assert!(body.contains("world"));
        assert!(!body.contains("<p>"));
    }

    #[test]
    fn test_render_body_falls_back_to_text() {
        let email = Email {
            html_body: Some(String::new()),
            text_body: Some("plain".into()),
            ..Default::default()
        };
        assert_eq!(email.render_body(80).as_deref(), Some("plain"));
        assert_eq!(Email::default().render_body(80), None);
    }

    #[test]
    fn test_format_date_time() {
        assert_eq!(format_date_time(""), "-");
        assert_eq!(format_date_time("2024-03-01 08:15:00"), "2024-03-01 08:15:00");
        assert_eq!(format_date_time("not a date"), "not a date");
        // RFC 3339 is converted to local time; only check the shape.
        let s = format_date_time("2024-03-01T08:15:00Z");
        assert_eq!(s.len(), "2024-03-01 08:15:00".len());
    }
}
