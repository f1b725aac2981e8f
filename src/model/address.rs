//! Sender and recipient parsing for the loosely structured `from` / `to`
//! strings returned by the backend.
//!
//! Depending on how a message was stored, the backend hands out:
//! - a JSON object: `{"name":"Bob","address":"bob@example.com"}`
//! - a mailbox: `Bob <bob@example.com>` or `"Bob" <bob@example.com>`
//! - a bare address: `bob@example.com`
//! - a JSON array or comma-separated list (recipients only)
//!
//! Parsing never fails. Unrecognized input degrades to a best-effort value.

use serde_json::{Map, Value};

/// Sender of a message, derived from `Email::from`.
///
/// # Examples
/// - `"Alice <a@x.com>"` → `name = "Alice"`, `address = "a@x.com"`
/// - `"a@x.com"` → `name = ""`, `address = "a@x.com"`
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct ParsedSender {
    /// Human-readable display name (may be empty).
    pub name: String,
    /// The bare email address (may be empty).
    pub address: String,
}

impl ParsedSender {
    fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// `true` when neither a name nor an address could be recovered.
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.address.is_empty()
    }

    /// Format for the detail header: `"Name <address>"`, or whichever part exists.
    pub fn display(&self) -> String {
        match (self.name.is_empty(), self.address.is_empty()) {
            (false, false) => format!("{} <{}>", self.name, self.address),
            (false, true) => self.name.clone(),
            _ => self.address.clone(),
        }
    }

    /// Short label for list rows: the name, else the address.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.address
        } else {
            &self.name
        }
    }
}

impl std::fmt::Display for ParsedSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// One sender-parsing attempt: `None` means "not my format, try the next".
type SenderExtractor = fn(&str) -> Option<ParsedSender>;

/// Sender formats in precedence order. The first extractor returning
/// `Some` wins; the last one always matches.
const SENDER_EXTRACTORS: &[(&str, SenderExtractor)] = &[
    ("empty", sender_from_empty),
    ("json-object", sender_from_json),
    ("angle-addr", sender_from_angle_addr),
    ("bare-address", sender_from_bare_address),
    ("name-only", sender_from_name_only),
];

/// Parse the raw `from` field of an email.
pub fn parse_sender(raw: &str) -> ParsedSender {
    SENDER_EXTRACTORS
        .iter()
        .find_map(|(_, extract)| extract(raw))
        .unwrap_or_default()
}

/// Name of the extractor that recognizes `raw`.
#[cfg(test)]
fn sender_format(raw: &str) -> &'static str {
    SENDER_EXTRACTORS
        .iter()
        .find(|(_, extract)| extract(raw).is_some())
        .map(|(name, _)| *name)
        .unwrap_or("name-only")
}

fn sender_from_empty(raw: &str) -> Option<ParsedSender> {
    raw.is_empty().then(ParsedSender::default)
}

fn sender_from_json(raw: &str) -> Option<ParsedSender> {
    let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(raw) else {
        return None;
    };
    let name = non_empty_str(&obj, "name").unwrap_or_default();
    let address = address_of(&obj).unwrap_or_default();
    Some(ParsedSender::new(name, address))
}

/// `Display Name <addr>` where everything before the trailing `<addr>` is
/// the name.
fn sender_from_angle_addr(raw: &str) -> Option<ParsedSender> {
    let trimmed = raw.trim();
    let inner_end = trimmed.strip_suffix('>')?;
    let open = inner_end.rfind('<')?;
    let address = inner_end[open + 1..].trim();
    if address.is_empty() || address.contains('>') {
        return None;
    }
    let name = strip_quotes(&inner_end[..open]);
    Some(ParsedSender::new(name, address))
}

fn sender_from_bare_address(raw: &str) -> Option<ParsedSender> {
    raw.contains('@')
        .then(|| ParsedSender::new(String::new(), raw.trim()))
}

fn sender_from_name_only(raw: &str) -> Option<ParsedSender> {
    Some(ParsedSender::new(raw.trim(), String::new()))
}

/// Parse the raw `to` field of an email into an ordered address list.
pub fn parse_recipients(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }

    if let Ok(Value::Array(items)) = serde_json::from_str::<Value>(raw) {
        return items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                Value::Object(obj) => address_of(obj).unwrap_or_default(),
                _ => String::new(),
            })
            .filter(|s| !s.is_empty())
            .collect();
    }

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `address`, falling back to `email`, ignoring empty values.
fn address_of(obj: &Map<String, Value>) -> Option<String> {
    non_empty_str(obj, "address").or_else(|| non_empty_str(obj, "email"))
}

fn non_empty_str(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Trim, then strip one leading and one trailing quote (`"` or `'`).
fn strip_quotes(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed
        .strip_prefix(['"', '\''])
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix(['"', '\'']).unwrap_or(trimmed);
    trimmed.trim().to_string()
}
