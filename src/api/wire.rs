//! JSON shapes exchanged with the public mail endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MailError, Result};
use crate::model::mail::EmailId;

/// The four public endpoints, relative to the base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Verify,
    List,
    SyncAndList,
    Detail,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Self::Verify => "/public/emails/verify",
            Self::List => "/public/emails/list",
            Self::SyncAndList => "/public/emails/sync-and-list",
            Self::Detail => "/public/emails/detail",
        }
    }
}

/// `POST /public/emails/verify`
#[derive(Debug, Serialize)]
pub struct VerifyRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// `POST /public/emails/list` and `/public/emails/sync-and-list`
#[derive(Debug, Serialize)]
pub struct ListRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub page: u32,
    pub page_size: u32,
    pub sort_by: &'a str,
    pub sort_order: &'a str,
}

/// `POST /public/emails/detail`
#[derive(Debug, Serialize)]
pub struct DetailRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub email_id: EmailId,
}

/// Response wrapper shared by every endpoint.
///
/// `data` is kept as raw JSON until `success` is known, so a rejection with
/// an unexpected payload still surfaces its message.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
}

impl Envelope {
    /// Parse a response body.
    pub fn parse(body: &str) -> Result<Self> {
        serde_json::from_str(body)
            .map_err(|e| MailError::Network(format!("undecodable response: {e}")))
    }

    /// Turn a rejection into `MailError::Rejected`, using the server text
    /// or `fallback` when it sent none.
    pub fn check(self, fallback: &str) -> Result<Option<Value>> {
        if self.success {
            return Ok(self.data);
        }
        let message = self
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Err(MailError::Rejected(message))
    }

    /// Like [`Envelope::check`], then decode the mandatory `data` payload.
    pub fn into_data<T: DeserializeOwned>(self, fallback: &str) -> Result<T> {
        let data = self
            .check(fallback)?
            .ok_or_else(|| MailError::Network("response has no data".to_string()))?;
        serde_json::from_value(data)
            .map_err(|e| MailError::Network(format!("unexpected response data: {e}")))
    }
}
