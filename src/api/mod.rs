//! Client side of the public mail API.
//!
//! Every call carries the user's email and password; the backend keeps no
//! session. [`MailApi`] is the seam the page controller runtime talks to,
//! [`client::HttpMailApi`] the real implementation.

pub mod client;
pub mod wire;

use crate::error::Result;
use crate::model::mail::{Email, EmailId, EmailPage};

/// Fixed page size used by the client.
pub const PAGE_SIZE: u32 = 20;

/// Parameters of a list call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// 1-indexed page number.
    pub page: u32,
    pub page_size: u32,
    pub sort_by: String,
    pub sort_order: String,
    /// Ask the backend to refresh the mailbox before listing.
    pub sync: bool,
}

impl ListQuery {
    /// Page `page` with the default ordering (newest first).
    pub fn page(page: u32) -> Self {
        Self {
            page,
            page_size: PAGE_SIZE,
            sort_by: "date".to_string(),
            sort_order: "desc".to_string(),
            sync: false,
        }
    }

    pub fn with_sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    pub fn with_order(mut self, sort_by: impl Into<String>, sort_order: impl Into<String>) -> Self {
        self.sort_by = sort_by.into();
        self.sort_order = sort_order.into();
        self
    }
}

/// Remote operations of the public mail API.
///
/// Errors are [`MailError::Network`](crate::error::MailError::Network) for
/// transport problems and
/// [`MailError::Rejected`](crate::error::MailError::Rejected) for
/// `success: false` answers.
pub trait MailApi: Send + Sync {
    /// Check that the email/password pair is accepted.
    fn verify_credentials(&self, email: &str, password: &str) -> Result<()>;

    /// Fetch one page of the mailbox, optionally syncing first.
    fn list_emails(&self, email: &str, password: &str, query: &ListQuery) -> Result<EmailPage>;

    /// Fetch one message with its bodies.
    fn fetch_detail(&self, email: &str, password: &str, email_id: EmailId) -> Result<Email>;
}
