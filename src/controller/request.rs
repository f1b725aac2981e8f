//! Remote calls issued by the controller, and their results.

use crate::api::{ListQuery, MailApi};
use crate::error::Result;
use crate::model::mail::{Email, EmailId, EmailPage};
use crate::store::credentials::Credentials;

/// Independent request streams. Within one channel only the most recently
/// issued request is current; older responses are dropped on arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Auth,
    List,
    Detail,
}

/// What to ask the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    /// Credential check; `auto` marks the one issued from saved credentials.
    Verify { auto: bool },
    List(ListQuery),
    Detail(EmailId),
}

impl RequestKind {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Verify { .. } => Channel::Auth,
            Self::List(_) => Channel::List,
            Self::Detail(_) => Channel::Detail,
        }
    }
}

/// A pending remote call, tagged with its sequence number.
#[derive(Debug, Clone)]
pub struct Request {
    pub seq: u64,
    pub credentials: Credentials,
    pub kind: RequestKind,
}

impl Request {
    /// Perform the call. Blocks for the duration of the HTTP round trip.
    pub fn execute(&self, api: &dyn MailApi) -> Response {
        let Credentials { email, password } = &self.credentials;
        let outcome = match &self.kind {
            RequestKind::Verify { auto } => Outcome::Verified {
                auto: *auto,
                result: api.verify_credentials(email, password),
            },
            RequestKind::List(query) => Outcome::Listed {
                query: query.clone(),
                result: api.list_emails(email, password, query),
            },
            RequestKind::Detail(id) => Outcome::Detail {
                id: *id,
                result: api.fetch_detail(email, password, *id),
            },
        };
        Response {
            seq: self.seq,
            outcome,
        }
    }
}

/// Result of a remote call, echoing what was asked.
#[derive(Debug)]
pub enum Outcome {
    Verified { auto: bool, result: Result<()> },
    Listed { query: ListQuery, result: Result<EmailPage> },
    Detail { id: EmailId, result: Result<Email> },
}

impl Outcome {
    pub fn channel(&self) -> Channel {
        match self {
            Self::Verified { .. } => Channel::Auth,
            Self::Listed { .. } => Channel::List,
            Self::Detail { .. } => Channel::Detail,
        }
    }
}

/// A finished request.
#[derive(Debug)]
pub struct Response {
    pub seq: u64,
    pub outcome: Outcome,
}
