//! Blocking HTTP implementation of [`MailApi`].

use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use super::wire::{DetailRequest, Endpoint, Envelope, ListRequest, VerifyRequest};
use super::{ListQuery, MailApi};
use crate::config::Config;
use crate::error::Result;
use crate::i18n;
use crate::model::mail::{Email, EmailId, EmailPage};

/// Talks JSON over HTTP to the public mail endpoints.
#[derive(Debug, Clone)]
pub struct HttpMailApi {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl HttpMailApi {
    /// Client for `base_url` (e.g. `http://localhost:8080/api/v1`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mailquery/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Client configured from `[server]`.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.server.base_url,
            Duration::from_secs(config.server.timeout_secs.max(1)),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    /// POST `body` and parse the envelope. The HTTP status is not inspected:
    /// error statuses carry the same envelope as successes.
    fn post<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<Envelope> {
        let url = self.url(endpoint);
        debug!(endpoint = endpoint.path(), "POST");

        let response = self.http.post(&url).json(body).send().map_err(|e| {
            warn!(endpoint = endpoint.path(), error = %e, "Request failed");
            e
        })?;
        let status = response.status();
        let text = response.text()?;

        let envelope = Envelope::parse(&text).map_err(|e| {
            warn!(endpoint = endpoint.path(), %status, "Undecodable response body");
            e
        })?;
        if !envelope.success {
            warn!(
                endpoint = endpoint.path(),
                %status,
                message = envelope.message.as_deref().unwrap_or(""),
                "Request rejected"
            );
        }
        Ok(envelope)
    }
}

impl MailApi for HttpMailApi {
    fn verify_credentials(&self, email: &str, password: &str) -> Result<()> {
        self.post(Endpoint::Verify, &VerifyRequest { email, password })?
            .check(i18n::err_invalid_credentials())?;
        Ok(())
    }

    fn list_emails(&self, email: &str, password: &str, query: &ListQuery) -> Result<EmailPage> {
        let endpoint = if query.sync {
            Endpoint::SyncAndList
        } else {
            Endpoint::List
        };
        let body = ListRequest {
            email,
            password,
            page: query.page,
            page_size: query.page_size,
            sort_by: &query.sort_by,
            sort_order: &query.sort_order,
        };
        let page: EmailPage = self
            .post(endpoint, &body)?
            .into_data(i18n::err_load_list())?;
        debug!(
            page = page.page,
            total = page.total,
            count = page.emails.len(),
            "Listed emails"
        );
        Ok(page)
    }

    fn fetch_detail(&self, email: &str, password: &str, email_id: EmailId) -> Result<Email> {
        let body = DetailRequest {
            email,
            password,
            email_id,
        };
        self.post(Endpoint::Detail, &body)?
            .into_data(i18n::err_load_detail())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = HttpMailApi::new("http://localhost:8080/api/v1/", Duration::from_secs(5)).unwrap();
        assert_eq!(api.base_url(), "http://localhost:8080/api/v1");
        assert_eq!(
            api.url(Endpoint::SyncAndList),
            "http://localhost:8080/api/v1/public/emails/sync-and-list"
        );
    }
}
