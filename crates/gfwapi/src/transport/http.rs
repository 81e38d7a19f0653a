//! HTTP transport backed by `ureq`.
//!
//! Every request carries the bearer token and an `application/json`
//! content type. Status handling is done by [`classify`](super::classify)
//! rather than by `ureq`, so non-2xx bodies are available for decoding.

use super::{Method, Request, Transport, classify};
use crate::error::Result;
use log::{debug, trace};
use std::time::Duration;
use ureq::RequestBuilder;

/// Maximum response size (entity lists with backend configuration can be large).
const MAX_BODY_SIZE: u64 = 64 * 1024 * 1024;

/// Default per-request deadline.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport that talks to a real API endpoint.
pub struct HttpTransport {
    /// HTTP agent for requests.
    agent: ureq::Agent,
    /// API base URL without trailing slash.
    base_url: String,
    /// Bearer token.
    token: String,
}

impl HttpTransport {
    /// Create a transport for `base_url` authenticated with `token`.
    ///
    /// `timeout` is applied to every request as an overall deadline.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self {
            agent,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Get the configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the absolute URL for a request path.
    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn decorate<B>(&self, builder: RequestBuilder<B>, request: &Request) -> RequestBuilder<B> {
        let mut builder = builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json");
        for (key, value) in &request.query {
            builder = builder.query(key, value);
        }
        builder
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: &Request) -> Result<Vec<u8>> {
        let url = self.url(&request.path);
        if let Some(body) = &request.body {
            trace!("{} {} body: {}", request.method, url, String::from_utf8_lossy(body));
        }

        let mut response = match request.method {
            Method::Get => self.decorate(self.agent.get(&url), request).call()?,
            Method::Delete => self.decorate(self.agent.delete(&url), request).call()?,
            Method::Post | Method::Put | Method::Patch => {
                let builder = match request.method {
                    Method::Post => self.agent.post(&url),
                    Method::Put => self.agent.put(&url),
                    _ => self.agent.patch(&url),
                };
                let builder = self.decorate(builder, request);
                match &request.body {
                    Some(body) => builder.send(body.as_slice())?,
                    None => builder.send_empty()?,
                }
            }
        };

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_BODY_SIZE)
            .read_to_vec()?;

        debug!("{} {} -> {}", request.method, request.path, status);
        trace!("response body: {}", String::from_utf8_lossy(&body));

        classify(status, body)
    }
}
