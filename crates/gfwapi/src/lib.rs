//! # gfwapi
//!
//! Blocking client for the GFW configuration API.
//!
//! This crate provides:
//! - A [`Transport`](transport::Transport) abstraction with an HTTP
//!   implementation and an in-memory mock
//! - The wire-format entity model ([`types`])
//! - Typed endpoints for every collection: actions, resources, permissions,
//!   roles, user groups, datasets, dataviews and workspaces
//! - Pagination that follows `nextOffset` until the collection is exhausted
//!
//! ## Example
//!
//! ```no_run
//! use gfwapi::{Client, ClientConfig};
//!
//! let client = Client::new(&ClientConfig::new("https://gateway.example.org/v3", "token"))
//!     .expect("invalid configuration");
//!
//! for role in client.list_roles().expect("request failed") {
//!     println!("{} {}", role.id, role.name);
//! }
//! ```
//!
//! ## Errors
//!
//! Every operation returns [`Result`]. A missing entity surfaces as an
//! [`Error::Application`] whose [`Error::is_not_found`] is true; the
//! `find_*` helpers turn that case into `Ok(None)`.

#![warn(clippy::all)]

pub mod api;
pub mod error;
pub mod transport;
pub mod types;

pub use error::{Error, ErrorCategory, NOT_FOUND_CODE, Result};
pub use transport::{Method, MockTransport, Request, Transport};

use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use transport::http::{DEFAULT_TIMEOUT, HttpTransport};
use types::{PAGE_SIZE, Paginated};

/// Connection settings for [`Client::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API base URL.
    pub url: String,
    /// Bearer token.
    pub token: String,
    /// Overall deadline applied to every request.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create settings with the default timeout.
    pub fn new(url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            token: token.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// High-level client for the GFW API.
///
/// Holds no state besides its transport; every call builds and inspects
/// its own request.
pub struct Client {
    transport: Box<dyn Transport>,
}

impl Client {
    /// Create a client backed by [`HttpTransport`].
    ///
    /// # Errors
    ///
    /// Returns a validation error if the URL or token is empty.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        if config.url.trim().is_empty() {
            return Err(Error::validation("url", "API URL must not be empty"));
        }
        if config.token.trim().is_empty() {
            return Err(Error::validation("token", "API token must not be empty"));
        }
        Ok(Self::with_transport(HttpTransport::new(
            &config.url,
            &config.token,
            config.timeout,
        )))
    }

    /// Create a client with a custom transport (for testing).
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
        }
    }

    /// Start a request. Every request bypasses the server-side cache.
    pub(crate) fn request(&self, method: Method, path: impl Into<String>) -> Request {
        Request::new(method, path).query("cache", "false")
    }

    /// Execute a request and return the raw body.
    pub(crate) fn execute(&self, request: &Request) -> Result<Vec<u8>> {
        self.transport.execute(request)
    }

    /// Execute a request and decode the JSON response.
    pub(crate) fn fetch<T: DeserializeOwned>(&self, request: &Request) -> Result<T> {
        let body = self.execute(request)?;
        decode(&body)
    }

    /// Execute a request whose response body is not needed.
    ///
    /// An empty body is a successful no-content answer.
    pub(crate) fn discard(&self, request: &Request) -> Result<()> {
        self.execute(request).map(|_| ())
    }

    /// Follow `nextOffset` until the collection is exhausted.
    pub(crate) fn list<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_query: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let mut all = Vec::new();
        let mut offset: u64 = 0;

        loop {
            let mut request = self
                .request(Method::Get, path)
                .query("limit", PAGE_SIZE.to_string())
                .query("offset", offset.to_string());
            for (key, value) in extra_query {
                request = request.query(*key, *value);
            }

            let page: Paginated<T> = self.fetch(&request)?;
            let (entries, next) = page.into_parts();
            let fetched = entries.len();
            all.extend(entries);

            match next {
                Some(next) if fetched > 0 && next > offset => {
                    debug!("{path}: fetched {fetched} entries, continuing at offset {next}");
                    offset = next;
                }
                _ => break,
            }
        }

        Ok(all)
    }
}

/// Serialize a request body.
pub(crate) fn encode<B: Serialize>(body: &B) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(body)?)
}

/// Decode a response body, rejecting empty bodies.
pub(crate) fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.is_empty() {
        return Err(Error::Decode("empty response body".to_string()));
    }
    Ok(serde_json::from_slice(body)?)
}

/// Map the not-found answer to `None`, propagating every other error.
pub(crate) fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}
