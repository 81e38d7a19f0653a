//! Transport abstraction for talking to the GFW API.
//!
//! This module provides the [`Transport`] trait and its implementations.
//! The production implementation is [`http::HttpTransport`]; tests use
//! [`MockTransport`], which replays scripted responses through the same
//! status classification as the real transport.
//!
//! # Testing
//!
//! ```
//! use gfwapi::transport::{Method, MockTransport, Request, Transport};
//!
//! let mock = MockTransport::new();
//! mock.respond(Method::Get, "actions/1", 200, r#"{"id":1,"name":"read"}"#);
//!
//! let body = mock.execute(&Request::new(Method::Get, "actions/1")).unwrap();
//! assert!(!body.is_empty());
//! assert_eq!(mock.count(Method::Get, "actions/1"), 1);
//! ```

pub mod http;

use crate::error::{AppError, Error, Result};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// HTTP verbs used by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read one entity or a collection.
    Get,
    /// Create an entity or an association.
    Post,
    /// Replace an entity.
    Put,
    /// Partially update an entity.
    Patch,
    /// Remove an entity or an association.
    Delete,
}

impl Method {
    /// Uppercase verb as sent on the wire.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single API request, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// HTTP verb.
    pub method: Method,
    /// Path below the base URL, e.g. `roles/3/permission/7`.
    pub path: String,
    /// Query parameters in insertion order.
    pub query: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Vec<u8>>,
}

impl Request {
    /// Create a request without query or body.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = Some(body);
        self
    }

    /// Look up a query parameter by key.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Issues requests and returns the fully buffered response body.
///
/// Implementations must treat any status in `[200, 300)` as success and
/// route everything else through [`classify`].
pub trait Transport: Send + Sync {
    /// Execute a request, returning the response body on success.
    fn execute(&self, request: &Request) -> Result<Vec<u8>>;
}

/// Turn a status code and body into the transport result.
///
/// Success statuses return the body untouched (possibly empty). Failures
/// decode the body as an [`AppError`]; when that is not possible the raw
/// status and body are returned verbatim.
pub fn classify(status: u16, body: Vec<u8>) -> Result<Vec<u8>> {
    if (200..300).contains(&status) {
        return Ok(body);
    }

    match serde_json::from_slice::<AppError>(&body) {
        Ok(app) => Err(Error::Application {
            status,
            code: app.code,
            message: app.message,
        }),
        Err(_) => Err(Error::Http {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        }),
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Response { status: u16, body: Vec<u8> },
    Unreachable(String),
}

#[derive(Debug, Default)]
struct MockState {
    responses: HashMap<(Method, String), VecDeque<Scripted>>,
    log: Vec<Request>,
}

/// In-memory transport for tests.
///
/// Responses are scripted per `(method, path)` and consumed in order; the
/// last scripted response for a key is replayed once the queue is down to
/// one entry. Every executed request is recorded.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    /// Create a mock with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Script a response for `method path`.
    pub fn respond(&self, method: Method, path: &str, status: u16, body: &str) {
        self.push(
            method,
            path,
            Scripted::Response {
                status,
                body: body.as_bytes().to_vec(),
            },
        );
    }

    /// Script a JSON response with status 200.
    pub fn respond_json(&self, method: Method, path: &str, body: &serde_json::Value) {
        self.respond(method, path, 200, &body.to_string());
    }

    /// Script the API's not-found error for `method path`.
    pub fn respond_not_found(&self, method: Method, path: &str) {
        let body = serde_json::json!({
            "code": crate::error::NOT_FOUND_CODE,
            "message": format!("{path} not found"),
        });
        self.respond(method, path, 404, &body.to_string());
    }

    /// Script a connection failure for `method path`.
    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.push(method, path, Scripted::Unreachable(message.to_string()));
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.lock()
            .responses
            .entry((method, path.to_string()))
            .or_default()
            .push_back(scripted);
    }

    /// All requests executed so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<Request> {
        self.lock().log.clone()
    }

    /// Number of executed requests matching `method path`.
    #[must_use]
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.lock()
            .log
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    /// Number of executed requests with the given method.
    #[must_use]
    pub fn count_method(&self, method: Method) -> usize {
        self.lock().log.iter().filter(|r| r.method == method).count()
    }
}

impl Transport for MockTransport {
    fn execute(&self, request: &Request) -> Result<Vec<u8>> {
        let mut state = self.lock();
        state.log.push(request.clone());

        let key = (request.method, request.path.clone());
        let scripted = match state.responses.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };

        match scripted {
            Some(Scripted::Response { status, body }) => classify(status, body),
            Some(Scripted::Unreachable(message)) => Err(Error::Transport(message)),
            None => Err(Error::Transport(format!(
                "no mock response for {} {}",
                request.method, request.path
            ))),
        }
    }
}
