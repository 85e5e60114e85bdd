//! API boundary: request description, result envelope and the client trait.

use std::future::Future;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use secrecy::SecretString;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Result every outbound call resolves to.
///
/// Also the JSON envelope the server answers with:
/// `{"success": bool, "message"?: string, "data"?: T}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ActionResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Message to show the user, with a generic fallback for failures.
    pub fn display_message(&self) -> Option<&str> {
        match (&self.message, self.success) {
            (Some(message), _) => Some(message.as_str()),
            (None, false) => Some("Something went wrong. Please try again."),
            (None, true) => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ActionResult<U> {
        ActionResult {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
        }
    }

    /// Turns a success without payload into a failure.
    pub fn require_data(self) -> Self {
        if self.success && self.data.is_none() {
            return Self::failure("Unexpected empty response from server");
        }
        self
    }
}

impl<T: DeserializeOwned> ActionResult<T> {
    /// Folds a raw client response into a result.
    ///
    /// Transport and decoding failures become `success = false` with the
    /// error text as message.
    pub fn from_response(response: Result<Value, ApiError>) -> Self {
        match response {
            Ok(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                Self::failure(ApiError::Decode(e.to_string()).to_string())
            }),
            Err(e) => Self::failure(e.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A request as the actions describe it; the client decides how to send it.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Set by the caller; the client attaches credentials only when true.
    pub authenticated: bool,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            authenticated: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::new(Method::Post, path)
        }
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self {
            body: Some(body),
            ..Self::new(Method::Put, path)
        }
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn authenticated(mut self) -> Self {
        self.authenticated = true;
        self
    }
}

/// Bytes escaped inside a single path segment: everything but RFC 3986
/// unreserved characters.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Escapes an identifier for use as one URL path segment.
///
/// `.` and `..` are rejected outright since URL parsers resolve them even
/// when percent-encoded.
pub fn path_segment(id: &str) -> Result<String, ApiError> {
    if id.is_empty() || id == "." || id == ".." {
        return Err(ApiError::InvalidId(id.to_string()));
    }
    Ok(utf8_percent_encode(id, PATH_SEGMENT).to_string())
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("You need to sign in first")]
    Unauthenticated,
    #[error("Invalid identifier: {0:?}")]
    InvalidId(String),
}

/// Transport to the remote API.
///
/// `request` resolves to the raw JSON envelope; actions decode it with
/// [`ActionResult::from_response`].
pub trait ApiClient: Send + Sync {
    fn request(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<Value, ApiError>> + Send;

    /// Installs or clears the credentials used for authenticated requests.
    fn set_token(&self, token: Option<SecretString>);

    fn has_token(&self) -> bool;
}

/// Sends `request` and decodes the envelope.
pub async fn call<C, T>(client: &C, request: ApiRequest) -> ActionResult<T>
where
    C: ApiClient,
    T: DeserializeOwned,
{
    #[cfg(feature = "tracing")]
    tracing::debug!(method = request.method.as_str(), path = %request.path, "api request");

    let result = ActionResult::from_response(client.request(request).await);

    #[cfg(feature = "tracing")]
    {
        if !result.success {
            tracing::warn!(message = ?result.message, "api request failed");
        }
    }

    result
}
