//! Shared HTTP client for the tournament backend.
//!
//! DESIGN
//! ======
//! Handlers never touch `reqwest` directly. They build an `ApiRequest` and
//! hand it to a `Backend`; the production implementation attaches the
//! caller's bearer token, encodes the body and turns non-2xx statuses into
//! `ApiError::Status` carrying the backend's own message. The trait exists
//! so route tests can swap in a recording mock.
//!
//! ERROR HANDLING
//! ==============
//! No retries. A failed call is reported once and the caller decides what
//! to show.

use std::time::Duration;

use reqwest::Method;
use serde_json::Value;
use url::Url;

use crate::config::BackendTimeouts;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The configured base URL cannot carry API paths.
    #[error("invalid backend base URL: {0:?}")]
    InvalidBaseUrl(String),

    /// The request never produced a response (connect, timeout, body read).
    #[error("backend request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body was not valid JSON.
    #[error("backend response parse failed: {0}")]
    Parse(String),
}

impl ApiError {
    /// Text suitable for a toast.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } if !message.is_empty() => message.clone(),
            Self::Status { status, .. } => format!("Request failed ({status})"),
            Self::Request(_) => "Could not reach the tournament server. Please try again.".to_owned(),
            Self::Parse(_) => "The tournament server sent an unexpected response.".to_owned(),
            Self::HttpClientBuild(_) | Self::InvalidBaseUrl(_) => "The portal is misconfigured.".to_owned(),
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// A file part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub field: String,
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A multipart body: plain text fields plus file parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub fields: Vec<(String, String)>,
    pub files: Vec<UploadFile>,
}

impl UploadForm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.fields.push((name.to_owned(), value.into()));
        self
    }

    /// First text value submitted under `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First text value under `name`, trimmed, or `None` when blank.
    #[must_use]
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.field(name).map(str::trim).filter(|value| !value.is_empty())
    }

    #[must_use]
    pub fn file(&self, field: &str) -> Option<&UploadFile> {
        self.files.iter().find(|file| file.field == field)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(Value),
    Multipart(UploadForm),
}

/// One call against the backend.
///
/// `segments` and `query` hold raw values below the configured base URL;
/// the client percent-encodes them when it builds the final URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub segments: Vec<String>,
    pub query: Vec<(String, String)>,
    pub token: Option<String>,
    pub body: RequestBody,
}

impl ApiRequest {
    /// Start a request at a fixed route such as `/seasons/current`.
    #[must_use]
    pub fn new(method: Method, route: &str) -> Self {
        let segments = route.split('/').filter(|s| !s.is_empty()).map(str::to_owned).collect();
        Self { method, segments, query: Vec::new(), token: None, body: RequestBody::Empty }
    }

    #[must_use]
    pub fn get(route: &str) -> Self {
        Self::new(Method::GET, route)
    }

    #[must_use]
    pub fn post(route: &str) -> Self {
        Self::new(Method::POST, route)
    }

    #[must_use]
    pub fn put(route: &str) -> Self {
        Self::new(Method::PUT, route)
    }

    #[must_use]
    pub fn patch(route: &str) -> Self {
        Self::new(Method::PATCH, route)
    }

    #[must_use]
    pub fn delete(route: &str) -> Self {
        Self::new(Method::DELETE, route)
    }

    /// Append one path segment, typically a record id.
    #[must_use]
    pub fn segment(mut self, raw: impl Into<String>) -> Self {
        self.segments.push(raw.into());
        self
    }

    #[must_use]
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_owned(), value.into()));
        self
    }

    /// Unencoded `/a/b?k=v` form for logs and test lookups.
    #[must_use]
    pub fn path(&self) -> String {
        let mut path = format!("/{}", self.segments.join("/"));
        for (i, (key, value)) in self.query.iter().enumerate() {
            path.push(if i == 0 { '?' } else { '&' });
            path.push_str(key);
            path.push('=');
            path.push_str(value);
        }
        path
    }

    #[must_use]
    pub fn with_token(mut self, token: Option<&str>) -> Self {
        self.token = token.filter(|t| !t.is_empty()).map(str::to_owned);
        self
    }

    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    #[must_use]
    pub fn multipart(mut self, form: UploadForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

// =============================================================================
// BACKEND TRAIT
// =============================================================================

/// Transport-neutral backend seam. Enables mocking in tests.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// Perform one request and return the decoded JSON body (`null` when empty).
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or
    /// unparseable body.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

// =============================================================================
// REQWEST CLIENT
// =============================================================================

pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    /// Build a client for `base_url` with the given timeouts.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not a hierarchical URL or the HTTP
    /// client fails to build.
    pub fn new(base_url: &str, timeouts: BackendTimeouts) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| ApiError::InvalidBaseUrl(base_url.to_owned()))?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| ApiError::HttpClientBuild(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    fn url(&self, request: &ApiRequest) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(&request.segments);
        }
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        url
    }
}

#[async_trait::async_trait]
impl Backend for BackendClient {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let url = self.url(&request);
        let path = request.path();
        let mut builder = self.http.request(request.method.clone(), url);
        if let Some(token) = &request.token {
            builder = builder.bearer_auth(token);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Multipart(form) => builder.multipart(to_reqwest_form(form)?),
        };

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(error = %e, method = %request.method, %path, "backend request failed");
            ApiError::Request(e.to_string())
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), method = %request.method, %path, "backend rejected request");
            let message = extract_error_message(&text)
                .or_else(|| status.canonical_reason().map(str::to_owned))
                .unwrap_or_default();
            return Err(ApiError::Status { status: status.as_u16(), message });
        }

        parse_body(&text)
    }
}

fn to_reqwest_form(form: UploadForm) -> Result<reqwest::multipart::Form, ApiError> {
    let mut multipart = reqwest::multipart::Form::new();
    for (name, value) in form.fields {
        multipart = multipart.text(name, value);
    }
    for file in form.files {
        let mut part = reqwest::multipart::Part::bytes(file.bytes).file_name(file.file_name);
        if let Some(content_type) = file.content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|e| ApiError::Request(format!("invalid content type {content_type:?}: {e}")))?;
        }
        multipart = multipart.part(file.field, part);
    }
    Ok(multipart)
}

// =============================================================================
// PARSING
// =============================================================================

pub(crate) fn parse_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Pull a human-readable message out of an error body: `message ?? error ?? msg`,
/// falling back to a short plain-text body.
pub(crate) fn extract_error_message(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => ["message", "error", "msg"].iter().find_map(|key| match value.get(*key) {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            Some(Value::Object(inner)) => inner
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned),
            _ => None,
        }),
        Err(_) if trimmed.len() <= 200 && !trimmed.starts_with('<') => Some(trimmed.to_owned()),
        Err(_) => None,
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
