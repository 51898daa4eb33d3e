//! Service-agnostic HTTP helpers shared by the user and album clients.

use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::mask_secret;

/// Standard User-Agent header for vitrola API requests.
pub const USER_AGENT: &str = concat!("vitrola/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// Config resolution helpers
// ============================================================================

/// Resolves a base URL with precedence: env > config > default.
///
/// # Arguments
/// * `config_base_url` - Value from config file (if present)
/// * `env_var` - Environment variable name (e.g., "`VITROLA_USER_API_URL`")
/// * `default_url` - Default URL if neither env nor config is set
/// * `service_name` - Human-readable service name for error messages
///
/// # Errors
/// Returns an error if the chosen URL is not well-formed.
pub fn resolve_base_url(
    config_base_url: Option<&str>,
    env_var: &str,
    default_url: &str,
    service_name: &str,
) -> Result<String> {
    if let Ok(env_url) = std::env::var(env_var) {
        let trimmed = env_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed, service_name)?;
            return Ok(trimmed.trim_end_matches('/').to_string());
        }
    }

    if let Some(config_url) = config_base_url {
        let trimmed = config_url.trim();
        if !trimmed.is_empty() {
            validate_url(trimmed, service_name)?;
            return Ok(trimmed.trim_end_matches('/').to_string());
        }
    }

    Ok(default_url.to_string())
}

/// Validates that a URL is well-formed.
fn validate_url(url: &str, service_name: &str) -> Result<()> {
    url::Url::parse(url).with_context(|| format!("Invalid {service_name} base URL: {url}"))?;
    Ok(())
}

/// Builds an HTTP client with the shared User-Agent and an optional request timeout.
///
/// # Errors
/// Returns an error if the TLS backend cannot be initialized.
pub fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("Failed to build HTTP client")
}

// ============================================================================
// Credentials
// ============================================================================

/// Opaque session token attached to authenticated requests.
///
/// Sent as `Authorization: Basic <token>`. The token is passed through as-is.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    /// Returns the masked token for display.
    pub fn masked(&self) -> String {
        mask_secret(&self.0)
    }

    /// Builds the authorization headers for one request.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&format!("Basic {}", self.0)) {
            headers.insert(AUTHORIZATION, value);
        }
        headers
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credentials").field(&self.masked()).finish()
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Categories of service errors for consistent error handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorKind {
    /// HTTP status error (4xx, 5xx)
    HttpStatus,
    /// Request exceeded the configured timeout
    Timeout,
    /// Connection refused, DNS failure or other transport error
    Network,
    /// Failed to decode the response body
    Parse,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::Parse => write!(f, "parse"),
        }
    }
}

/// Structured error from a backend service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// One-line summary suitable for display (the server's message when present)
    pub message: String,
    /// HTTP status for `HttpStatus` errors
    pub status: Option<u16>,
}

impl ApiError {
    /// Creates a new service error.
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    /// Creates an HTTP status error.
    ///
    /// The services answer errors with plain-text bodies ("Incorrect credentials").
    /// Those are surfaced verbatim; JSON bodies contribute their `message` field.
    pub fn http_status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let message = if body.is_empty() {
            format!("HTTP {status}")
        } else if let Ok(json) = serde_json::from_str::<Value>(body)
            && let Some(msg) = json
                .get("message")
                .or_else(|| json.get("error"))
                .and_then(Value::as_str)
        {
            msg.to_string()
        } else if let Ok(Value::String(text)) = serde_json::from_str::<Value>(body) {
            text
        } else {
            body.to_string()
        };

        Self {
            kind: ApiErrorKind::HttpStatus,
            message,
            status: Some(status),
        }
    }

    /// Creates a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Timeout, message)
    }

    /// Creates a response decoding error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for service operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

pub(crate) fn classify_reqwest_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::timeout("Request timed out")
    } else if e.is_connect() {
        ApiError::new(ApiErrorKind::Network, format!("Connection failed: {e}"))
    } else if e.is_decode() {
        ApiError::parse(format!("Invalid response: {e}"))
    } else {
        ApiError::new(ApiErrorKind::Network, format!("Network error: {e}"))
    }
}

/// Sends a request and maps transport and status failures to `ApiError`.
pub(crate) async fn send(request: reqwest::RequestBuilder) -> ApiResult<reqwest::Response> {
    let response = request
        .send()
        .await
        .map_err(|e| classify_reqwest_error(&e))?;

    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        let err = ApiError::http_status(status.as_u16(), &error_body);
        tracing::debug!(status = status.as_u16(), message = %err.message, "service returned error status");
        return Err(err);
    }

    Ok(response)
}

/// Sends a request and decodes a JSON response body.
pub(crate) async fn send_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> ApiResult<T> {
    let response = send(request).await?;
    let body = response
        .text()
        .await
        .map_err(|e| classify_reqwest_error(&e))?;
    serde_json::from_str(&body).map_err(|e| ApiError::parse(format!("Invalid response: {e}")))
}
