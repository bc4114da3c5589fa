#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(clippy::pedantic, clippy::unwrap_used)]

//! Minimal client for the Gemini `generateContent` REST endpoint.
//!
//! Only the non-streaming text path is covered: build a request from
//! [`Content`] values, send it with an API key, and read the candidates back.

pub mod content;
pub mod generate_content;
mod internal;

pub use crate::content::{Content, Part};
pub use crate::generate_content::request::GenerateContentRequest;
pub use crate::generate_content::response::GenerateContentResponse;
pub use crate::generate_content::{BlockReason, FinishReason, PromptFeedback, ResponseCandidate};

use core::fmt;

use bon::Builder;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Public Generative Language API host.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
/// API version segment used when none is configured.
pub const DEFAULT_API_VERSION: &str = "v1beta";
/// Query parameter carrying the key in [`ApiKeyPlacement::Query`] mode.
pub const DEFAULT_KEY_QUERY_PARAM: &str = "key";
/// Header carrying the key in [`ApiKeyPlacement::Header`] mode.
pub const DEFAULT_KEY_HEADER: &str = "x-goog-api-key";

/// Where the API key is attached on outgoing requests. Exactly one is used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKeyPlacement {
    /// `?<name>=<key>` on the request URL.
    Query(String),
    /// `<name>: <key>` request header.
    Header(String),
}

impl ApiKeyPlacement {
    #[must_use]
    pub fn query() -> Self {
        Self::Query(DEFAULT_KEY_QUERY_PARAM.to_string())
    }

    #[must_use]
    pub fn header() -> Self {
        Self::Header(DEFAULT_KEY_HEADER.to_string())
    }
}

impl Default for ApiKeyPlacement {
    fn default() -> Self {
        Self::query()
    }
}

#[derive(Clone, Builder)]
pub struct Gemini {
    #[builder(into)]
    pub(crate) api_key: Option<String>,
    #[builder(default)]
    pub(crate) client: reqwest::Client,
    #[builder(default = DEFAULT_BASE_URL.to_string(), into)]
    pub(crate) base_url: String,
    #[builder(default = DEFAULT_API_VERSION.to_string(), into)]
    pub(crate) api_version: String,
    #[builder(default)]
    pub(crate) key_placement: ApiKeyPlacement,
}

impl Gemini {
    /// Create a new Gemini client with the provided API key and default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::builder().api_key(api_key).build()
    }

    /// Returns a copy of this client that authenticates with `api_key`.
    ///
    /// The underlying `reqwest::Client` is shared, so this is cheap enough to
    /// call once per request.
    #[must_use]
    pub fn with_api_key(&self, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    #[must_use]
    pub fn key_placement(&self) -> &ApiKeyPlacement {
        &self.key_placement
    }
}

impl fmt::Debug for Gemini {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gemini")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("api_version", &self.api_version)
            .field("key_placement", &self.key_placement)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleApiErrorPayload {
    error: GoogleApiErrorDetails,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleApiErrorDetails {
    message: String,
    status: Option<String>,
}

#[derive(Debug, Error)]
pub enum GeminiRequestError {
    /// The request never produced a response (DNS, connect, timeout, reset)
    /// or the body could not be read. The URL is stripped so a query-string
    /// key cannot leak through `Display`.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("HTTP status {status}: {message}")]
    Status {
        status: u16,
        message: String,
        api_status: Option<String>,
    },

    /// A success response whose body is not the expected JSON document.
    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    /// No API key was set on the client.
    #[error("Authentication is missing: no API key provided")]
    AuthenticationMissing,

    /// Base URL, version or model do not form a valid URL.
    #[error("URL build failed: {0}")]
    UrlBuildError(String),
}

impl From<reqwest::Error> for GeminiRequestError {
    fn from(err: reqwest::Error) -> Self {
        GeminiRequestError::Transport(err.without_url())
    }
}

impl GeminiRequestError {
    /// HTTP status of a [`GeminiRequestError::Status`] failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            GeminiRequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True when the failure happened before any HTTP status was received.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, GeminiRequestError::Transport(_))
    }
}

/// Parse an error response from the Google API.
/// Structured `{"error": {...}}` payloads keep their message; anything else
/// falls back to the raw body text.
pub(crate) fn parse_error_response(
    status: reqwest::StatusCode,
    bytes: &bytes::Bytes,
) -> GeminiRequestError {
    if let Ok(payload) = serde_json::from_slice::<GoogleApiErrorPayload>(bytes) {
        GeminiRequestError::Status {
            status: status.as_u16(),
            message: payload.error.message,
            api_status: payload.error.status,
        }
    } else {
        let message = match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => map
                .get("message")
                .and_then(Value::as_str)
                .map_or_else(|| String::from_utf8_lossy(bytes).into_owned(), str::to_string),
            _ => String::from_utf8_lossy(bytes).into_owned(),
        };
        GeminiRequestError::Status {
            status: status.as_u16(),
            message,
            api_status: None,
        }
    }
}
