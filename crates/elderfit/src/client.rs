//! Outbound call to the generative-language service.

use async_trait::async_trait;
use gemini_ox::{Gemini, GeminiRequestError, GenerateContentResponse};
use tracing::{debug, warn};

use crate::config::{Settings, SettingsError};
use crate::credential::SessionCredential;
use crate::error::ApiError;

/// Turns a prompt into completion text.
///
/// One attempt per call. Implementations must not retry and must not put the
/// credential anywhere except the outgoing request.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// # Errors
    ///
    /// Any [`ApiError`]; the controller turns it into the user-facing message.
    async fn generate(
        &self,
        prompt: &str,
        credential: &SessionCredential,
    ) -> Result<String, ApiError>;
}

/// [`CompletionBackend`] backed by the Gemini `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct RecommendationClient {
    gemini: Gemini,
    model: String,
}

impl RecommendationClient {
    /// `gemini` carries endpoint and key placement; its own key, if any, is
    /// replaced by the session credential on every call.
    pub fn new(gemini: Gemini, model: impl Into<String>) -> Self {
        Self {
            gemini,
            model: model.into(),
        }
    }

    /// Builds the HTTP client (with the optional request timeout) and the
    /// Gemini handle from `settings`.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::HttpClient` if the TLS backend cannot be initialised.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        let mut http = reqwest::Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            http = http.timeout(timeout);
        }
        let http = http.build().map_err(SettingsError::HttpClient)?;

        let gemini = Gemini::builder()
            .client(http)
            .base_url(settings.base_url.clone())
            .api_version(settings.api_version.clone())
            .key_placement(settings.api_key_transport.into())
            .build();

        Ok(Self::new(gemini, settings.model_id.clone()))
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl CompletionBackend for RecommendationClient {
    async fn generate(
        &self,
        prompt: &str,
        credential: &SessionCredential,
    ) -> Result<String, ApiError> {
        debug!(
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "sending generateContent request"
        );

        let response = self
            .gemini
            .with_api_key(credential.expose())
            .generate_content()
            .model(self.model.clone())
            .content(prompt)
            .build()
            .send()
            .await
            .map_err(classify)?;

        completion_text(&response)
    }
}

fn classify(err: GeminiRequestError) -> ApiError {
    match err {
        GeminiRequestError::Status {
            status,
            message,
            api_status,
        } => {
            warn!(status, api_status = ?api_status, %message, "generateContent rejected");
            ApiError::RequestFailed { status }
        }
        GeminiRequestError::Transport(source) => {
            warn!(error = %source, "generateContent transport failure");
            ApiError::NetworkFailure
        }
        GeminiRequestError::Decode(source) => {
            warn!(error = %source, "generateContent body is not a response document");
            ApiError::MalformedResponse
        }
        err @ (GeminiRequestError::AuthenticationMissing
        | GeminiRequestError::UrlBuildError(_)) => {
            warn!(error = %err, "generateContent request could not be built");
            ApiError::InvalidConfiguration
        }
    }
}

/// Text at `candidates[0].content.parts[0].text`; blank text counts as missing.
fn completion_text(response: &GenerateContentResponse) -> Result<String, ApiError> {
    match response.first_text() {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        _ => {
            warn!(
                candidates = response.candidates.len(),
                finish_reason = ?response.first_finish_reason(),
                block_reason = ?response.prompt_feedback.as_ref().and_then(|f| f.block_reason),
                "generateContent response has no completion text"
            );
            Err(ApiError::MalformedResponse)
        }
    }
}
