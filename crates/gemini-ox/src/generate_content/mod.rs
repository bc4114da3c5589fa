use crate::{content::Content, internal::GeminiRequestHelper};
use request::GenerateContentRequest;
use response::GenerateContentResponse;
use serde::{Deserialize, Serialize};

use crate::GeminiRequestError;

pub mod request;
pub mod response;

impl GenerateContentRequest {
    /// Sends a generate content request to the Gemini API
    ///
    /// This makes a single non-streaming request. Nothing is retried.
    ///
    /// # Errors
    ///
    /// - `GeminiRequestError::AuthenticationMissing` - if the client has no API key
    /// - `GeminiRequestError::UrlBuildError` - if base URL, version and model do not form a URL
    /// - `GeminiRequestError::Transport` - if the request could not be completed
    /// - `GeminiRequestError::Status` - if the API returns a non-success status
    /// - `GeminiRequestError::Decode` - if a success body is not a `GenerateContentResponse`
    pub async fn send(&self) -> Result<GenerateContentResponse, GeminiRequestError> {
        let helper = GeminiRequestHelper::new(&self.gemini)?;
        helper.send_generate_content_request(self).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
/// Output only. The reason why the model stopped generating tokens.
pub enum FinishReason {
    FinishReasonUnspecified,
    /// Natural stopping point or a configured stop sequence.
    Stop,
    /// The configured maximum output tokens was reached.
    MaxTokens,
    /// The content potentially contains safety violations.
    Safety,
    Recitation,
    Language,
    Blocklist,
    ProhibitedContent,
    Spii,
    /// Any reason this client does not know about.
    #[serde(other)]
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockReason {
    BlockReasonUnspecified,
    Safety,
    Blocklist,
    ProhibitedContent,
    #[serde(other)]
    Other,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<BlockReason>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseCandidate {
    /// Absent when the candidate was blocked before producing anything.
    pub content: Option<Content>,
    pub finish_reason: Option<FinishReason>,
    pub index: Option<u32>,
}
