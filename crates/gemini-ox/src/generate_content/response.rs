use serde::{Deserialize, Serialize};

use super::{FinishReason, PromptFeedback, ResponseCandidate};
use crate::content::Content;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<ResponseCandidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    #[must_use]
    pub fn first_content(&self) -> Option<&Content> {
        self.candidates.first().and_then(|c| c.content.as_ref())
    }

    /// Text at `candidates[0].content.parts[0].text`.
    ///
    /// Returns `None` when any segment of that path is missing. Later parts
    /// and later candidates are never consulted.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.first_content()
            .and_then(|content| content.parts.first())
            .and_then(|part| part.as_text())
    }

    #[must_use]
    pub fn first_finish_reason(&self) -> Option<FinishReason> {
        self.candidates.first().and_then(|c| c.finish_reason)
    }
}
