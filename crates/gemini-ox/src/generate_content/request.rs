use bon::Builder;
use serde::Serialize;

use crate::Gemini;
use crate::content::Content;

/// Body of a `models/{model}:generateContent` call.
///
/// Only `contents` goes on the wire; the model is part of the URL and the
/// client carries endpoint and credentials.
#[derive(Debug, Clone, Serialize, Builder)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    #[builder(field)]
    pub contents: Vec<Content>,
    #[serde(skip)]
    #[builder(into)]
    pub model: String,
    #[serde(skip)]
    pub(crate) gemini: Gemini,
}

impl<S: generate_content_request_builder::State> GenerateContentRequestBuilder<S> {
    pub fn content(mut self, content: impl Into<Content>) -> Self {
        self.contents.push(content.into());
        self
    }
}

impl Gemini {
    pub fn generate_content(
        &self,
    ) -> GenerateContentRequestBuilder<generate_content_request_builder::SetGemini> {
        GenerateContentRequest::builder().gemini(self.clone())
    }
}
