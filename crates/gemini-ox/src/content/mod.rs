//! Content types shared by requests and responses.
//!
//! Only the text modality is modelled. Non-text parts in a response still
//! deserialize (their payload is ignored) so an unexpected part type never
//! turns into a decode failure on its own.

use serde::{Deserialize, Serialize};

/// A single piece of a [`Content`] turn.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Set by thinking models on parts that carry reasoning rather than answer text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thought: Option<bool>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            thought: None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl From<&str> for Part {
    fn from(value: &str) -> Self {
        Part::text(value)
    }
}

impl From<String> for Part {
    fn from(value: String) -> Self {
        Part::text(value)
    }
}

/// The base structured datatype containing multi-part content of a message.
///
/// Single-turn requests carry no `role`, which is what the public REST
/// samples send. The `role` the API echoes on candidates is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Creates a `Content` holding a single text part.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::text(text)],
        }
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::text(value)
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::text(value)
    }
}
