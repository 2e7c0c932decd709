//! Gemini `generateContent` wire format.
//!
//! Only the fields the text route reads or writes are modelled; anything else
//! in the upstream payload (safety ratings, usage metadata, ...) is ignored on
//! decode.
//!
//! # Example response
//! ```json
//! {
//!   "candidates": [
//!     {
//!       "content": { "role": "model", "parts": [{ "text": "Hello." }] },
//!       "finishReason": "STOP"
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{GeminiError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single user turn carrying `prompt` as its only part.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: Some(vec![Part::text(prompt)]),
            }],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    /// "user" or "model"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<Vec<Part>>,
}

/// Content part. Non-text parts (inline data, function calls) decode with
/// `text: None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Absent when generation stopped before producing anything.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Iterates every non-empty text fragment, candidate by candidate, part by
    /// part.
    pub fn text_fragments(&self) -> impl Iterator<Item = &str> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.content.as_ref())
            .filter_map(|content| content.parts.as_ref())
            .flat_map(|parts| parts.iter())
            .filter_map(|part| part.text.as_deref())
            .filter(|text| !text.is_empty())
    }

    /// All text fragments joined by newlines, with surrounding whitespace
    /// removed.
    ///
    /// Fails when the response holds no candidates, or when a candidate is
    /// missing its content or parts. An empty parts list is fine.
    pub fn text(&self) -> Result<String> {
        if self.candidates.is_empty() {
            return Err(GeminiError::NoCandidates {
                block_reason: self
                    .prompt_feedback
                    .as_ref()
                    .and_then(|feedback| feedback.block_reason.clone()),
            });
        }

        let missing_parts = self.candidates.iter().find(|candidate| {
            candidate
                .content
                .as_ref()
                .and_then(|content| content.parts.as_ref())
                .is_none()
        });
        if let Some(candidate) = missing_parts {
            return Err(GeminiError::NoContent {
                finish_reason: candidate.finish_reason.clone(),
            });
        }

        let joined = self.text_fragments().collect::<Vec<_>>().join("\n");
        Ok(joined.trim().to_string())
    }
}

/// Error envelope returned with non-2xx statuses:
/// `{"error": {"code": 400, "message": "...", "status": "INVALID_ARGUMENT"}}`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}
