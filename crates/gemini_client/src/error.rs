use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    /// The API answered but produced nothing to read, usually because the
    /// prompt was blocked.
    #[error("Gemini returned no candidates{}", block_suffix(.block_reason))]
    NoCandidates { block_reason: Option<String> },

    #[error("Gemini candidate has no content{}", finish_suffix(.finish_reason))]
    NoContent { finish_reason: Option<String> },
}

pub type Result<T> = std::result::Result<T, GeminiError>;

fn block_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(" (blocked: {reason})"),
        None => String::new(),
    }
}

fn finish_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(" (finish reason: {reason})"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_candidates_message_includes_block_reason() {
        let err = GeminiError::NoCandidates {
            block_reason: Some("SAFETY".to_string()),
        };
        assert_eq!(err.to_string(), "Gemini returned no candidates (blocked: SAFETY)");

        let err = GeminiError::NoCandidates { block_reason: None };
        assert_eq!(err.to_string(), "Gemini returned no candidates");
    }

    #[test]
    fn no_content_message_includes_finish_reason() {
        let err = GeminiError::NoContent {
            finish_reason: Some("SAFETY".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Gemini candidate has no content (finish reason: SAFETY)"
        );
    }
}
